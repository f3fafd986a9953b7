//! # Cursor Subsystem
//!
//! Opaque pagination tokens.
//!
//! The rest of the crate treats tokens purely as strings and decoded states
//! purely as data; only a `CursorCodec` moves between the two.

mod checksum;
mod codec;
mod state;

pub use codec::{Base64JsonCodec, CursorCodec, CursorDecodeError, MAX_CURSOR_TOKEN_LEN};
pub use state::{Anchor, CursorState};
