//! # Cursor Codec
//!
//! Owns the opaque wire-token format used for pagination cursors. Contains
//! only encoding/decoding logic and no paging semantics.
//!
//! Default token layout: `base64url(json(state) ++ crc32_be(json(state)))`,
//! unpadded.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use thiserror::Error;

use super::checksum::{seal, unseal};
use super::state::CursorState;
use crate::errors::{PaginationError, PaginationResult};

/// Decode bound for untrusted token input
pub const MAX_CURSOR_TOKEN_LEN: usize = 8 * 1024;

/// Why a token was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorDecodeError {
    #[error("cursor token is empty")]
    Empty,

    #[error("cursor token exceeds max length: {len} chars (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("cursor token is not valid base64: {0}")]
    Encoding(String),

    #[error("cursor token checksum mismatch")]
    Checksum,

    #[error("cursor payload is invalid: {0}")]
    Payload(String),
}

/// Reversible transform between `CursorState` and an opaque token.
///
/// Implementations must be pure and deterministic. Callers never inspect
/// tokens; they only round-trip them through the same codec.
pub trait CursorCodec: Send + Sync {
    /// Encode a state into a token
    fn encode(&self, state: &CursorState) -> PaginationResult<String>;

    /// Decode a token. Anything this codec did not produce fails with
    /// `MalformedCursor`.
    fn decode(&self, token: &str) -> PaginationResult<CursorState>;
}

impl<C: CursorCodec + ?Sized> CursorCodec for &C {
    fn encode(&self, state: &CursorState) -> PaginationResult<String> {
        (**self).encode(state)
    }

    fn decode(&self, token: &str) -> PaginationResult<CursorState> {
        (**self).decode(token)
    }
}

impl<C: CursorCodec + ?Sized> CursorCodec for Box<C> {
    fn encode(&self, state: &CursorState) -> PaginationResult<String> {
        (**self).encode(state)
    }

    fn decode(&self, token: &str) -> PaginationResult<CursorState> {
        (**self).decode(token)
    }
}

/// Default codec: checksummed JSON in URL-safe base64
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64JsonCodec;

impl Base64JsonCodec {
    pub fn new() -> Self {
        Self
    }

    fn decode_token(token: &str) -> Result<CursorState, CursorDecodeError> {
        let token = token.trim();

        if token.is_empty() {
            return Err(CursorDecodeError::Empty);
        }

        if token.len() > MAX_CURSOR_TOKEN_LEN {
            return Err(CursorDecodeError::TooLong {
                len: token.len(),
                max: MAX_CURSOR_TOKEN_LEN,
            });
        }

        let sealed = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| CursorDecodeError::Encoding(e.to_string()))?;

        let payload = unseal(&sealed).ok_or(CursorDecodeError::Checksum)?;

        serde_json::from_slice(payload).map_err(|e| CursorDecodeError::Payload(e.to_string()))
    }
}

impl CursorCodec for Base64JsonCodec {
    fn encode(&self, state: &CursorState) -> PaginationResult<String> {
        let payload = serde_json::to_vec(state)
            .map_err(|e| PaginationError::CursorEncoding(e.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(seal(payload)))
    }

    fn decode(&self, token: &str) -> PaginationResult<CursorState> {
        Self::decode_token(token).map_err(PaginationError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterTree;
    use crate::planner::SortDirection;

    fn sample_state() -> CursorState {
        CursorState::new(
            SortDirection::Asc,
            "id",
            2,
            FilterTree::and(vec![
                FilterTree::leaf("age", "gt", "18"),
                FilterTree::leaf("age", "lt", "65"),
            ]),
        )
    }

    #[test]
    fn test_round_trip() {
        let codec = Base64JsonCodec::new();
        let state = sample_state();
        let token = codec.encode(&state).unwrap();
        assert_eq!(codec.decode(&token).unwrap(), state);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let codec = Base64JsonCodec::new();
        let state = sample_state();
        assert_eq!(codec.encode(&state).unwrap(), codec.encode(&state).unwrap());
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = Base64JsonCodec.encode(&sample_state()).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_decode_trims_whitespace() {
        let token = Base64JsonCodec.encode(&sample_state()).unwrap();
        let padded = format!("  {}\n", token);
        assert_eq!(Base64JsonCodec.decode(&padded).unwrap(), sample_state());
    }

    #[test]
    fn test_decode_rejects_empty() {
        assert_eq!(
            Base64JsonCodec::decode_token("   "),
            Err(CursorDecodeError::Empty)
        );
    }

    #[test]
    fn test_decode_rejects_oversized() {
        let token = "A".repeat(MAX_CURSOR_TOKEN_LEN + 1);
        assert_eq!(
            Base64JsonCodec::decode_token(&token),
            Err(CursorDecodeError::TooLong {
                len: MAX_CURSOR_TOKEN_LEN + 1,
                max: MAX_CURSOR_TOKEN_LEN
            })
        );
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        assert!(matches!(
            Base64JsonCodec::decode_token("not base64!"),
            Err(CursorDecodeError::Encoding(_))
        ));
    }

    #[test]
    fn test_decode_rejects_tampered_token() {
        let token = Base64JsonCodec.encode(&sample_state()).unwrap();
        let mut sealed = URL_SAFE_NO_PAD.decode(&token).unwrap();
        // Bump the position digit inside the JSON payload
        let idx = sealed.iter().position(|b| *b == b'2').unwrap();
        sealed[idx] = b'9';
        let tampered = URL_SAFE_NO_PAD.encode(&sealed);

        assert_eq!(
            Base64JsonCodec::decode_token(&tampered),
            Err(CursorDecodeError::Checksum)
        );
    }

    #[test]
    fn test_decode_rejects_foreign_payload() {
        let token = URL_SAFE_NO_PAD.encode(seal(b"{\"page\":2}".to_vec()));
        assert!(matches!(
            Base64JsonCodec::decode_token(&token),
            Err(CursorDecodeError::Payload(_))
        ));
    }

    #[test]
    fn test_decode_failure_is_malformed_cursor() {
        let err = Base64JsonCodec.decode("garbage").unwrap_err();
        assert!(matches!(err, PaginationError::MalformedCursor(_)));
    }
}
