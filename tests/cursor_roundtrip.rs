//! Cursor Codec Property Tests
//!
//! - Every valid state survives encode → decode unchanged
//! - Tokens are deterministic and URL-safe
//! - Corrupted tokens are rejected, never misread

use pagewise::{
    Anchor, Base64JsonCodec, CursorCodec, CursorState, FilterTree, PaginationError, SortDirection,
};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_direction() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Asc), Just(SortDirection::Desc)]
}

fn arb_anchor() -> impl Strategy<Value = Anchor> {
    prop_oneof![Just(Anchor::Head), Just(Anchor::Tail)]
}

fn arb_filter() -> impl Strategy<Value = FilterTree> {
    let leaf = ("[a-z_]{1,8}", "[a-z]{1,4}", "[ -~]{0,16}")
        .prop_map(|(field, op, value)| FilterTree::leaf(field, op, value));

    prop_oneof![Just(FilterTree::default()), leaf].prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(FilterTree::and),
            prop::collection::vec(inner.clone(), 0..4).prop_map(FilterTree::or),
            prop::collection::vec(inner, 0..4).prop_map(FilterTree::not),
        ]
    })
}

fn arb_state() -> impl Strategy<Value = CursorState> {
    (
        arb_direction(),
        "[a-z_][a-z0-9_]{0,15}",
        any::<u64>(),
        arb_filter(),
        arb_anchor(),
    )
        .prop_map(|(sort, order_by, position, filters, anchor)| {
            CursorState::new(sort, order_by, position, filters).anchored(anchor)
        })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_decode_inverts_encode(state in arb_state()) {
        let codec = Base64JsonCodec::new();
        let token = codec.encode(&state).unwrap();
        prop_assert_eq!(codec.decode(&token).unwrap(), state);
    }

    #[test]
    fn prop_tokens_deterministic_and_url_safe(state in arb_state()) {
        let codec = Base64JsonCodec::new();
        let token = codec.encode(&state).unwrap();
        prop_assert_eq!(&token, &codec.encode(&state).unwrap());
        prop_assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn prop_truncated_tokens_rejected(state in arb_state(), cut in 1usize..8) {
        let codec = Base64JsonCodec::new();
        let token = codec.encode(&state).unwrap();
        let truncated = &token[..token.len().saturating_sub(cut)];

        let result = codec.decode(truncated);
        prop_assert!(matches!(result, Err(PaginationError::MalformedCursor(_))));
    }
}

// =============================================================================
// Fixed Cases
// =============================================================================

#[test]
fn test_distinct_states_distinct_tokens() {
    let codec = Base64JsonCodec::new();
    let a = CursorState::new(SortDirection::Asc, "id", 1, FilterTree::default());
    let b = CursorState::new(SortDirection::Asc, "id", 2, FilterTree::default());
    assert_ne!(codec.encode(&a).unwrap(), codec.encode(&b).unwrap());
}

#[test]
fn test_anchor_survives_round_trip() {
    let codec = Base64JsonCodec::new();
    let state = CursorState::new(SortDirection::Desc, "created_at", 9, FilterTree::default())
        .anchored(Anchor::Tail);
    let decoded = codec.decode(&codec.encode(&state).unwrap()).unwrap();
    assert_eq!(decoded.anchor, Anchor::Tail);
}
