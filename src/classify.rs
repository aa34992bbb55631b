//! Decision classification.
//!
//! Maps a [`DecodedEvent`] to one of the closed set of categories based on
//! its decision token. Pure and total: no side effects, no configuration, no
//! failure path.
use crate::types::{Category, DecodedEvent};

/// Decision token emitted by the firewall when it rejects a request.
pub const BLOCK_TOKEN: &str = "BLOCK";

/// Decision token emitted by the firewall when it lets a request through.
pub const ALLOW_TOKEN: &str = "ALLOW";

/// Classifies an event by its decision token.
///
/// The comparison is case-insensitive. Anything that is not recognizably an
/// allow or a block (a missing field, an empty token, a decision value this
/// version does not know) lands in [`Category::Errored`]. There is no
/// silent default to `Allowed`: an unrecognized decision is routed where an
/// operator will see it, not waved through.
///
/// # Examples
///
/// ```rust
/// use fwlog::{classify, Category, DecodedEvent};
///
/// let event = DecodedEvent {
///     decision: Some("block".into()),
///     fields: serde_json::json!({ "action": "block" }),
/// };
/// assert_eq!(classify(&event), Category::Blocked);
/// ```
pub fn classify(event: &DecodedEvent) -> Category {
    match event.decision() {
        Some(token) if token.eq_ignore_ascii_case(BLOCK_TOKEN) => Category::Blocked,
        Some(token) if token.eq_ignore_ascii_case(ALLOW_TOKEN) => Category::Allowed,
        _ => Category::Errored,
    }
}
