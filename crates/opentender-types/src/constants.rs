//! System-wide constants for the OpenTender engine.

/// First value handed out by the request and offer id counters.
pub const FIRST_ID: u64 = 1;

/// Maximum number of values accepted in an array-encoded extra payload.
pub const MAX_EXTRA_VALUES: usize = 16;

/// Maximum length of a proposed accepted-offer list.
pub const MAX_DECISION_LIST_LEN: usize = 256;

/// Domain prefix mixed into capability selector hashes.
pub const SELECTOR_DOMAIN: &[u8] = b"opentender:selector:v1:";
