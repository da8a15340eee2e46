//! Extra-data codec.
//!
//! Each market attaches a domain-specific payload ("extra data") to its
//! requests and offers. The payload travels in two interchangeable
//! encodings: the typed struct itself (fixed-arity calls) and a flat `u64`
//! array (array-encoded calls). [`ExtraData`] ties the two together so the
//! engine can treat both submission paths as one operation.

use std::fmt;

use serde::{Serialize, de::DeserializeOwned};

use crate::{MarketError, Result, constants};

/// A market-specific request or offer payload.
///
/// `decode` must accept exactly the values `encode` produces, in the same
/// field order, and reject anything else with a list-shaped error.
pub trait ExtraData:
    Clone + fmt::Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Number of values in the array encoding.
    const FIELD_COUNT: usize;

    /// Decode the array encoding.
    fn decode(values: &[u64]) -> Result<Self>;

    /// Produce the array encoding, `FIELD_COUNT` values long.
    fn encode(&self) -> Vec<u64>;
}

/// Shared arity guard for `decode` implementations. Profiles must declare
/// at most [`constants::MAX_EXTRA_VALUES`] fields.
pub fn expect_arity(values: &[u64], expected: usize) -> Result<()> {
    debug_assert!(expected <= constants::MAX_EXTRA_VALUES);
    if values.len() != expected {
        return Err(MarketError::ExtraArity {
            expected,
            got: values.len(),
        });
    }
    Ok(())
}
