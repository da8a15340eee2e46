//! One exclusive lock per market instance.
//!
//! The execution contract requires every call to run to completion with no
//! interleaving — a single global serialization order per instance. With an
//! owned [`Market`] the borrow checker already enforces that; hosts that
//! fan calls in from several threads get the same guarantee from this
//! handle, which funnels every access through one mutex.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::market::Market;
use crate::profile::MarketProfile;

/// Cloneable, thread-safe handle to one market instance.
pub struct SharedMarket<P: MarketProfile> {
    inner: Arc<Mutex<Market<P>>>,
}

impl<P: MarketProfile> SharedMarket<P> {
    #[must_use]
    pub fn new(market: Market<P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(market)),
        }
    }

    /// Run `f` against the market under the instance lock. The closure's
    /// span is the atomic unit: no other call observes a partial mutation.
    pub fn with<R>(&self, f: impl FnOnce(&mut Market<P>) -> R) -> R {
        let mut market = self.inner.lock();
        f(&mut market)
    }
}

impl<P: MarketProfile> Clone for SharedMarket<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
