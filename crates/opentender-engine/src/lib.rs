//! # opentender-engine
//!
//! **The generic negotiation-market engine.**
//!
//! One engine serves every concrete market. A market instance is a
//! [`Market`] parameterized by a [`MarketProfile`] that fixes the shape of
//! the domain payloads, the decision strategy, and the behavioral flags; the
//! engine owns everything else:
//!
//! - **AccessControl**: one owner, a manager set, owner-only administration
//! - **RequestRegistry**: request lifecycle and dense id allocation
//! - **OfferRegistry**: offer lifecycle, request linkage, withdrawal
//! - **Decision validation**: explicit accepted-list checking
//! - **Facade**: the total `(status, payload)` operation surface plus the
//!   notification journal
//!
//! ## Call flow
//!
//! ```text
//! caller → access check → argument validation → registry mutation
//!        → [decision strategy] → status + domain events
//! ```
//!
//! Every call runs to completion against `&mut Market`; a failed call leaves
//! state untouched. [`SharedMarket`] wraps an instance in one exclusive lock
//! for hosts that need to serialize calls from many threads.

pub mod access;
pub mod clock;
pub mod decision;
pub mod market;
pub mod offers;
pub mod profile;
pub mod requests;
pub mod shared;

pub use access::AccessControl;
pub use clock::{Clock, ManualClock, SystemClock};
pub use decision::validate_accepted_list;
pub use market::{Market, MarketInfo};
pub use offers::OfferRegistry;
pub use profile::{MarketProfile, Selection};
pub use requests::RequestRegistry;
pub use shared::SharedMarket;
