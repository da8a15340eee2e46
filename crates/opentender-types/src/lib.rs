//! # opentender-types
//!
//! Shared types for the **OpenTender** negotiation marketplace engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`RequestId`], [`OfferId`], [`MarketId`]
//! - **Actor identity**: [`ActorId`]
//! - **Status taxonomy**: [`StatusCode`] — the shared result vocabulary
//! - **Request model**: [`Request`], [`RequestStage`], [`RequestView`]
//! - **Offer model**: [`Offer`], [`OfferStage`], [`OfferView`]
//! - **Extra-data codec**: [`ExtraData`] — fixed-arity and array encodings
//! - **Notifications**: [`MarketEvent`]
//! - **Capability discovery**: [`InterfaceGroup`], [`InterfaceId`]
//! - **Response envelope**: [`Response`]
//! - **Errors**: [`MarketError`] with per-variant status mapping
//! - **Constants**: system-wide limits and defaults

pub mod actor;
pub mod constants;
pub mod error;
pub mod event;
pub mod extra;
pub mod ids;
pub mod interface;
pub mod offer;
pub mod request;
pub mod response;
pub mod status;

// Re-export all primary types at crate root for ergonomic imports:
//   use opentender_types::{RequestId, Offer, StatusCode, ...};

pub use actor::*;
pub use error::*;
pub use event::*;
pub use extra::*;
pub use ids::*;
pub use interface::*;
pub use offer::*;
pub use request::*;
pub use response::*;
pub use status::*;

// Constants are accessed via `opentender_types::constants::FOO`
// (not re-exported to avoid name collisions).
