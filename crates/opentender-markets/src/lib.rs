//! # opentender-markets
//!
//! **The concrete market profiles.**
//!
//! Each profile plugs a domain into the generic engine: the shape of the
//! request and offer payloads, the behavioral flags, the advertised
//! capability groups, and the decision strategy. Three markets ship today:
//!
//! - [`FlowerMarket`] — bulk flower procurement. Anyone may post demand;
//!   the decision picks the single highest-priced open offer.
//! - [`BeachChairMarket`] — beach-chair rental blocks. One live offer per
//!   maker per request; the decision is an explicit, validated list.
//! - [`HouseRenovationMarket`] — renovation jobs. Managers post demand; the
//!   decision picks the open offer closest to the posted target price,
//!   capped by a price limit.
//!
//! ```no_run
//! use opentender_engine::Market;
//! use opentender_markets::FlowerMarket;
//! use opentender_types::ActorId;
//!
//! let owner = ActorId::from_bytes([0; 32]);
//! let mut market = Market::new(FlowerMarket, owner);
//! let request = market.submit_request(owner, 2_000_000_000).unwrap();
//! ```

pub mod beach_chair;
pub mod flower;
pub mod house_renovation;

pub use beach_chair::{BeachChairMarket, BeachChairOfferExtra, BeachChairRequestExtra};
pub use flower::{FlowerKind, FlowerMarket, FlowerOfferExtra, FlowerRequestExtra};
pub use house_renovation::{
    HouseRenovationMarket, HouseRenovationOfferExtra, HouseRenovationRequestExtra, RoomKind,
};
