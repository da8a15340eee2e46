//! The house-renovation market.
//!
//! Demand is a renovation job: room kind, job size, a hard price limit and
//! a target price the client hopes to land near. Posting demand is a
//! manager action here — requests are curated, not crowd-sourced. The
//! decision ignores any proposed list: offers above the limit are out, and
//! among the rest the one closest to the target wins. No eligible offer
//! means no decision — the request keeps collecting.

use opentender_engine::{MarketProfile, Selection};
use opentender_types::{
    ExtraData, InterfaceGroup, MarketError, Offer, OfferId, Request, Result, extra,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Room kind a renovation request concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RoomKind {
    Kitchen = 0,
    Bedroom = 1,
    LivingRoom = 2,
    Bathroom = 3,
}

impl RoomKind {
    #[must_use]
    pub const fn code(self) -> u64 {
        self as u64
    }

    pub fn from_code(code: u64) -> Result<Self> {
        match code {
            0 => Ok(Self::Kitchen),
            1 => Ok(Self::Bedroom),
            2 => Ok(Self::LivingRoom),
            3 => Ok(Self::Bathroom),
            _ => Err(MarketError::ExtraValue { field: "room kind", value: code }),
        }
    }
}

/// Request payload: job size, room, and the price envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseRenovationRequestExtra {
    pub quantity: u64,
    pub room: RoomKind,
    /// Offers above this price are never accepted.
    pub price_limit: u64,
    /// The decision prefers the offer closest to this price.
    pub price_target: u64,
}

impl ExtraData for HouseRenovationRequestExtra {
    const FIELD_COUNT: usize = 4;

    fn decode(values: &[u64]) -> Result<Self> {
        extra::expect_arity(values, Self::FIELD_COUNT)?;
        Ok(Self {
            quantity: values[0],
            room: RoomKind::from_code(values[1])?,
            price_limit: values[2],
            price_target: values[3],
        })
    }

    fn encode(&self) -> Vec<u64> {
        vec![self.quantity, self.room.code(), self.price_limit, self.price_target]
    }
}

/// Offer payload: the contractor's price for the whole job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseRenovationOfferExtra {
    pub price: u64,
}

impl ExtraData for HouseRenovationOfferExtra {
    const FIELD_COUNT: usize = 1;

    fn decode(values: &[u64]) -> Result<Self> {
        extra::expect_arity(values, Self::FIELD_COUNT)?;
        Ok(Self { price: values[0] })
    }

    fn encode(&self) -> Vec<u64> {
        vec![self.price]
    }
}

/// Profile of the house-renovation market.
#[derive(Debug, Clone, Copy, Default)]
pub struct HouseRenovationMarket;

impl MarketProfile for HouseRenovationMarket {
    type RequestExtra = HouseRenovationRequestExtra;
    type OfferExtra = HouseRenovationOfferExtra;

    fn type_id(&self) -> &'static str {
        "io.opentender.markets.house-renovation"
    }

    fn interfaces(&self) -> &'static [InterfaceGroup] {
        &[
            InterfaceGroup::MarketPlace,
            InterfaceGroup::ManageableMarketPlace,
            InterfaceGroup::MultiManager,
            InterfaceGroup::ArrayExtraData,
        ]
    }

    fn open_submission(&self) -> bool {
        false
    }

    fn select_offers(
        &self,
        request: &Request<HouseRenovationRequestExtra>,
        offers: &[&Offer<HouseRenovationOfferExtra>],
        _proposed: &[OfferId],
    ) -> Result<Selection> {
        // A request without its payload has no price envelope to judge by.
        let Some(terms) = request.extra.as_ref() else {
            return Ok(Selection::NotMade);
        };

        let mut best: Option<(OfferId, u64)> = None;
        for offer in offers {
            let Some(price) = offer.extra.as_ref().map(|e| e.price).filter(|_| offer.is_open())
            else {
                continue;
            };
            if price > terms.price_limit {
                continue;
            }
            let distance = price.abs_diff(terms.price_target);
            // Strict comparison keeps the earliest offer on a distance tie.
            if best.is_none_or(|(_, b)| distance < b) {
                best = Some((offer.id, distance));
            }
        }
        match best {
            Some((winner, distance)) => {
                debug!(
                    request = %request.id,
                    %winner,
                    distance,
                    target = terms.price_target,
                    "closest-to-target offer selected"
                );
                Ok(Selection::Accepted(vec![winner]))
            }
            None => Ok(Selection::NotMade),
        }
    }
}
