//! The flower market.
//!
//! Demand is a quantity of one flower kind wanted by a deadline; supply is
//! a single asking price. Anyone may post requests. The decision ignores
//! any proposed list and awards the request to the highest-priced open
//! offer — a seller's auction where the posted quantity is the commodity
//! and bids compete upward. Ties keep the earlier offer.

use opentender_engine::{MarketProfile, Selection};
use opentender_types::{
    ExtraData, InterfaceGroup, MarketError, Offer, OfferId, Request, Result, extra,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Flower kind wanted by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FlowerKind {
    Rose = 0,
    Tulip = 1,
    Jasmine = 2,
    White = 3,
}

impl FlowerKind {
    #[must_use]
    pub const fn code(self) -> u64 {
        self as u64
    }

    pub fn from_code(code: u64) -> Result<Self> {
        match code {
            0 => Ok(Self::Rose),
            1 => Ok(Self::Tulip),
            2 => Ok(Self::Jasmine),
            3 => Ok(Self::White),
            _ => Err(MarketError::ExtraValue { field: "flower kind", value: code }),
        }
    }
}

/// Request payload: how many flowers, of which kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowerRequestExtra {
    pub quantity: u64,
    pub kind: FlowerKind,
}

impl ExtraData for FlowerRequestExtra {
    const FIELD_COUNT: usize = 2;

    fn decode(values: &[u64]) -> Result<Self> {
        extra::expect_arity(values, Self::FIELD_COUNT)?;
        Ok(Self {
            quantity: values[0],
            kind: FlowerKind::from_code(values[1])?,
        })
    }

    fn encode(&self) -> Vec<u64> {
        vec![self.quantity, self.kind.code()]
    }
}

/// Offer payload: the asking price for the whole request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowerOfferExtra {
    pub price: u64,
}

impl ExtraData for FlowerOfferExtra {
    const FIELD_COUNT: usize = 1;

    fn decode(values: &[u64]) -> Result<Self> {
        extra::expect_arity(values, Self::FIELD_COUNT)?;
        Ok(Self { price: values[0] })
    }

    fn encode(&self) -> Vec<u64> {
        vec![self.price]
    }
}

/// Profile of the flower market.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowerMarket;

impl MarketProfile for FlowerMarket {
    type RequestExtra = FlowerRequestExtra;
    type OfferExtra = FlowerOfferExtra;

    fn type_id(&self) -> &'static str {
        "io.opentender.markets.flower"
    }

    fn interfaces(&self) -> &'static [InterfaceGroup] {
        // Fixed-arity extra submission only is advertised; the engine still
        // accepts the array encoding.
        &[
            InterfaceGroup::MarketPlace,
            InterfaceGroup::ManageableMarketPlace,
            InterfaceGroup::MultiManager,
        ]
    }

    fn select_offers(
        &self,
        request: &Request<FlowerRequestExtra>,
        offers: &[&Offer<FlowerOfferExtra>],
        _proposed: &[OfferId],
    ) -> Result<Selection> {
        let mut best: Option<(OfferId, u64)> = None;
        for offer in offers {
            let Some(extra) = offer.extra.as_ref().filter(|_| offer.is_open()) else {
                continue;
            };
            // Strict comparison keeps the earliest offer on a tie.
            if best.is_none_or(|(_, price)| extra.price > price) {
                best = Some((offer.id, extra.price));
            }
        }
        match best {
            Some((winner, price)) => {
                debug!(request = %request.id, %winner, price, "highest-price offer selected");
                Ok(Selection::Accepted(vec![winner]))
            }
            None => Ok(Selection::NotMade),
        }
    }
}
