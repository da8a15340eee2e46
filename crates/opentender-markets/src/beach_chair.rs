//! The beach-chair market.
//!
//! Demand is a block of chairs for a calendar day; supply quotes a chair
//! count and a total price. A maker gets one live offer per request, and
//! the decision is fully manual: managers pass the accepted ids explicitly
//! and the engine validates the list — several partial offers may be
//! accepted together to cover the block.

use opentender_engine::{MarketProfile, Selection, validate_accepted_list};
use opentender_types::{ExtraData, InterfaceGroup, Offer, OfferId, Request, Result, extra};
use serde::{Deserialize, Serialize};

/// Request payload: chair count and the day, as `YYYYMMDD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeachChairRequestExtra {
    pub quantity: u64,
    pub date: u64,
}

impl ExtraData for BeachChairRequestExtra {
    const FIELD_COUNT: usize = 2;

    fn decode(values: &[u64]) -> Result<Self> {
        extra::expect_arity(values, Self::FIELD_COUNT)?;
        Ok(Self {
            quantity: values[0],
            date: values[1],
        })
    }

    fn encode(&self) -> Vec<u64> {
        vec![self.quantity, self.date]
    }
}

/// Offer payload: chairs supplied and the total price asked for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeachChairOfferExtra {
    pub quantity: u64,
    pub total_price: u64,
}

impl ExtraData for BeachChairOfferExtra {
    const FIELD_COUNT: usize = 2;

    fn decode(values: &[u64]) -> Result<Self> {
        extra::expect_arity(values, Self::FIELD_COUNT)?;
        Ok(Self {
            quantity: values[0],
            total_price: values[1],
        })
    }

    fn encode(&self) -> Vec<u64> {
        vec![self.quantity, self.total_price]
    }
}

/// Profile of the beach-chair market.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeachChairMarket;

impl MarketProfile for BeachChairMarket {
    type RequestExtra = BeachChairRequestExtra;
    type OfferExtra = BeachChairOfferExtra;

    fn type_id(&self) -> &'static str {
        "io.opentender.markets.beach-chair"
    }

    fn interfaces(&self) -> &'static [InterfaceGroup] {
        &[
            InterfaceGroup::MarketPlace,
            InterfaceGroup::ManageableMarketPlace,
            InterfaceGroup::MultiManager,
            InterfaceGroup::ArrayExtraData,
        ]
    }

    fn one_offer_per_maker(&self) -> bool {
        true
    }

    fn select_offers(
        &self,
        _request: &Request<BeachChairRequestExtra>,
        offers: &[&Offer<BeachChairOfferExtra>],
        proposed: &[OfferId],
    ) -> Result<Selection> {
        validate_accepted_list(proposed, offers).map(Selection::Accepted)
    }
}
