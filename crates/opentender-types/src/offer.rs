//! Offer model.
//!
//! An offer is a unit of supply tied to exactly one request. It is created
//! pending, becomes open once its domain payload arrives, and may be
//! withdrawn by its maker. The request link is fixed at creation and always
//! pointed at a request that existed at that moment; if the request is
//! later deleted the offer survives as an orphan, queryable by id.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ActorId, ExtraData, OfferId, RequestId};

/// Lifecycle stage of an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum OfferStage {
    /// Created, domain payload not yet submitted. Not eligible for decisions.
    Pending = 0,
    /// Domain payload set; eligible for decisions.
    Open = 1,
    /// Retracted by its maker; terminal.
    Withdrawn = 2,
}

impl OfferStage {
    /// The numeric wire value of this stage.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for OfferStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Open => write!(f, "OPEN"),
            Self::Withdrawn => write!(f, "WITHDRAWN"),
        }
    }
}

/// An offer record, generic over the market's offer payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer<X> {
    pub id: OfferId,
    /// The request this offer answers. Immutable.
    pub request_id: RequestId,
    /// Creator. Immutable.
    pub maker: ActorId,
    pub stage: OfferStage,
    /// Domain payload; settable exactly once while pending.
    pub extra: Option<X>,
    /// UNIX seconds at creation.
    pub created_at: u64,
}

impl<X: ExtraData> Offer<X> {
    #[must_use]
    pub fn new(id: OfferId, request_id: RequestId, maker: ActorId, created_at: u64) -> Self {
        Self {
            id,
            request_id,
            maker,
            stage: OfferStage::Pending,
            extra: None,
            created_at,
        }
    }

    /// Whether the offer still counts against its maker: anything not
    /// withdrawn.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.stage != OfferStage::Withdrawn
    }

    /// Whether the offer can be part of a decision.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.stage == OfferStage::Open
    }

    /// The compact read-accessor projection.
    #[must_use]
    pub fn view(&self) -> OfferView {
        OfferView {
            request_id: self.request_id,
            maker: self.maker,
            stage: self.stage,
        }
    }
}

/// Payload of the `get_offer` read accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferView {
    pub request_id: RequestId,
    pub maker: ActorId,
    pub stage: OfferStage,
}
