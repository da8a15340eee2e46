//! Request model.
//!
//! A request is a unit of demand. It is created pending, starts accepting
//! offers once its domain payload arrives, and is eventually closed — by a
//! manager directly or as a side effect of a recorded decision. Deletion
//! removes the record entirely; the identifier is never reused.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ActorId, ExtraData, OfferId, RequestId};

/// Lifecycle stage of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum RequestStage {
    /// Created, domain payload not yet submitted. Not accepting offers.
    Pending = 0,
    /// Domain payload set; accepting offers until the deadline or closure.
    Open = 1,
    /// No further offers; terminal unless deleted.
    Closed = 2,
}

impl RequestStage {
    /// The numeric wire value of this stage.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for RequestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Open => write!(f, "OPEN"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}

/// A request record, generic over the market's request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request<X> {
    pub id: RequestId,
    /// Creator. Immutable.
    pub maker: ActorId,
    /// UNIX seconds. Immutable once set at creation.
    pub deadline: u64,
    pub stage: RequestStage,
    /// Domain payload; absent until explicitly submitted, then fixed.
    pub extra: Option<X>,
    /// Accepted offers, present only once a decision has been recorded.
    pub decision: Option<Vec<OfferId>>,
    /// UNIX seconds at creation.
    pub created_at: u64,
}

impl<X: ExtraData> Request<X> {
    #[must_use]
    pub fn new(id: RequestId, maker: ActorId, deadline: u64, created_at: u64) -> Self {
        Self {
            id,
            maker,
            deadline,
            stage: RequestStage::Pending,
            extra: None,
            decision: None,
            created_at,
        }
    }

    /// Whether the request currently accepts offer submissions.
    #[must_use]
    pub fn accepts_offers(&self) -> bool {
        self.stage == RequestStage::Open
    }

    /// Whether the domain payload may still be submitted.
    #[must_use]
    pub fn accepts_extra(&self) -> bool {
        self.stage == RequestStage::Pending
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.stage == RequestStage::Closed
    }

    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.decision.is_some()
    }

    /// The compact read-accessor projection.
    #[must_use]
    pub fn view(&self) -> RequestView {
        RequestView {
            maker: self.maker,
            deadline: self.deadline,
            stage: self.stage,
        }
    }
}

/// Payload of the `get_request` read accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestView {
    pub maker: ActorId,
    pub deadline: u64,
    pub stage: RequestStage,
}
