//! Notification events.
//!
//! Every mutating call appends an ordered pair of notifications to the
//! market's journal: a [`MarketEvent::Status`] first, then — only when the
//! call succeeded — one domain event carrying the relevant ids and values.
//! Read accessors never emit. Observers drain the journal through
//! `Market::take_events`; emission is an explicit return channel, never a
//! side channel.

use serde::{Deserialize, Serialize};

use crate::{ActorId, OfferId, RequestId, StatusCode};

/// A single notification produced by a mutating call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    /// Outcome of the call. Always the first event of a mutating call.
    Status(StatusCode),

    /// A request was created.
    RequestAdded { request: RequestId, deadline: u64 },
    /// A request received its domain payload (array encoding of the values).
    RequestExtraAdded { request: RequestId, values: Vec<u64> },
    /// A request moved to the closed stage.
    RequestClosed { request: RequestId },
    /// A decision was recorded for a request.
    RequestDecided {
        request: RequestId,
        accepted: Vec<OfferId>,
    },
    /// A request record was deleted.
    RequestDeleted { request: RequestId },

    /// An offer was created.
    OfferAdded {
        offer: OfferId,
        request: RequestId,
        maker: ActorId,
    },
    /// An offer received its domain payload (array encoding of the values).
    OfferExtraAdded { offer: OfferId, values: Vec<u64> },
    /// An offer was withdrawn by its maker.
    OfferWithdrawn { offer: OfferId },

    /// An actor was added to the manager set.
    ManagerAdded { actor: ActorId },
    /// An actor was removed from the manager set.
    ManagerRevoked { actor: ActorId },
    /// Ownership was transferred.
    OwnerChanged {
        previous: ActorId,
        new_owner: ActorId,
    },
}

impl MarketEvent {
    /// The status carried by a [`MarketEvent::Status`], if that is what
    /// this event is.
    #[must_use]
    pub fn as_status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(status) => Some(*status),
            _ => None,
        }
    }
}
