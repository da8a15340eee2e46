//! The shared status vocabulary.
//!
//! Every operation — mutating or read-only — reports one of these codes as
//! the first element of its result. The numeric values are part of the
//! external contract and must not be renumbered.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result code returned first by every market operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum StatusCode {
    Success = 0,
    AccessDenied = 1,
    /// Request, offer, or other market entity not found.
    UndefinedId = 2,
    DeadlinePassed = 3,
    RequestNotOpen = 4,
    /// Extra data already set, or the entity is in the wrong stage to accept it.
    NotPending = 5,
    RequestNotDecided = 6,
    RequestNotClosed = 7,
    /// Reserved: deletion attempted outside the permitted window. No shipped
    /// market profile currently produces this code.
    NotTimeForDeletion = 8,
    AlreadyOffered = 9,
    ImproperList = 10,
    DuplicateManager = 11,
}

impl StatusCode {
    /// The numeric wire value of this code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Parse a wire value back into a code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::AccessDenied),
            2 => Some(Self::UndefinedId),
            3 => Some(Self::DeadlinePassed),
            4 => Some(Self::RequestNotOpen),
            5 => Some(Self::NotPending),
            6 => Some(Self::RequestNotDecided),
            7 => Some(Self::RequestNotClosed),
            8 => Some(Self::NotTimeForDeletion),
            9 => Some(Self::AlreadyOffered),
            10 => Some(Self::ImproperList),
            11 => Some(Self::DuplicateManager),
            _ => None,
        }
    }

    /// All codes, in wire order.
    pub const ALL: [Self; 12] = [
        Self::Success,
        Self::AccessDenied,
        Self::UndefinedId,
        Self::DeadlinePassed,
        Self::RequestNotOpen,
        Self::NotPending,
        Self::RequestNotDecided,
        Self::RequestNotClosed,
        Self::NotTimeForDeletion,
        Self::AlreadyOffered,
        Self::ImproperList,
        Self::DuplicateManager,
    ];
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "SUCCESS",
            Self::AccessDenied => "ACCESS_DENIED",
            Self::UndefinedId => "UNDEFINED_ID",
            Self::DeadlinePassed => "DEADLINE_PASSED",
            Self::RequestNotOpen => "REQUEST_NOT_OPEN",
            Self::NotPending => "NOT_PENDING",
            Self::RequestNotDecided => "REQUEST_NOT_DECIDED",
            Self::RequestNotClosed => "REQUEST_NOT_CLOSED",
            Self::NotTimeForDeletion => "NOT_TIME_FOR_DELETION",
            Self::AlreadyOffered => "ALREADY_OFFERED",
            Self::ImproperList => "IMPROPER_LIST",
            Self::DuplicateManager => "DUPLICATE_MANAGER",
        };
        write!(f, "{name}")
    }
}
