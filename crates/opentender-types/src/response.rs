//! The `(status, payload)` response envelope.
//!
//! Every public market operation is total: it never panics and never throws,
//! it always answers with a status code and an optional payload. A payload
//! is present exactly when the operation has something meaningful to return
//! — failures carry none, and a few successful calls (a decision that
//! selected nothing, an extra query before submission) legitimately return
//! an empty payload.

use serde::{Deserialize, Serialize};

use crate::{MarketError, StatusCode};

/// Uniform result of a public market operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct Response<T> {
    pub status: StatusCode,
    pub payload: Option<T>,
}

impl<T> Response<T> {
    /// Successful response carrying a payload.
    pub fn ok(payload: T) -> Self {
        Self {
            status: StatusCode::Success,
            payload: Some(payload),
        }
    }

    /// Successful response with nothing to return.
    pub fn ok_empty() -> Self {
        Self {
            status: StatusCode::Success,
            payload: None,
        }
    }

    /// Failed response; never carries a payload.
    pub fn fail(status: StatusCode) -> Self {
        debug_assert!(!status.is_success());
        Self {
            status,
            payload: None,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    #[must_use]
    pub fn into_payload(self) -> Option<T> {
        self.payload
    }

    /// Unwrap the payload of a response expected to be successful.
    ///
    /// # Panics
    /// Panics when the response failed or carried no payload. Intended for
    /// tests and examples.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self.payload {
            Some(payload) => payload,
            None => panic!("response has no payload (status {})", self.status),
        }
    }
}

impl<T> From<crate::Result<T>> for Response<T> {
    fn from(result: crate::Result<T>) -> Self {
        match result {
            Ok(payload) => Self::ok(payload),
            Err(err) => Self::fail(err.status()),
        }
    }
}

impl<T> From<MarketError> for Response<T> {
    fn from(err: MarketError) -> Self {
        Self::fail(err.status())
    }
}
