//! Request lifecycle.
//!
//! A [`Request`] tracks one data request from the caller's side: whether it
//! has been issued, whether it is in flight, and what it settled with. The
//! transport itself lives elsewhere; the caller reports outcomes through
//! [`Request::resolve`].
//!
//! # Example
//!
//! ```
//! use relief_api::{Request, RequestState};
//!
//! let mut request: Request<Vec<u32>> = Request::lazy();
//! assert!(matches!(request.state(), RequestState::Idle));
//!
//! request.trigger();
//! request.resolve(Ok(vec![1, 2, 3]));
//! assert_eq!(request.state().table_flags(), (false, Some(&vec![1, 2, 3])));
//! ```

use log::debug;

use crate::error::{FetchFailure, ResponseError, normalize_error};

/// Where a request currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    /// Not issued yet (lazy requests before their first trigger).
    Idle,
    /// In flight. `previous` keeps the last good value so it can be shown
    /// while re-fetching.
    Pending { previous: Option<T> },
    /// Settled with a value.
    Ready(T),
    /// Settled with an error.
    Failed(ResponseError),
}

impl<T> RequestState<T> {
    /// Returns `true` while the request is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// The value to display: the settled value, or the stale one while
    /// re-fetching.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending { previous } => previous.as_ref(),
            Self::Idle | Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ResponseError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// `(pending, data)` as a table expects them.
    pub fn table_flags(&self) -> (bool, Option<&T>) {
        (self.is_pending(), self.data())
    }

    fn into_data(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending { previous } => previous,
            Self::Idle | Self::Failed(_) => None,
        }
    }
}

/// One data request.
#[derive(Debug, Clone)]
pub struct Request<T> {
    state: RequestState<T>,
    /// Number of times the request was issued.
    issued: u64,
}

impl<T> Request<T> {
    /// A request issued on creation.
    pub fn eager() -> Self {
        Self {
            state: RequestState::Pending { previous: None },
            issued: 1,
        }
    }

    /// A request that waits for [`Request::trigger`].
    pub fn lazy() -> Self {
        Self {
            state: RequestState::Idle,
            issued: 0,
        }
    }

    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    /// How many times the request has been issued.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Issue (or re-issue) the request, keeping the current value as stale
    /// data.
    pub fn trigger(&mut self) {
        let previous = std::mem::replace(&mut self.state, RequestState::Idle).into_data();
        self.issued += 1;
        debug!("request issued (#{})", self.issued);
        self.state = RequestState::Pending { previous };
    }

    /// Settle the request.
    pub fn resolve(&mut self, result: Result<T, ResponseError>) {
        self.state = match result {
            Ok(value) => RequestState::Ready(value),
            Err(error) => {
                debug!("request failed: {error}");
                RequestState::Failed(error)
            }
        };
    }

    /// Settle the request from a raw transport outcome.
    pub fn resolve_fetch(&mut self, result: Result<T, FetchFailure>) {
        self.resolve(result.map_err(normalize_error));
    }
}
