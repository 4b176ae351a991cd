//! Request glue between the REST layer and the table engine.
//!
//! Provides the lifecycle of one data request ([`Request`] / [`RequestState`])
//! and normalization of failed requests into a [`ResponseError`] that forms and
//! notifications can display directly.

pub mod error;
pub mod request;

pub use error::{FetchFailure, NON_FIELD_ERROR, ResponseError, normalize_error};
pub use request::{Request, RequestState};
