//! Request facade subsystem.
//!
//! # Data Flow
//! ```text
//! Caller (url, params, callback)
//!     → client.rs (method → placement, base URL, defaults)
//!     → form.rs (percent-encoded key=value pairs)
//!     → reqwest (cookies included, content type on bodies)
//!     → callback(Result<ApiResponse, RequestError>) exactly once
//! ```

pub mod client;
pub mod error;
pub mod form;

pub use client::{ApiClient, ApiResponse, Method, Placement, RequestDescriptor};
pub use error::{RequestError, RequestResult};
pub use form::{ParamValue, Params};
