//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing + http produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt subscriber)
//!     → any `metrics` recorder the host installs
//! ```

pub mod logging;
pub mod metrics;
