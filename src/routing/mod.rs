//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation (path + optional query)
//!     → navigator.rs (sequence number, recovery, title)
//!     → resolver.rs (first match, redirects with hop bound)
//!     → table.rs / matcher.rs (ordered patterns, named segments)
//!     → cache.rs (single-flight lazy view load)
//!     → Return: Navigation or RouteError
//!
//! Table Construction (at startup):
//!     RouteConfig[] + ViewRegistry
//!     → Parse patterns
//!     → Check wildcard placement and unique names
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes built at startup, immutable at runtime
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order), `*` last

pub mod cache;
pub mod error;
pub mod loader;
pub mod matcher;
pub mod navigator;
pub mod resolver;
pub mod table;
pub mod title;

pub use cache::ViewCache;
pub use error::{LoadError, RouteError, RouteResult, TableError};
pub use loader::{ViewLoader, ViewRegistry};
pub use matcher::{PathParams, PathPattern};
pub use navigator::{Navigation, NavigationState, Navigator};
pub use resolver::Resolver;
pub use table::{RouteDefinition, RouteId, RouteKind, RouteMeta, RouteTable};
pub use title::{LogTitleSink, MemoryTitleSink, TitleSink};
