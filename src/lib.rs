//! Blog navigation and request layer.
//!
//! A declarative route table resolving paths to lazily loaded views, and a
//! request facade that normalizes HTTP verbs into one result/callback shape.

pub mod app;
pub mod config;
pub mod http;
pub mod observability;
pub mod routing;
pub mod views;

pub use app::App;
pub use config::schema::AppConfig;
pub use http::ApiClient;
pub use routing::Navigator;
