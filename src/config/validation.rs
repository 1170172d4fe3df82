//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route table shape (single trailing wildcard, unique names)
//! - Check each route has exactly one of `view` / `redirect`
//! - Validate value ranges and URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::fmt;

use reqwest::header::HeaderValue;
use url::Url;

use crate::config::schema::AppConfig;
use crate::routing::matcher::PathPattern;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted location of the offending field (`routes[2].path`).
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.router.max_redirects == 0 {
        errors.push(ValidationError::new(
            "router.max_redirects",
            "must be at least 1",
        ));
    }
    if let Some(default_route) = &config.router.default_route {
        if !default_route.starts_with('/') {
            errors.push(ValidationError::new(
                "router.default_route",
                "must start with '/'",
            ));
        }
    }
    if let Some(base_url) = &config.http.base_url {
        if let Err(e) = Url::parse(base_url) {
            errors.push(ValidationError::new("http.base_url", e.to_string()));
        }
    }
    if config.http.content_type.trim().is_empty() {
        errors.push(ValidationError::new("http.content_type", "must not be empty"));
    } else if let Err(e) = HeaderValue::from_str(&config.http.content_type) {
        errors.push(ValidationError::new(
            "http.content_type",
            format!("not a valid header value: {}", e),
        ));
    }

    let mut names = HashSet::new();
    let last = config.routes.len().saturating_sub(1);
    let mut wildcard_seen = false;

    for (i, route) in config.routes.iter().enumerate() {
        let field = |name: &str| format!("routes[{}].{}", i, name);

        match PathPattern::parse(&route.path) {
            Ok(pattern) if pattern.is_catch_all() => {
                if wildcard_seen {
                    errors.push(ValidationError::new(field("path"), "duplicate wildcard route"));
                } else if i != last {
                    errors.push(ValidationError::new(
                        field("path"),
                        "wildcard route must be the last entry",
                    ));
                }
                wildcard_seen = true;
            }
            Ok(_) => {}
            Err(e) => errors.push(ValidationError::new(field("path"), e.to_string())),
        }

        if let Some(name) = &route.name {
            if !names.insert(name.as_str()) {
                errors.push(ValidationError::new(
                    field("name"),
                    format!("duplicate route name '{}'", name),
                ));
            }
        }

        match (&route.view, &route.redirect) {
            (Some(_), None) => {}
            (None, Some(target)) => {
                if !target.starts_with('/') {
                    errors.push(ValidationError::new(
                        field("redirect"),
                        "must start with '/'",
                    ));
                }
            }
            _ => errors.push(ValidationError::new(
                field("view"),
                "exactly one of `view` or `redirect` is required",
            )),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;
    use crate::routing::table::RouteMeta;

    fn route(path: &str, view: Option<&str>, redirect: Option<&str>) -> RouteConfig {
        RouteConfig {
            name: None,
            path: path.to_string(),
            view: view.map(str::to_string),
            redirect: redirect.map(str::to_string),
            meta: RouteMeta::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = AppConfig {
            routes: vec![
                route("/", Some("list"), None),
                route("/article/:id", Some("content"), None),
                route("*", None, Some("/")),
            ],
            ..AppConfig::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig {
            routes: vec![
                route("*", None, Some("/")),
                route("article", Some("content"), None),
                route("/both", Some("a"), Some("/b")),
                route("/named", Some("a"), None),
                route("/named2", Some("a"), None),
            ],
            ..AppConfig::default()
        };
        config.routes[3].name = Some("dup".into());
        config.routes[4].name = Some("dup".into());
        config.router.max_redirects = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();

        assert_eq!(
            fields,
            vec![
                "router.max_redirects",
                "routes[0].path",
                "routes[1].path",
                "routes[2].view",
                "routes[4].name",
            ]
        );
    }

    #[test]
    fn test_relative_redirect_rejected() {
        let config = AppConfig {
            routes: vec![route("*", None, Some("RobotTest"))],
            ..AppConfig::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "routes[0].redirect");
    }

    #[test]
    fn test_bad_base_url() {
        let mut config = AppConfig::default();
        config.http.base_url = Some("::nope".into());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "http.base_url");
    }

    #[test]
    fn test_bad_content_type() {
        let mut config = AppConfig::default();
        config.http.content_type = "text/plain\nx-injected: 1".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "http.content_type");
    }
}
