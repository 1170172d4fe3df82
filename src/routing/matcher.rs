//! Path pattern matching.
//!
//! # Responsibilities
//! - Parse route patterns (`/article/:id`, `*`) into segments
//! - Match a navigation path against a pattern, binding named segments
//! - Render a pattern back into a concrete path (reverse routing)
//!
//! # Design Decisions
//! - Static segments are compared exactly (case-sensitive)
//! - Segment counts must be equal; no optional or repeated segments
//! - Empty segments are ignored, so `/article/42/` equals `/article/42`
//! - No regex to guarantee O(n) matching

use std::collections::BTreeMap;
use std::fmt;

use crate::routing::error::TableError;

/// Parameters bound by named segments, keyed by name.
pub type PathParams = BTreeMap<String, String>;

/// Marker that introduces a named segment.
const PARAM_MARKER: char = ':';

/// A single pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment exactly.
    Static(String),
    /// Binds the path segment to the given name.
    Param(String),
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// The `*` fallback. Never matched structurally.
    CatchAll,
    Segments(Vec<Segment>),
}

impl PathPattern {
    /// Parse a pattern string.
    pub fn parse(pattern: &str) -> Result<Self, TableError> {
        let invalid = |reason: &str| TableError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if pattern == "*" {
            return Ok(Self::CatchAll);
        }
        if !pattern.starts_with('/') {
            return Err(invalid("pattern must start with '/'"));
        }

        let mut segments = Vec::new();
        for raw in split_segments(pattern) {
            match raw.strip_prefix(PARAM_MARKER) {
                Some("") => return Err(invalid("empty parameter name")),
                Some(name) => {
                    let duplicate = segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                    if duplicate {
                        return Err(invalid(&format!("parameter ':{}' bound twice", name)));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Static(raw.to_string())),
            }
        }

        Ok(Self::Segments(segments))
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self, Self::CatchAll)
    }

    /// Match a path, returning the bound parameters on success.
    ///
    /// `CatchAll` never matches here; fallback selection is the table's job.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let Self::Segments(pattern) = self else {
            return None;
        };

        let actual: Vec<&str> = split_segments(path).collect();
        if actual.len() != pattern.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, value) in pattern.iter().zip(actual) {
            match segment {
                Segment::Static(expected) if expected == value => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), decode_segment(value));
                }
            }
        }
        Some(params)
    }

    /// Names of the parameters this pattern binds, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        let segments: &[Segment] = match self {
            Self::CatchAll => &[],
            Self::Segments(segments) => segments,
        };
        segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Build a concrete path by substituting `params` into the pattern.
    ///
    /// Returns the name of the first missing parameter on failure.
    pub fn render(&self, params: &PathParams) -> Result<String, String> {
        let Self::Segments(segments) = self else {
            return Ok("*".to_string());
        };

        let mut path = String::new();
        for segment in segments {
            path.push('/');
            match segment {
                Segment::Static(s) => path.push_str(s),
                Segment::Param(name) => {
                    let value = params.get(name).ok_or_else(|| name.clone())?;
                    path.push_str(&urlencoding::encode(value));
                }
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CatchAll => write!(f, "*"),
            Self::Segments(segments) if segments.is_empty() => write!(f, "/"),
            Self::Segments(segments) => {
                for segment in segments {
                    match segment {
                        Segment::Static(s) => write!(f, "/{}", s)?,
                        Segment::Param(name) => write!(f, "/{}{}", PARAM_MARKER, name)?,
                    }
                }
                Ok(())
            }
        }
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Percent-decode a bound segment. Values that do not decode to UTF-8 are kept raw.
fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_pattern() {
        let pattern = PathPattern::parse("/RobotTest").unwrap();

        assert_eq!(pattern.matches("/RobotTest"), Some(PathParams::new()));
        assert_eq!(pattern.matches("/RobotTest/"), Some(PathParams::new()));
        assert!(pattern.matches("/robottest").is_none()); // Case sensitive
        assert!(pattern.matches("/RobotTest/extra").is_none());
    }

    #[test]
    fn test_root_pattern() {
        let pattern = PathPattern::parse("/").unwrap();

        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("").is_some());
        assert!(pattern.matches("/article").is_none());
        assert_eq!(pattern.to_string(), "/");
    }

    #[test]
    fn test_param_binding() {
        let pattern = PathPattern::parse("/article/:id").unwrap();

        let params = pattern.matches("/article/42").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));

        assert!(pattern.matches("/article").is_none());
        assert!(pattern.matches("/post/42").is_none());
    }

    #[test]
    fn test_param_values_are_percent_decoded() {
        let pattern = PathPattern::parse("/article/:id").unwrap();

        let params = pattern.matches("/article/hello%20world").unwrap();
        assert_eq!(params["id"], "hello world");

        let params = pattern.matches("/article/%FF").unwrap();
        assert_eq!(params["id"], "%FF");

        let mut params = PathParams::new();
        params.insert("id".into(), "hello world".into());
        let path = pattern.render(&params).unwrap();
        assert_eq!(path, "/article/hello%20world");
        assert_eq!(pattern.matches(&path).unwrap()["id"], "hello world");
    }

    #[test]
    fn test_multiple_params() {
        let pattern = PathPattern::parse("/list/:type/:page").unwrap();
        let params = pattern.matches("/list/rust/3").unwrap();

        assert_eq!(params["type"], "rust");
        assert_eq!(params["page"], "3");
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["type", "page"]);
    }

    #[test]
    fn test_catch_all_never_matches_structurally() {
        let pattern = PathPattern::parse("*").unwrap();
        assert!(pattern.is_catch_all());
        assert!(pattern.matches("/anything").is_none());
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(
            PathPattern::parse("article"),
            Err(TableError::InvalidPattern { .. })
        ));
        assert!(PathPattern::parse("/article/:").is_err());
        assert!(PathPattern::parse("/a/:id/b/:id").is_err());
    }

    #[test]
    fn test_render() {
        let pattern = PathPattern::parse("/article/:id").unwrap();
        let mut params = PathParams::new();

        assert_eq!(pattern.render(&params), Err("id".to_string()));

        params.insert("id".into(), "7".into());
        assert_eq!(pattern.render(&params).unwrap(), "/article/7");
        assert_eq!(PathPattern::parse("/").unwrap().render(&params).unwrap(), "/");
    }
}
