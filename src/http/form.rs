//! Form encoding of request parameters.
//!
//! # Responsibilities
//! - Hold request parameters as an ordered key → primitive mapping
//! - Serialize them as `key=value` pairs joined by `&`
//! - Decode encoded pairs (query strings, bodies)
//!
//! # Design Decisions
//! - Keys and values are percent-encoded the way `encodeURIComponent` does
//!   it: space becomes `%20`, never `+`
//! - Empty params encode to an empty string
//! - Only flat objects of primitives are accepted from `Serialize` values

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::http::error::{RequestError, RequestResult};

/// A primitive parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Int(i)
    }
}

impl From<i32> for ParamValue {
    fn from(i: i32) -> Self {
        ParamValue::Int(i.into())
    }
}

impl From<u32> for ParamValue {
    fn from(i: u32) -> Self {
        ParamValue::Int(i.into())
    }
}

impl From<f64> for ParamValue {
    fn from(x: f64) -> Self {
        ParamValue::Float(x)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

/// Ordered request parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    pairs: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Builder-style [`Params::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Convert a serializable value that forms a flat object.
    ///
    /// `null` fields are skipped. Nested arrays or objects are rejected.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> RequestResult<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| RequestError::Serialization(e.to_string()))?;

        let Value::Object(map) = value else {
            return Err(RequestError::Serialization(
                "parameters must serialize to an object".to_string(),
            ));
        };

        let mut params = Params::new();
        for (key, value) in map {
            let value = match value {
                Value::Null => continue,
                Value::String(s) => ParamValue::Str(s),
                Value::Bool(b) => ParamValue::Bool(b),
                Value::Number(n) => match n.as_i64() {
                    Some(i) => ParamValue::Int(i),
                    None => ParamValue::Float(n.as_f64().unwrap_or(f64::NAN)),
                },
                Value::Array(_) | Value::Object(_) => {
                    return Err(RequestError::Serialization(format!(
                        "parameter '{}' is not a primitive",
                        key
                    )))
                }
            };
            params.insert(key, value);
        }
        Ok(params)
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encode as `k1=v1&k2=v2`.
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(&v.to_string())))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Percent-encode a single key or value.
pub fn encode_component(input: &str) -> String {
    // byte_serialize writes space as '+' and a literal '+' as "%2B", so
    // every remaining '+' stands for a space.
    form_urlencoded::byte_serialize(input.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Decode `k=v&...` pairs. Accepts both `%20` and `+` for spaces.
pub fn decode(encoded: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(encoded.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
