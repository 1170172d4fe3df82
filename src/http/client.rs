//! Request facade over `reqwest`.
//!
//! # Responsibilities
//! - Expose `get`/`post`/`put`/`delete` with one callback shape
//! - Place parameters by method: query for GET/DELETE, form body for POST/PUT
//! - Apply process-wide defaults (credentials, content type, base URL)
//! - Deliver exactly one result per call, never panicking on failure
//!
//! # Design Decisions
//! - No retries, no timeout policy: one round trip per call
//! - Non-2xx statuses are errors, carrying the response body
//! - Failures are returned to the caller, not logged here

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use url::Url;

use crate::config::schema::HttpConfig;
use crate::http::error::{RequestError, RequestResult};
use crate::http::form::Params;
use crate::observability::metrics;

/// Supported request methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Where a method carries its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Query,
    Body,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Parameter placement is decided by the method alone.
    pub fn placement(&self) -> Placement {
        match self {
            Method::Post | Method::Put => Placement::Body,
            Method::Get | Method::Delete => Placement::Query,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            other => Err(format!("unsupported method '{}'", other)),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One request, consumed by [`ApiClient::send`].
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    pub params: Params,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: impl Into<String>, params: Params) -> Self {
        Self {
            method,
            url: url.into(),
            params,
        }
    }
}

/// A successful (2xx) response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    /// Final URL after redirects.
    pub url: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl ApiResponse {
    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> RequestResult<T> {
        serde_json::from_str(&self.body).map_err(|e| RequestError::Serialization(e.to_string()))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Shared HTTP client with process-wide defaults.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Option<Url>,
    content_type: HeaderValue,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &HttpConfig) -> RequestResult<Self> {
        let content_type = HeaderValue::from_str(&config.content_type).map_err(|e| {
            RequestError::InvalidHeader {
                name: CONTENT_TYPE.to_string(),
                reason: e.to_string(),
            }
        })?;

        let base_url = config
            .base_url
            .as_deref()
            .map(parse_base_url)
            .transpose()?;

        let mut builder = reqwest::Client::builder().cookie_store(config.with_credentials);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url,
            content_type,
        })
    }

    /// Send a request and return its result.
    pub async fn send(&self, request: RequestDescriptor) -> RequestResult<ApiResponse> {
        let started = Instant::now();
        let method = request.method;

        let result = self.execute(request).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(RequestError::Status { .. }) => "status",
            Err(RequestError::Transport(_)) => "transport",
            Err(RequestError::Serialization(_)) => "serialization",
            Err(RequestError::InvalidUrl { .. }) => "invalid_url",
            Err(RequestError::InvalidHeader { .. }) => "invalid_header",
        };
        metrics::record_request(method.as_str(), outcome, started.elapsed());

        result
    }

    /// Send a request and hand the result to `callback` exactly once.
    pub async fn invoke<F>(&self, method: Method, url: &str, params: Params, callback: F)
    where
        F: FnOnce(RequestResult<ApiResponse>),
    {
        let result = self.send(RequestDescriptor::new(method, url, params)).await;
        callback(result);
    }

    pub async fn get<F>(&self, url: &str, params: Params, callback: F)
    where
        F: FnOnce(RequestResult<ApiResponse>),
    {
        self.invoke(Method::Get, url, params, callback).await
    }

    pub async fn post<F>(&self, url: &str, params: Params, callback: F)
    where
        F: FnOnce(RequestResult<ApiResponse>),
    {
        self.invoke(Method::Post, url, params, callback).await
    }

    pub async fn put<F>(&self, url: &str, params: Params, callback: F)
    where
        F: FnOnce(RequestResult<ApiResponse>),
    {
        self.invoke(Method::Put, url, params, callback).await
    }

    pub async fn delete<F>(&self, url: &str, params: Params, callback: F)
    where
        F: FnOnce(RequestResult<ApiResponse>),
    {
        self.invoke(Method::Delete, url, params, callback).await
    }

    /// Fire-and-forget variant of [`ApiClient::invoke`]: returns at once and
    /// runs `callback` on completion.
    pub fn dispatch<F>(&self, request: RequestDescriptor, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(RequestResult<ApiResponse>) + Send + 'static,
    {
        let client = self.clone();
        tokio::spawn(async move {
            let result = client.send(request).await;
            callback(result);
        })
    }

    /// Resolve `url` against the base URL, if one is configured.
    pub fn resolve_url(&self, url: &str) -> RequestResult<Url> {
        let parsed = match &self.base_url {
            Some(base) => base.join(url),
            None => Url::parse(url),
        };
        parsed.map_err(|e| RequestError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    async fn execute(&self, request: RequestDescriptor) -> RequestResult<ApiResponse> {
        let mut url = self.resolve_url(&request.url)?;
        let encoded = request.params.encode();

        let builder = match request.method.placement() {
            Placement::Query => {
                if !encoded.is_empty() {
                    let query = match url.query() {
                        Some(existing) if !existing.is_empty() => {
                            format!("{}&{}", existing, encoded)
                        }
                        _ => encoded,
                    };
                    url.set_query(Some(&query));
                }
                self.client.request(request.method.into(), url)
            }
            Placement::Body => self
                .client
                .request(request.method.into(), url)
                .header(CONTENT_TYPE, self.content_type.clone())
                .body(encoded),
        };

        tracing::debug!(method = %request.method, url = %request.url, "Dispatching request");
        let response = builder.send().await?;

        let status = response.status();
        let final_url = response.url().to_string();
        let headers = response.headers().clone();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RequestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            url: final_url,
            headers,
            body,
        })
    }
}

/// Parse a base URL, making sure relative joins keep its last path segment.
fn parse_base_url(raw: &str) -> RequestResult<Url> {
    let mut url = Url::parse(raw).map_err(|e| RequestError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
