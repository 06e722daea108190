//! REST request description

use crate::client::ClientError;
use regex::Regex;
use reqwest::Url;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// HTTP method accepted by the H2O REST API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl FromStr for Method {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            other => Err(ClientError::InvalidEndpoint(other.to_string())),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

fn endpoint_regex() -> &'static Regex {
    static ENDPOINT: OnceLock<Regex> = OnceLock::new();
    ENDPOINT.get_or_init(|| Regex::new(r"^([A-Z]+) (/\S*)$").expect("endpoint regex is valid"))
}

/// Percent-encode a single path segment (`/`, `?`, `#`, ... are escaped)
fn encode_segment(segment: &str) -> String {
    let mut url = Url::parse("http://h2o/").expect("valid placeholder url");
    if let Ok(mut segs) = url.path_segments_mut() {
        segs.pop_if_empty().push(segment);
    }
    url.path().trim_start_matches('/').to_string()
}

/// A single request against the server, e.g. `POST /99/Assembly`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,

    /// Path relative to the server root, always starting with `/`, with
    /// every segment already percent-encoded
    pub path: String,

    /// Form parameters, sent url-encoded in the body (or the query for GET)
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    /// Parse an endpoint written as `"<METHOD> /path"`
    pub fn parse(endpoint: &str) -> Result<Self, ClientError> {
        let caps = endpoint_regex()
            .captures(endpoint.trim())
            .ok_or_else(|| ClientError::InvalidEndpoint(endpoint.to_string()))?;

        Ok(Self {
            method: caps[1].parse()?,
            path: caps[2].trim_end_matches('/').to_string(),
            params: Vec::new(),
        })
    }

    /// Append a path segment such as a frame key or a POJO name
    pub fn segment(mut self, segment: impl AsRef<str>) -> Self {
        self.path.push('/');
        self.path.push_str(&encode_segment(segment.as_ref()));
        self
    }

    /// Add a form parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Look up a form parameter by name
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method.as_str(), self.path)
    }
}
