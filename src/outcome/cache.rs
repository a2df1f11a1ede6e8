//! Validator and caching headers echoed by a 304 response.
//!
//! A 304 must carry the same `ETag`, `Vary`, `Cache-Control`,
//! `Content-Location`, `Last-Modified` and `Expires` a 200 for the same
//! resource would have carried. Nothing else is allowed through.

use crate::gateway::Headers;

pub const ETAG: &str = "ETag";
pub const VARY: &str = "Vary";
pub const CACHE_CONTROL: &str = "Cache-Control";
pub const LAST_MODIFIED: &str = "Last-Modified";
pub const CONTENT_LOCATION: &str = "Content-Location";
pub const EXPIRES: &str = "Expires";

/// The six optional headers of a "not modified" outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheHeaders {
    pub etag: Option<String>,
    pub vary: Option<String>,
    pub cache_control: Option<String>,
    pub last_modified: Option<String>,
    pub content_location: Option<String>,
    pub expires: Option<String>,
}

impl CacheHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revalidation by entity tag alone.
    pub fn from_etag(etag: impl Into<String>) -> Self {
        Self::new().etag(etag)
    }

    pub fn etag(mut self, value: impl Into<String>) -> Self {
        self.etag = Some(value.into());
        self
    }

    pub fn vary(mut self, value: impl Into<String>) -> Self {
        self.vary = Some(value.into());
        self
    }

    pub fn cache_control(mut self, value: impl Into<String>) -> Self {
        self.cache_control = Some(value.into());
        self
    }

    pub fn last_modified(mut self, value: impl Into<String>) -> Self {
        self.last_modified = Some(value.into());
        self
    }

    pub fn content_location(mut self, value: impl Into<String>) -> Self {
        self.content_location = Some(value.into());
        self
    }

    pub fn expires(mut self, value: impl Into<String>) -> Self {
        self.expires = Some(value.into());
        self
    }

    /// Name/value pairs for every field that holds a non-empty value.
    pub fn to_headers(&self) -> Headers {
        [
            (ETAG, &self.etag),
            (VARY, &self.vary),
            (CACHE_CONTROL, &self.cache_control),
            (LAST_MODIFIED, &self.last_modified),
            (CONTENT_LOCATION, &self.content_location),
            (EXPIRES, &self.expires),
        ]
        .into_iter()
        .filter_map(|(name, value)| match value.as_deref() {
            Some(v) if !v.is_empty() => Some((name.to_string(), v.to_string())),
            _ => None,
        })
        .collect()
    }
}
