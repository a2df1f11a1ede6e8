//! Outcome taxonomy.
//!
//! # Responsibilities
//! - Enumerate every non-success response application code may signal
//! - Map each variant to exactly one status code and reason phrase
//! - Render the headers and body for each variant
//!
//! # Rendering Rules
//! ```text
//! Found / SeeOther      → Location: <message>          body ""
//! NotModified           → supplied cache validators    body ""
//! Unauthorized          → WWW-Authenticate: <message>  body ""
//! everything else       → Content-Type: text/plain     body "<code> <reason>: <message>"
//! ```
//!
//! # Design Decisions
//! - The set is closed; a new status needs a new variant
//! - Headers with an empty value are never emitted
//! - Reason phrases are fixed strings, not looked up at runtime

pub mod cache;
pub mod message;
mod response;

use std::fmt;

use bytes::Bytes;
use http::StatusCode;

use crate::gateway::{Body, Headers};

pub use cache::CacheHeaders;
pub use message::Message;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const LOCATION: &str = "Location";
pub const WWW_AUTHENTICATE: &str = "WWW-Authenticate";

/// Content type of every textual body this crate renders.
pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=UTF-8";

/// A deliberate decision to answer with a specific non-2xx response.
///
/// Created where application logic decides, consumed once by
/// [`OutcomeAdapter`](crate::adapter::OutcomeAdapter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 302, `Location` taken from the message.
    Found(Message),
    /// 303, `Location` taken from the message.
    SeeOther(Message),
    /// 304, echoes the supplied validators.
    NotModified(CacheHeaders),
    BadRequest(Message),
    /// 401, `WWW-Authenticate` challenge taken from the message.
    Unauthorized(Message),
    Forbidden(Message),
    NotFound(Message),
    NotAcceptable(Message),
    Conflict(Message),
    PreconditionFailed(Message),
    UnsupportedMediaType(Message),
}

impl Outcome {
    pub fn found(location: impl Into<Message>) -> Self {
        Self::Found(location.into())
    }

    pub fn see_other(location: impl Into<Message>) -> Self {
        Self::SeeOther(location.into())
    }

    pub fn not_modified(cache: CacheHeaders) -> Self {
        Self::NotModified(cache)
    }

    pub fn bad_request(message: impl Into<Message>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(challenge: impl Into<Message>) -> Self {
        Self::Unauthorized(challenge.into())
    }

    pub fn forbidden(message: impl Into<Message>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<Message>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn not_acceptable(message: impl Into<Message>) -> Self {
        Self::NotAcceptable(message.into())
    }

    pub fn conflict(message: impl Into<Message>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn precondition_failed(message: impl Into<Message>) -> Self {
        Self::PreconditionFailed(message.into())
    }

    pub fn unsupported_media_type(message: impl Into<Message>) -> Self {
        Self::UnsupportedMediaType(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Found(_) => StatusCode::FOUND,
            Self::SeeOther(_) => StatusCode::SEE_OTHER,
            Self::NotModified(_) => StatusCode::NOT_MODIFIED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::PreconditionFailed(_) => StatusCode::PRECONDITION_FAILED,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }

    pub fn code(&self) -> u16 {
        self.status().as_u16()
    }

    /// Standard reason phrase for this variant's status.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Found(_) => "Found",
            Self::SeeOther(_) => "See Other",
            Self::NotModified(_) => "Not Modified",
            Self::BadRequest(_) => "Bad Request",
            Self::Unauthorized(_) => "Unauthorized",
            Self::Forbidden(_) => "Forbidden",
            Self::NotFound(_) => "Not Found",
            Self::NotAcceptable(_) => "Not Acceptable",
            Self::Conflict(_) => "Conflict",
            Self::PreconditionFailed(_) => "Precondition Failed",
            Self::UnsupportedMediaType(_) => "Unsupported Media Type",
        }
    }

    /// `"<code> <reason>"`, e.g. `"404 Not Found"`.
    pub fn status_line(&self) -> String {
        self.to_string()
    }

    /// The message fragments, if this variant carries any.
    pub fn message(&self) -> Option<&Message> {
        match self {
            Self::NotModified(_) => None,
            Self::Found(m)
            | Self::SeeOther(m)
            | Self::BadRequest(m)
            | Self::Unauthorized(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::NotAcceptable(m)
            | Self::Conflict(m)
            | Self::PreconditionFailed(m)
            | Self::UnsupportedMediaType(m) => Some(m),
        }
    }

    /// True for variants whose body is always empty.
    pub fn is_bodiless(&self) -> bool {
        matches!(
            self,
            Self::Found(_) | Self::SeeOther(_) | Self::NotModified(_) | Self::Unauthorized(_)
        )
    }

    /// Response headers, without any entry whose value is empty.
    pub fn headers(&self) -> Headers {
        match self {
            Self::Found(location) | Self::SeeOther(location) => single(LOCATION, location.joined()),
            Self::Unauthorized(challenge) => single(WWW_AUTHENTICATE, challenge.joined()),
            Self::NotModified(cache) => cache.to_headers(),
            _ => single(CONTENT_TYPE, TEXT_PLAIN_UTF8.to_string()),
        }
    }

    /// Response body as a single UTF-8 chunk.
    pub fn body(&self) -> Body {
        vec![Bytes::from(self.body_text())]
    }

    /// Body text before byte encoding.
    pub fn body_text(&self) -> String {
        match self.message() {
            _ if self.is_bodiless() => String::new(),
            Some(message) if !message.is_empty() => {
                format!("{}: {}", self.status_line(), message.joined())
            }
            _ => self.status_line(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

impl std::error::Error for Outcome {}

fn single(name: &str, value: String) -> Headers {
    if value.is_empty() {
        Vec::new()
    } else {
        vec![(name.to_string(), value)]
    }
}
