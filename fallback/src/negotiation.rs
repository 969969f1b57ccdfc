//! Response content type negotiation.
//!
//! The negotiation is deliberately simple: the `Accept` header is split on
//! commas and the first token that is byte-for-byte equal to one of the
//! recognized media types wins. Tokens are not trimmed, and neither quality
//! weights (`;q=0.8`) nor wildcards (`*/*`) are understood. When nothing
//! matches, HTML is used.
//!
//! # Examples
//!
//! ```
//! use fallback::MediaType;
//! use fallback::negotiation::negotiate;
//!
//! assert_eq!(negotiate("text/xml,application/json"), MediaType::TextXml);
//! assert_eq!(negotiate("application/json;q=0.9"), MediaType::Html);
//! assert_eq!(negotiate(""), MediaType::Html);
//! ```

use std::fmt;

use tracing::debug;

use crate::headers::{
    APPLICATION_XML_CONTENT_TYPE, HTML_CONTENT_TYPE, JSON_CONTENT_TYPE, PLAIN_TEXT_CONTENT_TYPE,
    TEXT_XML_CONTENT_TYPE,
};

/// A media type a fallback response body can be rendered in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// `application/json`
    Json,
    /// `application/xml`
    ApplicationXml,
    /// `text/xml`
    TextXml,
    /// `text/html`
    Html,
    /// `text/plain`
    ///
    /// Never chosen by [`negotiate`]; used for the answer to `OPTIONS`
    /// requests.
    PlainText,
}

impl MediaType {
    /// The media types [`negotiate`] recognizes, in priority order.
    pub const NEGOTIABLE: [MediaType; 4] = [
        MediaType::Json,
        MediaType::ApplicationXml,
        MediaType::TextXml,
        MediaType::Html,
    ];

    /// Returns the media type as it appears in a `Content-Type` header.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => JSON_CONTENT_TYPE,
            Self::ApplicationXml => APPLICATION_XML_CONTENT_TYPE,
            Self::TextXml => TEXT_XML_CONTENT_TYPE,
            Self::Html => HTML_CONTENT_TYPE,
            Self::PlainText => PLAIN_TEXT_CONTENT_TYPE,
        }
    }

    /// Returns `true` for both XML flavors.
    #[must_use]
    pub const fn is_xml(self) -> bool {
        matches!(self, Self::ApplicationXml | Self::TextXml)
    }

    /// Looks up a negotiable media type by its exact name.
    ///
    /// # Examples
    ///
    /// ```
    /// use fallback::MediaType;
    ///
    /// assert_eq!(MediaType::from_exact("text/html"), Some(MediaType::Html));
    /// assert_eq!(MediaType::from_exact(" text/html"), None);
    /// assert_eq!(MediaType::from_exact("text/plain"), None);
    /// ```
    #[must_use]
    pub fn from_exact(token: &str) -> Option<Self> {
        Self::NEGOTIABLE
            .into_iter()
            .find(|media_type| media_type.as_str() == token)
    }

    pub(crate) fn header_value(self) -> http::HeaderValue {
        http::HeaderValue::from_static(self.as_str())
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the response media type for a raw `Accept` header value.
///
/// Returns the first comma-separated token of `accept` that exactly matches
/// one of [`MediaType::NEGOTIABLE`], or [`MediaType::Html`] if none does.
#[must_use]
pub fn negotiate(accept: &str) -> MediaType {
    let media_type = accept
        .split(',')
        .find_map(MediaType::from_exact)
        .unwrap_or(MediaType::Html);
    debug!(accept, content_type = %media_type, "negotiated response content type");
    media_type
}
