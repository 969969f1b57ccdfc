//! Error type used by the responders.
//!
//! The responders cannot fail for well-formed input, but rendering a template
//! and assembling an [`http::Response`] are fallible operations in the type
//! system. Those failures are funneled into a single opaque [`Error`] carrying
//! the HTTP status code that should be reported to the client.

use std::error::Error as StdError;
use std::fmt::Display;

use derive_more::with_trait::Debug;

use crate::body::Body;
use crate::headers::PLAIN_TEXT_CONTENT_TYPE;
use crate::{Response, StatusCode};

/// An error that can occur while building a fallback response.
pub struct Error {
    inner: Box<ErrorImpl>,
}

impl Error {
    /// Create a new error with a custom error message or error type.
    ///
    /// The error will be associated with a 500 Internal Server Error
    /// status code.
    ///
    /// # Examples
    ///
    /// ```
    /// use fallback::{Error, StatusCode};
    ///
    /// let error = Error::internal("template went missing");
    /// assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    /// ```
    #[must_use]
    pub fn internal<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        Self::with_status(error, StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Create a new error with a custom error message or error type and a
    /// specific HTTP status code.
    ///
    /// # Examples
    ///
    /// ```
    /// use fallback::{Error, StatusCode};
    ///
    /// let error = Error::with_status("Invalid input", StatusCode::BAD_REQUEST);
    /// assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    /// ```
    #[must_use]
    pub fn with_status<E>(error: E, status_code: StatusCode) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        Self {
            inner: Box::new(ErrorImpl {
                inner: error.into(),
                status_code,
            }),
        }
    }

    /// Returns the HTTP status code associated with this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.inner.status_code
    }

    /// Turns the error into a minimal `text/plain` response.
    ///
    /// This is what the [`tower::Service`] implementations of the responders
    /// send when they fail to build their regular response.
    ///
    /// # Examples
    ///
    /// ```
    /// use fallback::{Error, StatusCode};
    ///
    /// let response = Error::internal("boom").to_response();
    /// assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    /// assert_eq!(response.body().as_bytes(), b"boom");
    /// ```
    #[must_use]
    pub fn to_response(&self) -> Response {
        let mut body = Body::empty();
        body.write(&self.to_string());

        let mut response = Response::new(body);
        *response.status_mut() = self.status_code();
        response.headers_mut().insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static(PLAIN_TEXT_CONTENT_TYPE),
        );
        response
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.inner, f)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner.inner, f)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.inner.source()
    }
}

#[derive(Debug)]
struct ErrorImpl {
    inner: Box<dyn StdError + Send + Sync>,
    status_code: StatusCode,
}

macro_rules! impl_into_fallback_error {
    ($error_ty:ty) => {
        impl From<$error_ty> for $crate::Error {
            fn from(err: $error_ty) -> Self {
                $crate::Error::internal(err)
            }
        }
    };
}

#[derive(Debug, thiserror::Error)]
#[error("failed to render the response body: {0}")]
struct TemplateRender(#[from] askama::Error);
impl_into_fallback_error!(TemplateRender);
impl From<askama::Error> for Error {
    fn from(err: askama::Error) -> Self {
        Error::from(TemplateRender(err))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to serialize the response body: {0}")]
struct JsonSerialize(#[from] serde_json::Error);
impl_into_fallback_error!(JsonSerialize);
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::from(JsonSerialize(err))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to build the response: {0}")]
struct ResponseBuild(#[from] http::Error);
impl_into_fallback_error!(ResponseBuild);
impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Error::from(ResponseBuild(err))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid header value: {0}")]
struct InvalidHeader(#[from] http::header::InvalidHeaderValue);
impl_into_fallback_error!(InvalidHeader);
impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Error::from(InvalidHeader(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_internal_has_500_status() {
        let error = Error::internal("something broke");

        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.to_string(), "something broke");
    }

    #[test]
    fn error_with_status() {
        let error = Error::with_status("nope", StatusCode::BAD_REQUEST);

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_from_invalid_header_value() {
        let source = http::HeaderValue::from_str("bad\nvalue").unwrap_err();
        let error = Error::from(source);

        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.to_string().starts_with("invalid header value"));
    }

    #[test]
    fn error_from_http_error() {
        let source = http::Response::builder()
            .status(1000)
            .body(())
            .unwrap_err();
        let error = Error::from(source);

        assert!(error.to_string().starts_with("failed to build the response"));
    }

    #[test]
    fn error_to_response() {
        let response = Error::with_status("teapot", StatusCode::IM_A_TEAPOT).to_response();

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(
            response.headers()[http::header::CONTENT_TYPE],
            PLAIN_TEXT_CONTENT_TYPE
        );
        assert_eq!(response.body().as_bytes(), b"teapot");
    }
}
