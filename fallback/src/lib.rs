//! Content-negotiated fallback responders for HTTP services.
//!
//! This crate provides two canned responders that a router can call when it
//! fails to dispatch a request:
//!
//! * [`NotFoundResponder`] answers with `404 Not Found`,
//! * [`MethodNotAllowedResponder`] answers with `405 Method Not Allowed` (or
//!   `200 OK` for an `OPTIONS` probe) and always sets the `Allow` header.
//!
//! Both pick the body format (JSON, XML or HTML) from the request's `Accept`
//! header. See [`negotiation`] for the exact matching rules.
//!
//! # Examples
//!
//! ```
//! use fallback::{AllowedMethods, Method, MethodNotAllowedResponder, NotFoundResponder};
//!
//! # fn main() -> fallback::Result<()> {
//! let request = http::Request::builder()
//!     .uri("https://example.com/missing")
//!     .header(http::header::ACCEPT, "application/json")
//!     .body(())
//!     .unwrap();
//!
//! let response = NotFoundResponder.handle(&request)?;
//! assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
//! assert_eq!(response.into_body().as_bytes(), br#"{"message":"Not found"}"#);
//!
//! let allowed = AllowedMethods::from([Method::GET, Method::HEAD]);
//! let response = MethodNotAllowedResponder.handle(&request, &allowed)?;
//! assert_eq!(response.headers()[http::header::ALLOW], "GET, HEAD");
//! # Ok(())
//! # }
//! ```

pub mod body;
pub mod error;
mod headers;
pub mod methods;
pub mod negotiation;
pub mod request;
pub mod responder;

pub use crate::body::Body;
pub use crate::error::Error;
pub use crate::methods::AllowedMethods;
pub use crate::negotiation::MediaType;
pub use crate::request::RequestView;
#[doc(inline)]
pub use crate::responder::{MethodNotAllowedResponder, MethodNotAllowedService, NotFoundResponder};

/// A type alias for a result that can return a [`fallback::Error`](Error).
pub type Result<T> = std::result::Result<T, Error>;

/// A type alias for an HTTP status code.
pub type StatusCode = http::StatusCode;

/// A type alias for an HTTP method.
pub type Method = http::Method;

/// A type alias for the responses built by this crate.
pub type Response = http::Response<Body>;
