//! The "not found" and "method not allowed" responders.
//!
//! Both responders are stateless unit structs. They can be called directly
//! with a request, or used as a [`tower::Service`] (for instance as an `axum`
//! fallback service).

mod method_not_allowed;
mod not_found;

use askama::Template;
use serde::Serialize;
use tracing::{error, trace};

pub use method_not_allowed::{MethodNotAllowedResponder, MethodNotAllowedService};
pub use not_found::NotFoundResponder;

use crate::negotiation::MediaType;
use crate::{Body, Response, StatusCode};

#[derive(Debug, Serialize)]
struct JsonMessage<'a> {
    message: &'a str,
}

#[derive(Debug, Template)]
#[template(source = "<root><message>{{ message|safe }}</message></root>", ext = "xml")]
struct XmlMessage<'a> {
    message: &'a str,
}

fn render_json(message: &str) -> crate::Result<String> {
    Ok(serde_json::to_string(&JsonMessage { message })?)
}

fn render_xml(message: &str) -> crate::Result<String> {
    Ok(XmlMessage { message }.render()?)
}

fn write_body(output: &str) -> Body {
    let mut body = Body::empty();
    body.write(output);
    body
}

fn response_builder(status: StatusCode, media_type: MediaType) -> http::response::Builder {
    trace!(%status, content_type = %media_type, "building fallback response");
    http::Response::builder()
        .status(status)
        .header(http::header::CONTENT_TYPE, media_type.header_value())
}

/// Unwraps the result of a responder, replacing an error with a plain text
/// response.
fn or_error_response(result: crate::Result<Response>) -> Response {
    result.unwrap_or_else(|error| {
        error!(%error, "failed to build fallback response");
        error.to_response()
    })
}
