use std::convert::Infallible;
use std::future::{Ready, ready};
use std::task::{Context, Poll};

use askama::Template;

use crate::negotiation::{MediaType, negotiate};
use crate::request::RequestView;
use crate::responder::{
    or_error_response, render_json, render_xml, response_builder, write_body,
};
use crate::{Response, StatusCode};

const NOT_FOUND_MESSAGE: &str = "Not found";

/// Answers requests for which no route matched.
///
/// The response has status `404 Not Found` and a body in the format
/// negotiated from the `Accept` header:
///
/// * `application/json`: `{"message":"Not found"}`
/// * `application/xml` or `text/xml`: `<root><message>Not found</message></root>`
/// * anything else: an HTML page linking back to the site root (see
///   [`RequestView::home_url`])
///
/// `NotFoundResponder` also implements [`tower::Service`], so it can be used
/// directly as a router's fallback service.
///
/// # Examples
///
/// ```
/// use fallback::NotFoundResponder;
///
/// # fn main() -> fallback::Result<()> {
/// let request = http::Request::get("/missing")
///     .header("Accept", "text/xml")
///     .body(())
///     .unwrap();
///
/// let response = NotFoundResponder.handle(&request)?;
/// assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
/// assert_eq!(response.headers()["content-type"], "text/xml");
/// assert_eq!(
///     response.body().as_bytes(),
///     b"<root><message>Not found</message></root>"
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Copy, Clone, Default)]
pub struct NotFoundResponder;

impl NotFoundResponder {
    /// Builds the "not found" response for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the body could not be rendered or the response
    /// could not be assembled. Neither happens with the built-in bodies.
    pub fn handle<R: RequestView>(self, request: &R) -> crate::Result<Response> {
        let media_type = negotiate(&request.header_line(http::header::ACCEPT));
        let output = match media_type {
            MediaType::Json => render_json(NOT_FOUND_MESSAGE)?,
            MediaType::ApplicationXml | MediaType::TextXml => render_xml(NOT_FOUND_MESSAGE)?,
            // plain text is never negotiated
            MediaType::Html | MediaType::PlainText => NotFoundPage {
                home_url: &request.home_url(),
            }
            .render()?,
        };

        Ok(response_builder(StatusCode::NOT_FOUND, media_type).body(write_body(&output))?)
    }
}

impl<B> tower::Service<http::Request<B>> for NotFoundResponder {
    type Response = Response;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: http::Request<B>) -> Self::Future {
        ready(Ok(or_error_response(self.handle(&request))))
    }
}

#[derive(Debug, Template)]
#[template(
    ext = "html",
    source = r#"<html>
    <head>
        <title>Page Not Found</title>
        <style>
            body {
                margin: 0;
                padding: 30px;
                font: 12px/1.5 Helvetica, Arial, Verdana, sans-serif;
            }
            h1 {
                margin: 0;
                font-size: 48px;
                font-weight: normal;
                line-height: 48px;
            }
            strong {
                display: inline-block;
                width: 65px;
            }
        </style>
    </head>
    <body>
        <h1>Page Not Found</h1>
        <p>
            The page you are looking for could not be found. Check the address bar
            to ensure your URL is spelled correctly. If all else fails, you can
            visit our home page at the link below.
        </p>
        <a href='{{ home_url }}'>Visit the Home Page</a>
    </body>
</html>"#
)]
struct NotFoundPage<'a> {
    home_url: &'a str,
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    fn request(uri: &str, accept: Option<&str>) -> http::Request<()> {
        let mut builder = http::Request::get(uri);
        if let Some(accept) = accept {
            builder = builder.header(http::header::ACCEPT, accept);
        }
        builder.body(()).unwrap()
    }

    fn body_string(response: Response) -> String {
        String::from_utf8(response.into_body().into_bytes().to_vec()).unwrap()
    }

    #[test]
    fn not_found_json() {
        let response = NotFoundResponder
            .handle(&request("/missing", Some("application/json")))
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[http::header::CONTENT_TYPE],
            "application/json"
        );
        insta::assert_snapshot!(body_string(response), @r#"{"message":"Not found"}"#);
    }

    #[test]
    fn not_found_text_xml() {
        let response = NotFoundResponder
            .handle(&request("/missing", Some("text/xml")))
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[http::header::CONTENT_TYPE], "text/xml");
        assert_eq!(
            body_string(response),
            "<root><message>Not found</message></root>"
        );
    }

    #[test]
    fn not_found_application_xml() {
        let response = NotFoundResponder
            .handle(&request("/missing", Some("application/xml")))
            .unwrap();

        assert_eq!(
            response.headers()[http::header::CONTENT_TYPE],
            "application/xml"
        );
        assert_eq!(
            body_string(response),
            "<root><message>Not found</message></root>"
        );
    }

    #[test]
    fn not_found_html_links_to_origin() {
        let response = NotFoundResponder
            .handle(&request("https://example.com/a/b?x=1#f", None))
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[http::header::CONTENT_TYPE], "text/html");
        let body = body_string(response);
        assert!(body.contains("<title>Page Not Found</title>"));
        assert!(body.contains("<a href='https://example.com'>Visit the Home Page</a>"));
        assert!(!body.contains("/a/b"));
        assert!(!body.contains("x=1"));
        assert!(!body.contains("#f"));
        assert!(body.contains("width: 65px;"));
    }

    #[test]
    fn not_found_html_for_unrecognized_accept() {
        let response = NotFoundResponder
            .handle(&request("/missing", Some(" application/json")))
            .unwrap();

        assert_eq!(response.headers()[http::header::CONTENT_TYPE], "text/html");
        assert!(body_string(response).starts_with("<html>"));
    }

    #[test]
    fn not_found_html_uses_host_header() {
        let request = http::Request::get("/missing")
            .header(http::header::HOST, "example.com")
            .body(())
            .unwrap();

        let body = body_string(NotFoundResponder.handle(&request).unwrap());

        assert!(body.contains("<a href='http://example.com'>"));
    }

    #[test]
    fn not_found_with_request_parts() {
        let (parts, ()) = request("/missing", Some("application/json")).into_parts();

        let response = NotFoundResponder.handle(&parts).unwrap();

        assert_eq!(body_string(response), r#"{"message":"Not found"}"#);
    }

    #[tokio::test]
    async fn not_found_as_service() {
        let response = NotFoundResponder
            .oneshot(request("/missing", Some("text/html,application/json")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[http::header::CONTENT_TYPE], "text/html");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.starts_with(b"<html>"));
    }
}
