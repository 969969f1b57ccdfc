use std::convert::Infallible;
use std::future::{Ready, ready};
use std::sync::Arc;
use std::task::{Context, Poll};

use askama::Template;

use crate::methods::AllowedMethods;
use crate::negotiation::{MediaType, negotiate};
use crate::request::RequestView;
use crate::responder::{
    or_error_response, render_json, render_xml, response_builder, write_body,
};
use crate::{Method, Response, StatusCode};

/// Answers requests whose path matched but whose method did not.
///
/// For an `OPTIONS` request the response is `200 OK` with a `text/plain`
/// body listing the allowed methods. For any other method it is
/// `405 Method Not Allowed` with a body negotiated from the `Accept` header
/// (JSON, XML, or an HTML page). The `Allow` header is set in both cases.
///
/// # Examples
///
/// ```
/// use fallback::{AllowedMethods, Method, MethodNotAllowedResponder};
///
/// # fn main() -> fallback::Result<()> {
/// let request = http::Request::post("/articles")
///     .header("Accept", "application/json")
///     .body(())
///     .unwrap();
/// let allowed = AllowedMethods::from([Method::GET, Method::HEAD]);
///
/// let response = MethodNotAllowedResponder.handle(&request, &allowed)?;
/// assert_eq!(response.status(), http::StatusCode::METHOD_NOT_ALLOWED);
/// assert_eq!(response.headers()["allow"], "GET, HEAD");
/// assert_eq!(
///     response.body().as_bytes(),
///     br#"{"message":"Method not allowed. Must be one of: GET, HEAD"}"#
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Copy, Clone, Default)]
pub struct MethodNotAllowedResponder;

impl MethodNotAllowedResponder {
    /// Builds the response for `request`, advertising `allowed` as the
    /// methods the resource accepts.
    ///
    /// # Errors
    ///
    /// Returns an error if the body could not be rendered or the response
    /// could not be assembled. Neither happens with the built-in bodies.
    pub fn handle<R: RequestView>(
        self,
        request: &R,
        allowed: &AllowedMethods,
    ) -> crate::Result<Response> {
        let (status, media_type, output) = if *request.method() == Method::OPTIONS {
            (
                StatusCode::OK,
                MediaType::PlainText,
                format!("Allowed methods: {allowed}"),
            )
        } else {
            let media_type = negotiate(&request.header_line(http::header::ACCEPT));
            let message = format!("Method not allowed. Must be one of: {allowed}");
            let output = match media_type {
                MediaType::Json => render_json(&message)?,
                MediaType::ApplicationXml | MediaType::TextXml => render_xml(&message)?,
                // plain text is never negotiated
                MediaType::Html | MediaType::PlainText => {
                    MethodNotAllowedPage { allowed }.render()?
                }
            };
            (StatusCode::METHOD_NOT_ALLOWED, media_type, output)
        };

        Ok(response_builder(status, media_type)
            .header(http::header::ALLOW, allowed.header_value()?)
            .body(write_body(&output))?)
    }

    /// Returns a [`tower::Service`] answering every request with this
    /// responder and a fixed set of allowed methods.
    ///
    /// # Examples
    ///
    /// ```
    /// use fallback::{Method, MethodNotAllowedResponder};
    /// use tower::ServiceExt;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let service = MethodNotAllowedResponder.service([Method::GET]);
    /// let request = http::Request::delete("/").body(()).unwrap();
    ///
    /// let response = service.oneshot(request).await.unwrap();
    /// assert_eq!(response.status(), http::StatusCode::METHOD_NOT_ALLOWED);
    /// # }
    /// ```
    #[must_use]
    pub fn service(self, allowed: impl Into<AllowedMethods>) -> MethodNotAllowedService {
        MethodNotAllowedService {
            responder: self,
            allowed: Arc::new(allowed.into()),
        }
    }
}

/// A [`tower::Service`] wrapping a [`MethodNotAllowedResponder`] together with
/// the methods it advertises.
///
/// Created with [`MethodNotAllowedResponder::service`].
#[derive(Debug, Clone)]
pub struct MethodNotAllowedService {
    responder: MethodNotAllowedResponder,
    allowed: Arc<AllowedMethods>,
}

impl MethodNotAllowedService {
    /// Returns the methods advertised in the `Allow` header.
    #[must_use]
    pub fn allowed(&self) -> &AllowedMethods {
        &self.allowed
    }
}

impl<B> tower::Service<http::Request<B>> for MethodNotAllowedService {
    type Response = Response;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: http::Request<B>) -> Self::Future {
        ready(Ok(or_error_response(
            self.responder.handle(&request, &self.allowed),
        )))
    }
}

#[derive(Debug, Template)]
#[template(
    ext = "html",
    source = r#"<html>
    <head>
        <title>Method not allowed</title>
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
        </style>
    </head>
    <body>
        <h1>Method not allowed</h1>
        <p>Method not allowed. Must be one of: <strong>{{ allowed|safe }}</strong></p>
    </body>
</html>"#
)]
struct MethodNotAllowedPage<'a> {
    allowed: &'a AllowedMethods,
}
