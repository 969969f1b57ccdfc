//! Read-only view of the request being answered.

use http::header::AsHeaderName;
use http::{HeaderMap, Uri};

use crate::Method;

mod private {
    pub trait Sealed {}
}

/// The parts of a request the responders look at.
///
/// Implemented for [`http::Request`] with any body type and for
/// [`http::request::Parts`], so the responders can be called both before and
/// after the body has been split off.
///
/// # Sealed
///
/// This trait is sealed since the responders only ever need what `http`
/// provides.
pub trait RequestView: private::Sealed {
    /// Returns the request method.
    fn method(&self) -> &Method;

    /// Returns the request URI.
    fn uri(&self) -> &Uri;

    /// Returns the request headers.
    fn headers(&self) -> &HeaderMap;

    /// Returns all values of the header `name` joined with `,`, or an empty
    /// string if the header is absent.
    ///
    /// Bytes that are not valid UTF-8 are replaced with `U+FFFD`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fallback::RequestView;
    ///
    /// let request = http::Request::builder()
    ///     .header("Accept", "text/xml")
    ///     .header("Accept", "application/json")
    ///     .body(())
    ///     .unwrap();
    ///
    /// assert_eq!(request.header_line("accept"), "text/xml,application/json");
    /// assert_eq!(request.header_line("x-missing"), "");
    /// ```
    fn header_line<K: AsHeaderName>(&self, name: K) -> String {
        let values: Vec<_> = self
            .headers()
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
            .collect();
        values.join(",")
    }

    /// Returns the URL of the site root this request was made against.
    ///
    /// This is the request URI with its path and query removed, i.e.
    /// `scheme://authority`. Requests received by a server usually carry only
    /// a path, in which case the authority is taken from the `Host` header and
    /// the scheme defaults to `http`. If neither is available, the result is an
    /// empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use fallback::RequestView;
    ///
    /// let request = http::Request::get("https://example.com/a/b?x=1")
    ///     .body(())
    ///     .unwrap();
    /// assert_eq!(request.home_url(), "https://example.com");
    ///
    /// let request = http::Request::get("/a/b")
    ///     .header("Host", "localhost:8000")
    ///     .body(())
    ///     .unwrap();
    /// assert_eq!(request.home_url(), "http://localhost:8000");
    /// ```
    fn home_url(&self) -> String {
        let uri = self.uri();
        let authority = uri.authority().map(http::uri::Authority::as_str).or_else(|| {
            self.headers()
                .get(http::header::HOST)
                .and_then(|host| host.to_str().ok())
                .filter(|host| !host.is_empty())
        });

        match authority {
            Some(authority) => format!("{}://{authority}", uri.scheme_str().unwrap_or("http")),
            None => String::new(),
        }
    }
}

impl<B> private::Sealed for http::Request<B> {}

impl<B> RequestView for http::Request<B> {
    fn method(&self) -> &Method {
        http::Request::method(self)
    }

    fn uri(&self) -> &Uri {
        http::Request::uri(self)
    }

    fn headers(&self) -> &HeaderMap {
        http::Request::headers(self)
    }
}

impl private::Sealed for http::request::Parts {}

impl RequestView for http::request::Parts {
    fn method(&self) -> &Method {
        &self.method
    }

    fn uri(&self) -> &Uri {
        &self.uri
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
