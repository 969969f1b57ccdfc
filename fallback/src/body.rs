//! In-memory response body.

use std::convert::Infallible;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use http_body::{Frame, SizeHint};

/// A response body backed by an in-memory buffer.
///
/// The body starts out empty and is filled by calling [`Body::write`]. When
/// polled as an [`http_body::Body`], the whole buffer is emitted as a single
/// data frame.
///
/// # Examples
///
/// ```
/// use fallback::Body;
///
/// let mut body = Body::empty();
/// body.write("Not ");
/// body.write("found");
/// assert_eq!(body.as_bytes(), b"Not found");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    buf: BytesMut,
}

impl Body {
    /// Creates an empty body.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends `content` to the body and returns the number of bytes written.
    pub fn write(&mut self, content: &str) -> usize {
        self.buf.extend_from_slice(content.as_bytes());
        content.len()
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes in the body.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written to the body.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the body and returns its contents.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}

impl From<&str> for Body {
    fn from(content: &str) -> Self {
        let mut body = Self::empty();
        body.write(content);
        body
    }
}

impl From<String> for Body {
    fn from(content: String) -> Self {
        Self {
            buf: BytesMut::from(content.as_bytes()),
        }
    }
}

impl fmt::Write for Body {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s);
        Ok(())
    }
}

impl http_body::Body for Body {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        if self.buf.is_empty() {
            return Poll::Ready(None);
        }

        let data = self.buf.split().freeze();
        Poll::Ready(Some(Ok(Frame::data(data))))
    }

    fn is_end_stream(&self) -> bool {
        self.buf.is_empty()
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::with_exact(self.buf.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use http_body_util::BodyExt;

    use super::*;

    #[test]
    fn body_empty() {
        let body = Body::empty();

        assert!(body.is_empty());
        assert_eq!(body.len(), 0);
        assert!(http_body::Body::is_end_stream(&body));
    }

    #[test]
    fn body_write_appends() {
        let mut body = Body::empty();

        assert_eq!(body.write("Allowed methods: "), 17);
        body.write("GET");

        assert_eq!(body.as_bytes(), b"Allowed methods: GET");
        assert_eq!(body.into_bytes(), Bytes::from_static(b"Allowed methods: GET"));
    }

    #[test]
    fn body_fmt_write() {
        let mut body = Body::empty();

        write!(body, "{}-{}", 4, "04").unwrap();

        assert_eq!(body.as_bytes(), b"4-04");
    }

    #[test]
    fn body_size_hint() {
        let body = Body::from("Not found");

        assert_eq!(http_body::Body::size_hint(&body).exact(), Some(9));
    }

    #[tokio::test]
    async fn body_collect() {
        let body = Body::from(String::from("<root/>"));

        let collected = body.collect().await.unwrap().to_bytes();

        assert_eq!(collected, Bytes::from_static(b"<root/>"));
    }

    #[tokio::test]
    async fn body_empty_yields_no_frames() {
        let mut body = Body::empty();

        assert!(body.frame().await.is_none());
    }
}
