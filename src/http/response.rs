//! HTTP/1.1 response builder.
//!
//! Builds a status line, an ordered header list, and a body, and serializes
//! them to the minimal wire format this server speaks: status line, headers,
//! blank line, body. The connection close delimits the body, so no
//! `Content-Length` or `Connection` headers are written.

use bytes::{BufMut, BytesMut};

use super::StatusCode;

/// An HTTP/1.1 response, ready to be serialized and sent.
///
/// # Examples
///
/// ```
/// use minihttpd::http::{Response, StatusCode};
///
/// let response = Response::plain(StatusCode::Ok, "Result is: 42");
/// let bytes = response.into_bytes();
/// let text = std::str::from_utf8(&bytes).unwrap();
/// assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
/// assert!(text.ends_with("\r\n\r\nResult is: 42"));
/// ```
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Response {
    /// Creates a new response with the given status and an empty body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// A `text/plain` response.
    pub fn plain(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(status)
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(body)
    }

    /// A `text/html` response.
    pub fn html(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(status)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(body)
    }

    /// An `application/json` response.
    pub fn json(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(status)
            .header("Content-Type", "application/json; charset=utf-8")
            .body(body)
    }

    /// Appends a response header. Headers are written in insertion order.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the response body from a string.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into().into_bytes();
        self
    }

    /// Sets the response body from raw bytes.
    #[must_use]
    pub fn body_bytes(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the status code of this response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the body as a UTF-8 string, lossily. Handy in tests.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Serializes the response into a `BytesMut` buffer.
    ///
    /// A `Content-Type: text/plain; charset=utf-8` header is written when no
    /// content type was set explicitly.
    pub fn into_bytes(mut self) -> BytesMut {
        if !self
            .headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("content-type"))
        {
            self.headers
                .push(("Content-Type".into(), "text/plain; charset=utf-8".into()));
        }

        let estimated_size = 64 + self.headers.len() * 48 + self.body.len();
        let mut buf = BytesMut::with_capacity(estimated_size);

        buf.put(
            format!(
                "HTTP/1.1 {} {}\r\n",
                self.status.as_u16(),
                self.status.canonical_reason()
            )
            .as_bytes(),
        );

        for (name, value) in &self.headers {
            buf.put(format!("{name}: {value}\r\n").as_bytes());
        }

        buf.put(&b"\r\n"[..]);
        buf.put(self.body.as_slice());
        buf
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new(StatusCode::Ok)
    }
}
