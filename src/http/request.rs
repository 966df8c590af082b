//! Hand-rolled HTTP request-head parsing.
//!
//! The request head is read line by line, one pass, stopping at the blank
//! line that terminates the headers. Only lines beginning with the literal
//! `GET` method token are recognized; everything else is discarded. Anything
//! malformed degrades to "no request" rather than an error.

/// The parsed head of an incoming request.
///
/// Holds the path token of the request line: everything between the method
/// token and the protocol token, minus the leading `/`. A request for the
/// server root therefore parses to an empty path.
///
/// # Examples
///
/// ```
/// use minihttpd::http::RequestHead;
///
/// let raw = b"GET /multiply?num1=3&num2=4 HTTP/1.1\r\nHost: localhost\r\n\r\n";
/// let head = RequestHead::parse(raw).unwrap();
/// assert_eq!(head.path(), "multiply?num1=3&num2=4");
///
/// // A header block with no GET line yields no request at all.
/// assert!(RequestHead::parse(b"Host: localhost\r\n\r\n").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    path: String,
}

impl RequestHead {
    /// Parses a request head from a raw byte buffer.
    ///
    /// Lines are newline-delimited; a trailing `\r` is tolerated. Scanning
    /// stops at the first blank line (end of headers) or at the end of the
    /// buffer. A later `GET` line overwrites the path captured from an
    /// earlier one.
    ///
    /// Returns `None` when no parseable `GET` line was seen: a blank line
    /// arriving first, a request line with no second space, or a line that
    /// is not valid UTF-8 all degrade to "no request".
    pub fn parse(buf: &[u8]) -> Option<Self> {
        let mut path = None;

        for raw_line in buf.split(|&b| b == b'\n') {
            let line = match std::str::from_utf8(raw_line) {
                Ok(line) => line.strip_suffix('\r').unwrap_or(line),
                Err(_) => continue,
            };

            // Blank line: end of the header block.
            if line.is_empty() {
                break;
            }

            if line.starts_with("GET") {
                if let Some(extracted) = extract_path(line) {
                    path = Some(extracted.to_owned());
                }
            }
        }

        path.map(|path| Self { path })
    }

    /// Returns the path token, without its leading `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Consumes the head, returning the owned path.
    pub fn into_path(self) -> String {
        self.path
    }
}

/// Extracts the path from a request line: the substring between the first
/// space plus the leading `/` and the second space. `None` when the line has
/// no second space.
fn extract_path(line: &str) -> Option<&str> {
    let first = line.find(' ')?;
    let second = first + 1 + line[first + 1..].find(' ')?;
    line.get(first + 2..second)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_with_query() {
        let head = RequestHead::parse(b"GET /multiply?num1=3&num2=4 HTTP/1.1\n\n").unwrap();
        assert_eq!(head.path(), "multiply?num1=3&num2=4");
    }

    #[test]
    fn parses_crlf_head() {
        let raw = b"GET /greet?name=Ana&lang=es HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let head = RequestHead::parse(raw).unwrap();
        assert_eq!(head.path(), "greet?name=Ana&lang=es");
    }

    #[test]
    fn root_request_parses_to_empty_path() {
        let head = RequestHead::parse(b"GET / HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(head.path(), "");
    }

    #[test]
    fn blank_line_first_is_no_request() {
        assert!(RequestHead::parse(b"\n\n").is_none());
    }

    #[test]
    fn headers_without_request_line_are_no_request() {
        assert!(RequestHead::parse(b"Host: localhost\r\nAccept: */*\r\n\r\n").is_none());
    }

    #[test]
    fn missing_second_space_is_no_request() {
        assert!(RequestHead::parse(b"GET /nothing-after\n\n").is_none());
    }

    #[test]
    fn empty_buffer_is_no_request() {
        assert!(RequestHead::parse(b"").is_none());
    }

    #[test]
    fn header_lines_are_discarded() {
        let raw = b"Accept: text/html\r\nGET /json HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let head = RequestHead::parse(raw).unwrap();
        assert_eq!(head.path(), "json");
    }

    #[test]
    fn later_get_line_overwrites_earlier() {
        let raw = b"GET /first HTTP/1.1\nGET /second HTTP/1.1\n\n";
        let head = RequestHead::parse(raw).unwrap();
        assert_eq!(head.path(), "second");
    }

    #[test]
    fn get_line_after_blank_line_is_ignored() {
        let raw = b"Host: localhost\n\nGET /late HTTP/1.1\n";
        assert!(RequestHead::parse(raw).is_none());
    }

    #[test]
    fn non_get_methods_are_not_recognized() {
        assert!(RequestHead::parse(b"POST /submit HTTP/1.1\n\n").is_none());
    }

    #[test]
    fn into_path_returns_owned_path() {
        let head = RequestHead::parse(b"GET /file/a.txt HTTP/1.1\n\n").unwrap();
        assert_eq!(head.into_path(), "file/a.txt");
    }
}
