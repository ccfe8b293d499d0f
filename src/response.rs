//! The immutable response value.
//!
//! A [`Response`] carries the status line, the header collection, and
//! the raw body bytes, plus a back-reference to the request that
//! produced it. Text decoding is lazy and guarded by a data-integrity
//! check; richer decoding goes through [`Response::decode`].

use crate::{body::printable, header::Headers, Error, Request, Result};
use std::fmt;

/// An immutable HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    req: Request,
    status: u16,
    reason: String,
    headers: Headers,
    body: Vec<u8>,
}

impl Response {
    /// Assembles a response. Called by [`Wire`](crate::Wire)
    /// implementations once the exchange completes.
    pub fn new(
        req: Request,
        status: u16,
        reason: impl Into<String>,
        headers: Headers,
        body: Vec<u8>,
    ) -> Self {
        Response {
            req,
            status,
            reason: reason.into(),
            headers,
            body,
        }
    }

    /// The originating request, for request/response round-trip chains
    /// such as re-issuing with a modified header.
    pub fn back(&self) -> Request {
        self.req.clone()
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// HTTP reason phrase.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The raw ordered header collection.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// First value of a header, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Folds the headers into a multi-map: one entry per distinct name
    /// in order of first appearance, later values of repeated names
    /// appended to that entry.
    pub fn header_map(&self) -> Vec<(String, Vec<String>)> {
        let mut map: Vec<(String, Vec<String>)> = Vec::new();
        for header in self.headers.iter() {
            match map
                .iter_mut()
                .find(|(name, _)| name.eq_ignore_ascii_case(header.name()))
            {
                Some((_, values)) => values.push(header.value().to_string()),
                None => map.push((
                    header.name().to_string(),
                    vec![header.value().to_string()],
                )),
            }
        }
        map
    }

    /// Decodes the body as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BrokenText`] if the decoded text contains the
    /// Unicode replacement character. That marks truncated or binary
    /// content misread as text, so it is reported as a data-integrity
    /// failure with the line of the first occurrence and the body
    /// length, never downgraded to an empty string.
    pub fn text(&self) -> Result<String> {
        let body = String::from_utf8_lossy(&self.body);
        if let Some(position) = body.find('\u{FFFD}') {
            return Err(Error::BrokenText {
                line: body[..position].matches('\n').count() + 1,
                bytes: self.body.len(),
            });
        }
        Ok(body.into_owned())
    }

    /// A defensive copy of the raw bytes, with no integrity check.
    pub fn binary(&self) -> Vec<u8> {
        self.body.clone()
    }

    /// Converts this response into a richer, protocol-specific wrapper
    /// such as [`RestResponse`](crate::RestResponse) or
    /// [`JsonResponse`](crate::JsonResponse).
    ///
    /// The conversion is resolved at compile time through
    /// `From<Response>`, so there is no runtime construction failure.
    pub fn decode<T: From<Response>>(self) -> T {
        T::from(self)
    }
}

impl fmt::Display for Response {
    /// Renders a diagnostic status line, headers, a blank line, and a
    /// printable body.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {} [{}]",
            self.status,
            self.reason,
            self.req.uri()
        )?;
        for header in self.headers.iter() {
            writeln!(f, "{header}")?;
        }
        writeln!(f)?;
        write!(f, "{}", printable(&self.body))
    }
}

impl PartialEq for Response {
    fn eq(&self, other: &Self) -> bool {
        self.req == other.req
            && self.status == other.status
            && self.reason == other.reason
            && self.headers == other.headers
            && self.body == other.body
    }
}

impl Eq for Response {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockWire;
    use std::sync::Arc;

    fn request() -> Request {
        Request::with_wire(Arc::new(MockWire::ok("")), "http://localhost/").unwrap()
    }

    fn response(body: Vec<u8>) -> Response {
        Response::new(request(), 200, "OK", Headers::new(), body)
    }

    #[test]
    fn decodes_valid_text() {
        assert_eq!(response(b"hello".to_vec()).text().unwrap(), "hello");
    }

    #[test]
    fn reports_broken_text_with_line_and_length() {
        let broken = response(vec![b'a', b'\n', b'b', b'\n', 0xff, b'c']);
        match broken.text() {
            Err(Error::BrokenText { line, bytes }) => {
                assert_eq!(line, 3);
                assert_eq!(bytes, 6);
            }
            other => panic!("expected BrokenText, got {other:?}"),
        }
        assert_eq!(broken.binary(), vec![b'a', b'\n', b'b', b'\n', 0xff, b'c']);
    }

    #[test]
    fn folds_headers_preserving_first_appearance_order() {
        let headers = Headers::new()
            .with("Set-Cookie", "a=1")
            .unwrap()
            .with("Content-Type", "text/plain")
            .unwrap()
            .with("set-cookie", "b=2")
            .unwrap();
        let map = Response::new(request(), 200, "OK", headers, Vec::new()).header_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map[0].0, "Set-Cookie");
        assert_eq!(map[0].1, vec!["a=1", "b=2"]);
        assert_eq!(map[1].0, "Content-Type");
    }

    #[test]
    fn goes_back_to_the_originating_request() {
        let req = request().header("X", "1").unwrap();
        let reply = Response::new(req.clone(), 200, "OK", Headers::new(), Vec::new());
        assert_eq!(reply.back(), req);
    }
}
