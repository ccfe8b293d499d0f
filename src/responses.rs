//! Typed response wrappers.
//!
//! Wrappers are built from a plain [`Response`] through
//! [`Response::decode`]; each adds one protocol-specific surface on
//! top and derefs back to the underlying response.

use crate::{Error, Request, Response, Result};
use std::ops::Deref;

/// A REST-flavored response with fluent assertions and redirect
/// helpers.
///
/// The `assert_*` methods panic on mismatch, printing the full
/// response; they are meant for tests and smoke checks, where a wrong
/// response should abort loudly.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use wireline::{MockWire, Request, RestResponse};
///
/// # fn main() -> Result<(), wireline::Error> {
/// let wire = Arc::new(MockWire::ok("all good"));
/// Request::with_wire(wire, "http://localhost/status")?
///     .fetch()?
///     .decode::<RestResponse>()
///     .assert_status(200)
///     .assert_body_contains("good");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RestResponse {
    response: Response,
}

impl From<Response> for RestResponse {
    fn from(response: Response) -> Self {
        RestResponse { response }
    }
}

impl Deref for RestResponse {
    type Target = Response;

    fn deref(&self) -> &Response {
        &self.response
    }
}

impl RestResponse {
    /// Verifies the status code.
    ///
    /// # Panics
    ///
    /// Panics if the status differs from `expected`.
    pub fn assert_status(self, expected: u16) -> Self {
        assert!(
            self.response.status() == expected,
            "HTTP response status is not equal to {expected}:\n{}",
            self.response,
        );
        self
    }

    /// Verifies that the body text contains `needle`.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid text or does not contain the
    /// needle.
    pub fn assert_body_contains(self, needle: &str) -> Self {
        match self.response.text() {
            Ok(body) if body.contains(needle) => self,
            Ok(body) => panic!(
                "HTTP response body doesn't contain {needle:?}:\n{body}"
            ),
            Err(err) => panic!("HTTP response body is not valid text: {err}"),
        }
    }

    /// Verifies that some value of the header equals `expected`.
    ///
    /// # Panics
    ///
    /// Panics if no value of `name` equals `expected`, including when
    /// the header is absent.
    pub fn assert_header(self, name: &str, expected: &str) -> Self {
        assert!(
            self.response.headers().all(name).contains(&expected),
            "HTTP header {name} is not {expected:?}:\n{}",
            self.response,
        );
        self
    }

    /// Jumps to a new location: a request against `uri` derived from
    /// the originating one, re-sending every received `Set-Cookie`
    /// value as a `Cookie` header.
    ///
    /// # Errors
    ///
    /// Returns an error if `uri` does not parse or a cookie pair makes
    /// an invalid header.
    pub fn jump(&self, uri: &str) -> Result<Request> {
        let mut request = self.response.back().uri().set(uri)?.back();
        for value in self.response.headers().all("Set-Cookie") {
            if let Some(pair) = value.split(';').next() {
                request = request.header("Cookie", pair.trim())?;
            }
        }
        Ok(request)
    }

    /// Follows the `Location` header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the header is absent, or a
    /// [`jump`](RestResponse::jump) error.
    pub fn follow(&self) -> Result<Request> {
        let location = self
            .response
            .header("Location")
            .ok_or_else(|| Error::Configuration("Location header is absent".to_string()))?
            .to_string();
        self.jump(&location)
    }
}

/// A JSON response.
#[derive(Debug, Clone)]
pub struct JsonResponse {
    response: Response,
}

impl From<Response> for JsonResponse {
    fn from(response: Response) -> Self {
        JsonResponse { response }
    }
}

impl Deref for JsonResponse {
    type Target = Response;

    fn deref(&self) -> &Response {
        &self.response
    }
}

impl JsonResponse {
    /// Parses the body as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Deserialization`] preserving the raw body, or
    /// a [`text`](Response::text) integrity error.
    pub fn json(&self) -> Result<serde_json::Value> {
        let raw = self.response.text()?;
        serde_json::from_str(&raw).map_err(|source| Error::Deserialization {
            raw_response: raw,
            source,
        })
    }
}

/// One web link parsed from an RFC 5988 `Link` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    uri: String,
    params: Vec<(String, String)>,
}

impl Link {
    /// The link target, possibly relative to the request URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// First value of a link parameter such as `rel` or `title`,
    /// compared case-insensitively.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(stored, _)| stored.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response with RFC 5988 web linking: `Link` headers parsed into
/// relation-addressed [`Link`]s.
#[derive(Debug, Clone)]
pub struct WebLinkingResponse {
    response: Response,
}

impl From<Response> for WebLinkingResponse {
    fn from(response: Response) -> Self {
        WebLinkingResponse { response }
    }
}

impl Deref for WebLinkingResponse {
    type Target = Response;

    fn deref(&self) -> &Response {
        &self.response
    }
}

impl WebLinkingResponse {
    /// Every link, in the order its header value appeared. Entries that
    /// do not parse as `<uri>; param=value` are skipped.
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for value in self.response.headers().all("Link") {
            for entry in split_links(value) {
                if let Some(link) = parse_link(entry) {
                    links.push(link);
                }
            }
        }
        links
    }

    /// The first link whose `rel` parameter equals `rel`.
    pub fn link(&self, rel: &str) -> Option<Link> {
        self.links()
            .into_iter()
            .find(|link| link.param("rel") == Some(rel))
    }

    /// Jumps to the link with the given relation, resolving a relative
    /// target against the request URI.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if no link carries the
    /// relation, or [`Error::InvalidUrl`] if the target does not
    /// resolve.
    pub fn follow(&self, rel: &str) -> Result<Request> {
        let link = self
            .link(rel)
            .ok_or_else(|| Error::Configuration(format!("Link with rel={rel:?} is absent")))?;
        let request = self.response.back();
        let target = request.uri().get().join(link.uri())?;
        Ok(request.uri().set(target.as_str())?.back())
    }
}

/// Splits one `Link` header value on the commas between entries,
/// leaving commas inside `<...>` targets and quoted parameters alone.
fn split_links(value: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut angled = false;
    for (index, c) in value.char_indices() {
        match c {
            '"' if !angled => quoted = !quoted,
            '<' if !quoted => angled = true,
            '>' if !quoted => angled = false,
            ',' if !quoted && !angled => {
                entries.push(&value[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    entries.push(&value[start..]);
    entries
}

fn parse_link(entry: &str) -> Option<Link> {
    let rest = entry.trim().strip_prefix('<')?;
    let (uri, params_text) = rest.split_once('>')?;
    let mut params = Vec::new();
    for part in params_text.split(';') {
        if let Some((name, value)) = part.split_once('=') {
            params.push((
                name.trim().to_string(),
                value.trim().trim_matches('"').to_string(),
            ));
        }
    }
    Some(Link {
        uri: uri.to_string(),
        params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Headers, MockWire, Request};
    use std::sync::Arc;

    fn response(status: u16, headers: Headers, body: &str) -> Response {
        let req = Request::with_wire(Arc::new(MockWire::ok("")), "http://localhost/a").unwrap();
        Response::new(req, status, "", headers, body.as_bytes().to_vec())
    }

    #[test]
    fn asserts_status_and_body() {
        response(200, Headers::new(), "all good")
            .decode::<RestResponse>()
            .assert_status(200)
            .assert_body_contains("good");
    }

    #[test]
    #[should_panic(expected = "HTTP response status is not equal to 200")]
    fn fails_on_wrong_status() {
        response(500, Headers::new(), "")
            .decode::<RestResponse>()
            .assert_status(200);
    }

    #[test]
    fn follows_location_with_cookies() {
        let headers = Headers::new()
            .with("Location", "http://localhost/next")
            .unwrap()
            .with("Set-Cookie", "alpha=1; Path=/")
            .unwrap()
            .with("Set-Cookie", "beta=2")
            .unwrap();
        let request = response(302, headers, "")
            .decode::<RestResponse>()
            .follow()
            .unwrap();
        assert_eq!(request.uri().get().path(), "/next");
        assert_eq!(request.headers.all("Cookie"), vec!["alpha=1", "beta=2"]);
    }

    #[test]
    fn parses_link_headers_and_follows_relations() {
        let headers = Headers::new()
            .with(
                "Link",
                "</page/2>; rel=\"next\"; title=\"p2\", </page/0>; rel=\"prev\"",
            )
            .unwrap()
            .with("Link", "<http://other/last>; rel=last")
            .unwrap();
        let reply = response(200, headers, "").decode::<WebLinkingResponse>();
        assert_eq!(reply.links().len(), 3);
        assert_eq!(reply.link("next").unwrap().param("title"), Some("p2"));
        let next = reply.follow("next").unwrap();
        assert_eq!(next.uri().get().as_str(), "http://localhost/page/2");
        let last = reply.follow("last").unwrap();
        assert_eq!(last.uri().get().as_str(), "http://other/last");
    }

    #[test]
    fn reports_missing_link_relation() {
        let reply = response(200, Headers::new(), "").decode::<WebLinkingResponse>();
        assert!(matches!(reply.follow("next"), Err(Error::Configuration(_))));
    }

    #[test]
    fn parses_json_preserving_raw_body_on_failure() {
        let good = response(200, Headers::new(), "{\"name\":\"jeff\"}")
            .decode::<JsonResponse>();
        assert_eq!(good.json().unwrap()["name"], "jeff");

        let bad = response(200, Headers::new(), "not json").decode::<JsonResponse>();
        match bad.json() {
            Err(err) => assert_eq!(err.raw_response(), Some("not json")),
            Ok(value) => panic!("expected failure, got {value}"),
        }
    }
}
