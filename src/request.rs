//! The immutable request value and its fluent API.
//!
//! A [`Request`] bundles a transport handle, an absolute URI, an HTTP
//! method, a header collection, and raw body bytes. Every fluent call
//! returns a new `Request`; the receiver is never mutated, so multiple
//! threads may hold the same value and independently derive children
//! from it without synchronization.

use crate::{
    body::{printable, RequestBody},
    header::Headers,
    uri::RequestUri,
    wire::{ReqwestWire, Wire},
    Response, Result,
};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// An immutable HTTP request.
///
/// # Examples
///
/// ```no_run
/// use wireline::{Request, RestResponse};
///
/// # fn main() -> Result<(), wireline::Error> {
/// let body = Request::new("https://www.example.com:8080")?
///     .uri().path("/users")?.query_param("id", 333).back()
///     .method(Request::GET)
///     .header("Accept", "text/xml")?
///     .fetch()?
///     .decode::<RestResponse>()
///     .assert_status(200)
///     .text()?;
/// println!("{body}");
/// # Ok(())
/// # }
/// ```
///
/// The transport behind `fetch()` is pluggable; see
/// [`through`](Request::through) for composing decorators around it.
#[derive(Clone)]
pub struct Request {
    pub(crate) wire: Arc<dyn Wire>,
    pub(crate) home: Url,
    pub(crate) method: String,
    pub(crate) headers: Headers,
    pub(crate) body: Vec<u8>,
}

impl Request {
    /// GET method name.
    pub const GET: &'static str = "GET";
    /// POST method name.
    pub const POST: &'static str = "POST";
    /// PUT method name.
    pub const PUT: &'static str = "PUT";
    /// HEAD method name.
    pub const HEAD: &'static str = "HEAD";
    /// DELETE method name.
    pub const DELETE: &'static str = "DELETE";
    /// OPTIONS method name.
    pub const OPTIONS: &'static str = "OPTIONS";
    /// PATCH method name.
    pub const PATCH: &'static str = "PATCH";

    /// Creates a request against `uri`, bound to the default
    /// [`ReqwestWire`] transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI does not parse as an absolute URL or
    /// if the transport cannot be constructed.
    pub fn new(uri: impl AsRef<str>) -> Result<Self> {
        Self::with_wire(Arc::new(ReqwestWire::new()?), uri)
    }

    /// Creates a request against `uri`, bound to an explicit transport.
    ///
    /// If the URI has an empty path it is forced to `/`, so the
    /// request-target always carries a non-empty path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) if the
    /// URI does not parse.
    pub fn with_wire(wire: Arc<dyn Wire>, uri: impl AsRef<str>) -> Result<Self> {
        let mut home = Url::parse(uri.as_ref())?;
        if home.path().is_empty() && !home.cannot_be_a_base() {
            home.set_path("/");
        }
        Ok(Request {
            wire,
            home,
            method: Request::GET.to_string(),
            headers: Headers::new(),
            body: Vec::new(),
        })
    }

    /// Produces a URI view bound to the current destination.
    pub fn uri(&self) -> RequestUri {
        RequestUri::new(self.clone(), self.home.clone())
    }

    /// Produces a body view bound to the current raw bytes.
    pub fn body(&self) -> RequestBody {
        RequestBody::new(self.clone(), self.body.clone())
    }

    /// Returns a new request with the pair appended to the headers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`](crate::Error::Configuration) if
    /// the name is blank.
    pub fn header(&self, name: impl Into<String>, value: impl ToString) -> Result<Self> {
        Ok(Request {
            wire: self.wire.clone(),
            home: self.home.clone(),
            method: self.method.clone(),
            headers: self.headers.with(name, value.to_string())?,
            body: self.body.clone(),
        })
    }

    /// Returns a new request with all headers matching `name` removed,
    /// compared case-insensitively.
    pub fn reset(&self, name: &str) -> Self {
        Request {
            wire: self.wire.clone(),
            home: self.home.clone(),
            method: self.method.clone(),
            headers: self.headers.without(name),
            body: self.body.clone(),
        }
    }

    /// Returns a new request with the method replaced.
    ///
    /// The method is not validated against an allow-list; custom verbs
    /// are legal and reach the transport as-is.
    pub fn method(&self, method: impl Into<String>) -> Self {
        Request {
            wire: self.wire.clone(),
            home: self.home.clone(),
            method: method.into(),
            headers: self.headers.clone(),
            body: self.body.clone(),
        }
    }

    /// Returns a new request whose transport is the current one wrapped
    /// by the decorator that `decorate` constructs.
    ///
    /// Decorators expose a constructor taking the wrapped transport, so
    /// the common case reads as a plain function reference:
    ///
    /// ```
    /// use std::sync::Arc;
    /// use wireline::{MockWire, Request, RetryWire, VerboseWire};
    ///
    /// # fn main() -> Result<(), wireline::Error> {
    /// let request = Request::with_wire(Arc::new(MockWire::ok("fine")), "http://localhost")?
    ///     .through(VerboseWire::new)
    ///     .through(RetryWire::new);
    /// assert_eq!(request.fetch()?.status(), 200);
    /// # Ok(())
    /// # }
    /// ```
    pub fn through<W, F>(self, decorate: F) -> Self
    where
        W: Wire + 'static,
        F: FnOnce(Arc<dyn Wire>) -> W,
    {
        let Request {
            wire,
            home,
            method,
            headers,
            body,
        } = self;
        Request {
            wire: Arc::new(decorate(wire)),
            home,
            method,
            headers,
            body,
        }
    }

    /// Executes the request through the bound transport.
    ///
    /// This is the only operation that performs I/O. It blocks until
    /// the transport completes or fails; the core imposes no timeout,
    /// retry, or cancellation of its own.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`](crate::Error::Transport) on a
    /// network-level failure. Non-2xx statuses are not errors here;
    /// interpreting the status is the caller's concern.
    pub fn fetch(&self) -> Result<Response> {
        let start = Instant::now();
        let response = self.wire.send(
            self,
            self.home.as_str(),
            &self.method,
            &self.headers,
            &self.body,
        )?;
        tracing::info!(
            method = %self.method,
            path = %self.home.path(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            status = response.status(),
            reason = %response.reason(),
            uri = %self.home,
            "fetch completed"
        );
        Ok(response)
    }
}

impl fmt::Display for Request {
    /// Renders a diagnostic HTTP/1.1 request: request line, headers in
    /// insertion order, a blank line, and a printable body. Meant for
    /// logs, not wire transmission.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "HTTP/1.1 {} {} ({})",
            self.method,
            self.home.path(),
            self.home.host_str().unwrap_or("")
        )?;
        for header in self.headers.iter() {
            writeln!(f, "{header}")?;
        }
        writeln!(f)?;
        write!(f, "{}", printable(&self.body))
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("home", &self.home.as_str())
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("body", &printable(&self.body))
            .finish_non_exhaustive()
    }
}

/// Equality ignores the transport: two requests are equal when their
/// URI, method, headers, and body agree.
impl PartialEq for Request {
    fn eq(&self, other: &Self) -> bool {
        self.home == other.home
            && self.method == other.method
            && self.headers == other.headers
            && self.body == other.body
    }
}

impl Eq for Request {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockWire;

    fn request(uri: &str) -> Request {
        Request::with_wire(Arc::new(MockWire::ok("")), uri).unwrap()
    }

    #[test]
    fn forces_empty_path_to_root() {
        assert_eq!(request("http://h").uri().get().path(), "/");
    }

    #[test]
    fn mutators_leave_the_receiver_unchanged() {
        let before = request("http://localhost/x").header("X", "1").unwrap();
        let snapshot = before.clone();
        let _ = before.header("X", "2").unwrap();
        let _ = before.reset("x");
        let _ = before.method("PUT");
        assert_eq!(before, snapshot);
    }

    #[test]
    fn keeps_duplicate_headers_and_resets_all_of_them() {
        let req = request("http://localhost/")
            .header("X", "1")
            .unwrap()
            .header("X", "2")
            .unwrap();
        assert_eq!(req.headers.all("X"), vec!["1", "2"]);
        assert!(req.reset("x").headers.all("X").is_empty());
    }

    #[test]
    fn accepts_custom_verbs() {
        assert_eq!(request("http://localhost/").method("PROPFIND").method, "PROPFIND");
    }

    #[test]
    fn renders_diagnostic_text() {
        let text = request("http://localhost/a")
            .header("Accept", "text/plain")
            .unwrap()
            .to_string();
        assert!(text.starts_with("HTTP/1.1 GET /a (localhost)\n"));
        assert!(text.contains("Accept: text/plain\n"));
        assert!(text.ends_with("\n<<empty>>"));
    }

    #[test]
    fn equality_ignores_the_wire() {
        let left = request("http://localhost/p").method("POST");
        let right = Request::with_wire(Arc::new(MockWire::ok("other")), "http://localhost/p")
            .unwrap()
            .method("POST");
        assert_eq!(left, right);
    }
}
