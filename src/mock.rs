//! Test-double wire.
//!
//! [`MockWire`] plays the role of an HTTP server at the [`Wire`] seam:
//! it answers every request with one canned response and records what
//! it received, so tests can assert on the fully resolved URI, method,
//! headers, and body without opening a socket.

use crate::{header::Headers, Request, Response, Result, Wire};
use std::sync::{Mutex, PoisonError};

/// One request as a [`MockWire`] received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRequest {
    /// The fully resolved destination URI.
    pub uri: String,
    /// The HTTP method.
    pub method: String,
    /// The headers, in the order they would go on the wire.
    pub headers: Headers,
    /// The raw body bytes.
    pub body: Vec<u8>,
}

/// A wire that returns a canned response and records every request.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use wireline::{MockWire, Request};
///
/// # fn main() -> Result<(), wireline::Error> {
/// let wire = Arc::new(
///     MockWire::new(404, "Not Found").with_header("Content-Type", "text/plain")?,
/// );
/// let response = Request::with_wire(wire.clone(), "http://localhost/missing")?.fetch()?;
/// assert_eq!(response.status(), 404);
/// assert_eq!(wire.requests()[0].uri, "http://localhost/missing");
/// # Ok(())
/// # }
/// ```
pub struct MockWire {
    status: u16,
    reason: String,
    headers: Headers,
    body: Vec<u8>,
    requests: Mutex<Vec<MockRequest>>,
}

impl MockWire {
    /// Creates a wire answering with the given status line and an empty
    /// body.
    pub fn new(status: u16, reason: impl Into<String>) -> Self {
        MockWire {
            status,
            reason: reason.into(),
            headers: Headers::new(),
            body: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a wire answering `200 OK` with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        MockWire::new(200, "OK").with_body(body)
    }

    /// Sets the canned response body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Appends a canned response header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`](crate::Error::Configuration) if
    /// the name is blank.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        self.headers = self.headers.with(name, value)?;
        Ok(self)
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Wire for MockWire {
    fn send(
        &self,
        owner: &Request,
        home: &str,
        method: &str,
        headers: &Headers,
        body: &[u8],
    ) -> Result<Response> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(MockRequest {
                uri: home.to_string(),
                method: method.to_string(),
                headers: headers.clone(),
                body: body.to_vec(),
            });
        Ok(Response::new(
            owner.clone(),
            self.status,
            self.reason.clone(),
            self.headers.clone(),
            self.body.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn records_resolved_requests() {
        let wire = Arc::new(MockWire::ok("fine"));
        Request::with_wire(wire.clone(), "http://localhost/")
            .unwrap()
            .method(Request::POST)
            .body()
            .set("payload")
            .back()
            .fetch()
            .unwrap();
        let requests = wire.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].body, b"payload");
    }
}
