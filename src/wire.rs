//! The transport capability and the default production transport.
//!
//! A [`Wire`] turns a fully resolved request snapshot into a
//! [`Response`]. Implementations may wrap another wire and delegate to
//! it, which is how retries, authentication, and logging compose around
//! a request without touching the request type itself; see
//! [`Request::through`](crate::Request::through).

use crate::{header::Headers, Error, Request, Response, Result};

/// A pluggable transport: one operation that performs the exchange.
///
/// The core treats a wire as stateless per call; concrete decorators
/// may keep internal state (attempt counters, request logs), but that
/// is their concern. Implementations must be shareable across threads.
pub trait Wire: Send + Sync {
    /// Performs the exchange for `owner`, fully resolved into its URI,
    /// method, headers, and body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`](crate::Error::Transport) on a
    /// network or protocol failure.
    fn send(
        &self,
        owner: &Request,
        home: &str,
        method: &str,
        headers: &Headers,
        body: &[u8],
    ) -> Result<Response>;
}

/// The default production transport, backed by a blocking `reqwest`
/// client.
///
/// Connection pooling and TLS live inside the client; the core neither
/// configures nor surfaces them.
pub struct ReqwestWire {
    client: reqwest::blocking::Client,
}

impl ReqwestWire {
    /// Builds the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be
    /// constructed.
    pub fn new() -> Result<Self> {
        Ok(ReqwestWire {
            client: reqwest::blocking::Client::builder().build()?,
        })
    }
}

impl Wire for ReqwestWire {
    fn send(
        &self,
        owner: &Request,
        home: &str,
        method: &str,
        headers: &Headers,
        body: &[u8],
    ) -> Result<Response> {
        let verb = http::Method::from_bytes(method.as_bytes())
            .map_err(|err| Error::Configuration(format!("invalid HTTP method {method:?}: {err}")))?;
        tracing::debug!(method, uri = home, "sending HTTP request");
        let mut request = self.client.request(verb, home);
        for header in headers.iter() {
            request = request.header(header.name(), header.value());
        }
        if !body.is_empty() {
            request = request.body(body.to_vec());
        }
        let reply = request.send()?;
        let status = reply.status();
        let mut received = Headers::new();
        for (name, value) in reply.headers() {
            // values may carry opaque bytes (RFC 9110 obs-text)
            received = received.with(
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )?;
        }
        let bytes = reply.bytes()?.to_vec();
        Ok(Response::new(
            owner.clone(),
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            received,
            bytes,
        ))
    }
}
