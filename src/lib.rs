//! # Wireline - a fluent, immutable HTTP request library
//!
//! Wireline builds outbound HTTP requests as immutable values: every
//! fluent call returns a new [`Request`], so values can be shared
//! between threads and forked into variants without synchronization.
//! Transport behavior composes through [`Wire`] decorators instead of
//! request subclassing, and responses decode lazily with a built-in
//! corruption check.
//!
//! ## Quick Start
//!
//! ```no_run
//! use wireline::{Request, RestResponse, RetryWire};
//!
//! fn main() -> Result<(), wireline::Error> {
//!     let name = Request::new("https://api.example.com")?
//!         .uri().path("/users")?.query_param("id", 333).back()
//!         .header("Accept", "application/json")?
//!         .through(RetryWire::new)
//!         .fetch()?
//!         .decode::<RestResponse>()
//!         .assert_status(200)
//!         .text()?;
//!     println!("{name}");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Immutable requests** - every mutator (`header`, `method`,
//!   `reset`, `through`, the URI and body views) returns a new value;
//!   the receiver never changes
//! - **Pluggable transports** - a [`Wire`] turns a resolved request
//!   into a [`Response`]; decorators wrap one wire inside another to
//!   add retries ([`RetryWire`]), basic auth ([`BasicAuthWire`]),
//!   cookie merging ([`CookieOptimizingWire`]), logging
//!   ([`VerboseWire`]), or test doubles ([`MockWire`])
//! - **Ordered, duplicate-preserving headers** - [`Headers`] keeps
//!   insertion order and original case, with case-insensitive lookup
//! - **Safe URI building** - query values are percent-encoded exactly
//!   once, paths join with slash normalization, an empty path becomes
//!   `/`
//! - **Lazy, checked decoding** - [`Response::text`] fails loudly on
//!   corrupted UTF-8 instead of silently passing replacement
//!   characters through; [`Response::decode`] converts into typed
//!   wrappers like [`RestResponse`], [`JsonResponse`], and
//!   [`WebLinkingResponse`] at compile time
//! - **Structured logging** - one `tracing` event per fetch, more
//!   under [`VerboseWire`]
//!
//! ## Composing wires
//!
//! `through` wraps the current transport with a decorator built by the
//! given constructor; the last wrapper added runs first:
//!
//! ```
//! use std::sync::Arc;
//! use wireline::{MockWire, Request, RetryWire, VerboseWire};
//!
//! # fn main() -> Result<(), wireline::Error> {
//! let wire = Arc::new(MockWire::ok("hello, world"));
//! let response = Request::with_wire(wire.clone(), "http://localhost")?
//!     .through(VerboseWire::new)
//!     .through(RetryWire::new)
//!     .fetch()?;
//! assert_eq!(response.text()?, "hello, world");
//! assert_eq!(wire.requests().len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Nothing is retried, logged-and-swallowed, or defaulted inside the
//! core: construction errors surface at the call that caused them,
//! `fetch` raises a single transport error category, and `text` raises
//! a data-integrity error with the line where the corruption starts.
//! Callers wanting resilience opt in with a retrying wire.

mod body;
mod error;
mod header;
mod mock;
mod request;
mod response;
mod responses;
mod retry;
mod uri;
mod wire;
mod wires;

pub use body::RequestBody;
pub use error::{Error, Result};
pub use header::{Header, Headers};
pub use mock::{MockRequest, MockWire};
pub use request::Request;
pub use response::Response;
pub use responses::{JsonResponse, Link, RestResponse, WebLinkingResponse};
pub use retry::{RetryStrategy, RetryWire};
pub use uri::RequestUri;
pub use wire::{ReqwestWire, Wire};
pub use wires::{BasicAuthWire, CookieOptimizingWire, VerboseWire};
