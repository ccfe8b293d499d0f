//! Body view of a request.
//!
//! A [`RequestBody`] is bound to one request snapshot and mutates only
//! the raw body bytes; [`back`](RequestBody::back) hands control to a
//! reconstructed sibling request.

use crate::Request;
use std::fmt;
use url::form_urlencoded;

/// A view over the raw body bytes of one [`Request`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use wireline::{MockWire, Request};
///
/// # fn main() -> Result<(), wireline::Error> {
/// let request = Request::with_wire(Arc::new(MockWire::ok("")), "http://localhost")?
///     .body()
///     .form_param("a", 1)
///     .form_param("b", 2)
///     .back();
/// assert_eq!(request.body().get(), "a=1&b=2&");
/// # Ok(())
/// # }
/// ```
///
/// `form_param` blindly appends `name=value&` to whatever is already
/// there. Mixing it with a previously [`set`](RequestBody::set)
/// non-form body produces ill-formed output; not mixing the two is the
/// caller's responsibility.
#[derive(Debug, Clone)]
pub struct RequestBody {
    owner: Request,
    content: Vec<u8>,
}

impl RequestBody {
    pub(crate) fn new(owner: Request, content: Vec<u8>) -> Self {
        RequestBody { owner, content }
    }

    /// Current content as UTF-8 text, for diagnostics.
    pub fn get(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }

    /// Replaces the content with text or raw bytes.
    pub fn set(self, content: impl Into<Vec<u8>>) -> Self {
        RequestBody {
            owner: self.owner,
            content: content.into(),
        }
    }

    /// Appends `name=value&`, with the value form-urlencoded, on top of
    /// the existing content.
    pub fn form_param(self, name: &str, value: impl ToString) -> Self {
        let mut content = self.content;
        content.extend_from_slice(name.as_bytes());
        content.push(b'=');
        let encoded: String =
            form_urlencoded::byte_serialize(value.to_string().as_bytes()).collect();
        content.extend_from_slice(encoded.as_bytes());
        content.push(b'&');
        RequestBody {
            owner: self.owner,
            content,
        }
    }

    /// Appends a sequence of form parameters, in order.
    pub fn form_params<I, K, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToString,
    {
        let mut body = self;
        for (name, value) in pairs {
            body = body.form_param(name.as_ref(), value.to_string());
        }
        body
    }

    /// Returns an updated [`Request`] with the new body; transport,
    /// URI, method, and headers stay as they were.
    pub fn back(self) -> Request {
        Request {
            wire: self.owner.wire,
            home: self.owner.home,
            method: self.owner.method,
            headers: self.owner.headers,
            body: self.content,
        }
    }
}

impl fmt::Display for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", printable(&self.content))
    }
}

/// Renders bytes with ASCII characters verbatim and everything else as
/// `\u00xx` escapes; an empty slice renders as `<<empty>>`.
pub(crate) fn printable(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "<<empty>>".to_string();
    }
    let mut text = String::with_capacity(bytes.len());
    for byte in bytes {
        if byte.is_ascii() {
            text.push(*byte as char);
        } else {
            text.push_str(&format!("\\u{byte:04x}"));
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockWire;
    use std::sync::Arc;

    fn request() -> Request {
        Request::with_wire(Arc::new(MockWire::ok("")), "http://localhost").unwrap()
    }

    #[test]
    fn appends_form_params_urlencoding_values() {
        let body = request()
            .body()
            .form_param("a", "1")
            .form_param("name", "hello there")
            .back()
            .body()
            .get();
        assert_eq!(body, "a=1&name=hello+there&");
    }

    #[test]
    fn appends_form_params_from_pairs() {
        let body = request().body().form_params([("a", 1), ("b", 2)]).get();
        assert_eq!(body, "a=1&b=2&");
    }

    #[test]
    fn replaces_content_keeping_other_dimensions() {
        let req = request().method("POST").body().set("payload").back();
        assert_eq!(req.body().get(), "payload");
        assert_eq!(req.method, "POST");
    }

    #[test]
    fn prints_non_ascii_bytes_as_escapes() {
        assert_eq!(printable(b""), "<<empty>>");
        assert_eq!(printable(&[b'a', 0xff]), "a\\u00ff");
    }
}
