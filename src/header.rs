//! Ordered, duplicate-preserving HTTP header collection.
//!
//! Names keep their original case but compare case-insensitively for
//! lookup and removal. Duplicate names are legal (`Set-Cookie` is the
//! classic case). The collection is never mutated in place: [`with`]
//! and [`without`] return new collections.
//!
//! [`with`]: Headers::with
//! [`without`]: Headers::without

use crate::{Error, Result};

/// A single name/value header pair.
///
/// The name is stored exactly as given; a blank name is rejected at
/// construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    name: String,
    value: String,
}

impl Header {
    /// Creates a new header pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the name is empty or blank.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::Configuration(
                "header name can't be empty".to_string(),
            ));
        }
        Ok(Header {
            name,
            value: value.into(),
        })
    }

    /// Header name, in its original case.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Case-insensitive name comparison, ignoring surrounding blanks.
    pub fn matches(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}

impl std::fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Ordered collection of header pairs.
///
/// # Examples
///
/// ```
/// use wireline::Headers;
///
/// let headers = Headers::new()
///     .with("Set-Cookie", "a=1")?
///     .with("set-cookie", "b=2")?;
/// assert_eq!(headers.get("SET-COOKIE"), Some("a=1"));
/// assert_eq!(headers.all("Set-Cookie"), vec!["a=1", "b=2"]);
/// assert!(headers.without("set-COOKIE").is_empty());
/// # Ok::<(), wireline::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    pairs: Vec<Header>,
}

impl Headers {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new collection with the pair appended.
    ///
    /// Existing pairs keep their order; no deduplication happens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the name is blank.
    pub fn with(&self, name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let mut pairs = self.pairs.clone();
        pairs.push(Header::new(name, value)?);
        Ok(Headers { pairs })
    }

    /// Returns a new collection with every case-insensitive match of
    /// `name` removed, preserving the relative order of the remainder.
    pub fn without(&self, name: &str) -> Self {
        Headers {
            pairs: self
                .pairs
                .iter()
                .filter(|header| !header.matches(name))
                .cloned()
                .collect(),
        }
    }

    /// First value stored under `name`, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|header| header.matches(name))
            .map(Header::value)
    }

    /// Every value stored under `name`, in insertion order.
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|header| header.matches(name))
            .map(Header::value)
            .collect()
    }

    /// Iterates over all pairs in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.pairs.iter()
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// `true` if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order_and_duplicates() {
        let headers = Headers::new()
            .with("X", "1")
            .unwrap()
            .with("Accept", "text/plain")
            .unwrap()
            .with("X", "2")
            .unwrap();
        let names: Vec<&str> = headers.iter().map(Header::name).collect();
        assert_eq!(names, vec!["X", "Accept", "X"]);
        assert_eq!(headers.all("x"), vec!["1", "2"]);
    }

    #[test]
    fn looks_up_case_insensitively_keeping_original_case() {
        let headers = Headers::new().with("Content-Type", "text/xml").unwrap();
        assert_eq!(headers.get("content-type"), Some("text/xml"));
        assert_eq!(headers.iter().next().unwrap().name(), "Content-Type");
    }

    #[test]
    fn removes_all_matches_preserving_the_rest() {
        let headers = Headers::new()
            .with("X", "1")
            .unwrap()
            .with("Y", "2")
            .unwrap()
            .with("x", "3")
            .unwrap()
            .without(" X ");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Y"), Some("2"));
    }

    #[test]
    fn rejects_blank_name() {
        assert!(Headers::new().with("  ", "value").is_err());
        assert!(Header::new("", "value").is_err());
    }

    #[test]
    fn with_leaves_the_original_untouched() {
        let original = Headers::new().with("A", "1").unwrap();
        let derived = original.with("B", "2").unwrap();
        assert_eq!(original.len(), 1);
        assert_eq!(derived.len(), 2);
    }
}
