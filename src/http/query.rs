//! Query-string decoding.
//!
//! Decodes `key=value&key=value` strings into an ordered parameter map,
//! percent-decoding names and values independently. Decode order follows
//! appearance order; a duplicate name overwrites the earlier value while
//! keeping its original position, the way a linked hash map accumulates
//! entries.

use percent_encoding::percent_decode_str;
use thiserror::Error;

/// Errors produced while decoding a query string.
///
/// Either error is a client error: the request that carried the query is
/// answered with a 400.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// A pair carried no `=` separator at all.
    #[error("malformed query pair (no '='): {pair:?}")]
    MissingSeparator { pair: String },

    /// A name or value did not percent-decode to valid UTF-8.
    #[error("query component is not valid UTF-8 after decoding: {component:?}")]
    Decode { component: String },
}

/// An ordered map of decoded query parameters.
///
/// # Examples
///
/// ```
/// use minihttpd::http::QueryParams;
///
/// let params = QueryParams::decode("q=hello+world%2Fme&bob=5").unwrap();
/// assert_eq!(params.get("q"), Some("hello world/me"));
/// assert_eq!(params.get("bob"), Some("5"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Decodes a raw query string.
    ///
    /// Pairs are split on `&`, then on the *first* `=`, so a value that
    /// itself contains `=` is preserved verbatim. `+` decodes to a space and
    /// percent escapes decode as UTF-8.
    ///
    /// # Errors
    ///
    /// The whole decode fails on the first pair with no `=` or the first
    /// component that does not decode to UTF-8.
    pub fn decode(query: &str) -> Result<Self, QueryError> {
        let mut params = Self::default();

        for pair in query.split('&') {
            let idx = pair.find('=').ok_or_else(|| QueryError::MissingSeparator {
                pair: pair.to_owned(),
            })?;
            let name = decode_component(&pair[..idx])?;
            let value = decode_component(&pair[idx + 1..])?;
            params.insert(name, value);
        }

        Ok(params)
    }

    /// Returns the value for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if a parameter named `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(n, _)| n == name)
    }

    /// Returns the number of distinct parameter names.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no parameters were decoded.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over `(name, value)` pairs in appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    // Last write wins; an overwritten name keeps its original position.
    fn insert(&mut self, name: String, value: String) {
        match self.pairs.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.pairs.push((name, value)),
        }
    }
}

fn decode_component(raw: &str) -> Result<String, QueryError> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| QueryError::Decode {
            component: raw.to_owned(),
        })
}
