//! Navigable addresses.
//!
//! An [`Address`] names a destination as `scheme://path?query`. It is parsed
//! once and never changes afterwards. The authority part is folded into the
//! path, so `app://customers/123` has scheme `app` and path `customers/123`,
//! the same as `app:customers/123`.
//!
//! ```
//! use region_navigator::Address;
//!
//! let address = Address::parse("app://customers/123?tab=orders").unwrap();
//! assert_eq!(address.scheme(), "app");
//! assert_eq!(address.path(), "customers/123");
//! assert_eq!(address.query().get("tab"), Some("orders"));
//! ```

use crate::params::QueryParams;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// Reasons an address string cannot be turned into an [`Address`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The input was empty or whitespace only.
    #[error("address is empty")]
    Empty,

    /// The input has no `scheme:` prefix.
    #[error("address '{input}' has no scheme")]
    MissingScheme { input: String },

    /// The input is not a valid URI.
    #[error("address '{input}' is malformed: {reason}")]
    Malformed { input: String, reason: String },
}

/// Immutable, parsed navigation target.
///
/// Equality and hashing use the normalized textual form returned by
/// [`as_str`](Self::as_str).
#[derive(Clone)]
pub struct Address {
    url: Url,
    path: String,
    query: QueryParams,
}

impl Address {
    /// Parse an address from text.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Empty);
        }

        let url = Url::parse(trimmed).map_err(|err| match err {
            url::ParseError::RelativeUrlWithoutBase => AddressError::MissingScheme {
                input: trimmed.to_string(),
            },
            other => AddressError::Malformed {
                input: trimmed.to_string(),
                reason: other.to_string(),
            },
        })?;

        Ok(Self::from_url(url))
    }

    /// Build an address from a scheme, a path and query parameters.
    ///
    /// ```
    /// use region_navigator::{Address, QueryParams};
    ///
    /// let mut query = QueryParams::new();
    /// query.insert("q", "acme corp");
    /// let address = Address::from_parts("app", "customers", &query).unwrap();
    /// assert_eq!(address.as_str(), "app://customers?q=acme+corp");
    /// ```
    pub fn from_parts(scheme: &str, path: &str, query: &QueryParams) -> Result<Self, AddressError> {
        let path = path.trim_matches('/');
        let mut text = format!("{scheme}://{path}");
        if !query.is_empty() {
            text.push('?');
            text.push_str(&query.to_query_string());
        }
        Self::parse(&text)
    }

    fn from_url(url: Url) -> Self {
        let mut path = url.host_str().unwrap_or_default().to_string();
        let rest = url.path().trim_matches('/');
        if !rest.is_empty() {
            if !path.is_empty() {
                path.push('/');
            }
            path.push_str(rest);
        }

        let query = url
            .query()
            .map(QueryParams::from_query_string)
            .unwrap_or_default();

        Self { url, path, query }
    }

    /// Scheme, lower-cased (e.g. `app`).
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Hierarchical path without leading or trailing `/`.
    ///
    /// Segments stay percent-encoded as written.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path segments, skipping empty ones.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }

    /// Decoded query parameters.
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Fragment after `#`, if any.
    pub fn fragment(&self) -> Option<&str> {
        self.url.fragment()
    }

    /// Normalized textual form.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Address").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Address {
    type Error = AddressError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
