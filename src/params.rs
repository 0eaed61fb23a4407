//! Address parameters.
//!
//! Two collections travel with every navigation:
//!
//! - [`QueryParams`]: the decoded `?key=value&...` part of an
//!   [`Address`](crate::Address). Keys may repeat; every value is kept in
//!   arrival order and the single-value accessor [`get`](QueryParams::get)
//!   returns the **first** one.
//! - [`RouteParams`]: segments captured by a [`ViewRegistry`](crate::ViewRegistry)
//!   pattern such as `customers/:id`, percent-decoded like query values.
//!
//! # Example
//!
//! ```
//! use region_navigator::{QueryParams, RouteParams};
//!
//! let query = QueryParams::from_query_string("page=2&tag=a&tag=b");
//! assert_eq!(query.get_as::<u32>("page"), Some(2));
//! assert_eq!(query.get("tag"), Some("a"));
//!
//! let mut params = RouteParams::new();
//! params.insert("id", "123");
//! assert_eq!(params.get_as::<u64>("id"), Some(123));
//! ```

use std::collections::HashMap;

/// Segments captured from a registry pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    /// Create empty route parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Get a parameter and parse it as `T`.
    ///
    /// Returns `None` if the parameter doesn't exist or cannot be parsed.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    /// Insert or overwrite a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Iterate over all `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }
}

/// Decoded query string of an address.
///
/// Order of distinct keys is not significant. Values of a repeated key keep
/// their arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: HashMap<String, Vec<String>>,
}

impl QueryParams {
    /// Create empty query parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (without the leading `?`).
    ///
    /// Uses `application/x-www-form-urlencoded` rules: pairs are split on
    /// `&`, percent escapes are decoded and `+` becomes a space. A pair with
    /// no `=` yields an empty value.
    pub fn from_query_string(query: &str) -> Self {
        let mut params = Self::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            params.insert(key.into_owned(), value.into_owned());
        }
        params
    }

    /// Get the first value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key)?.first().map(String::as_str)
    }

    /// Get every value for a key, in arrival order.
    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        self.params.get(key).map(Vec::as_slice)
    }

    /// Get the first value for a key, parsed as `T`.
    ///
    /// Returns `None` if the key is missing or the value cannot be parsed.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.get(key)?.parse().ok()
    }

    /// Append a value for the given key.
    ///
    /// If the key already exists, the new value is added after the existing ones.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.entry(key.into()).or_default().push(value.into());
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Iterate over keys and their first value.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .filter_map(|(k, v)| v.first().map(|first| (k.as_str(), first.as_str())))
    }

    /// Serialize back into a query string.
    ///
    /// Keys are emitted in sorted order so equal collections serialize
    /// identically.
    pub fn to_query_string(&self) -> String {
        let mut keys: Vec<&String> = self.params.keys().collect();
        keys.sort();

        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for key in keys {
            for value in &self.params[key] {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Return the number of distinct keys.
    pub fn len(&self) -> usize {
        self.params.len()
    }
}
