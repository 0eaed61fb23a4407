//! Segment-based path patterns.
//!
//! Patterns are matched against [`Address::path`](crate::Address::path)
//! one `/`-separated segment at a time:
//!
//! - `literal`: must equal the path segment exactly
//! - `:name`: matches any single segment and captures it as `name`
//! - `*` / `*name`: as the **last** pattern segment, matches the remaining
//!   segments (possibly none); the named form captures them joined by `/`.
//!   Anywhere else a `*` segment is an ordinary literal.
//!
//! Every path segment must be consumed unless the pattern ends in a wildcard.
//! Path segments are percent-decoded before comparison, so captures hold
//! the same decoded text as [`QueryParams`](crate::QueryParams) values.

use crate::params::RouteParams;
use percent_encoding::percent_decode_str;

/// Match `path` against `pattern`, returning captured segments.
///
/// # Examples
///
/// ```
/// use region_navigator::matching::match_pattern;
///
/// let params = match_pattern("customers/:id", "customers/42").unwrap();
/// assert_eq!(params.get("id"), Some("42"));
///
/// assert!(match_pattern("customers/:id", "customers").is_none());
/// assert!(match_pattern("customers/:id", "customers/42/orders").is_none());
///
/// let params = match_pattern("docs/*rest", "docs/guide/intro").unwrap();
/// assert_eq!(params.get("rest"), Some("guide/intro"));
///
/// let params = match_pattern("customers/:name", "customers/John%20Doe").unwrap();
/// assert_eq!(params.get("name"), Some("John Doe"));
/// ```
pub fn match_pattern(pattern: &str, path: &str) -> Option<RouteParams> {
    let pattern_segments = split_path(pattern);
    let path_segments: Vec<String> = split_path(path)
        .into_iter()
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
        .collect();

    let tail = pattern_segments
        .last()
        .copied()
        .filter(|segment| is_wildcard_segment(segment));
    let fixed = if tail.is_some() {
        &pattern_segments[..pattern_segments.len() - 1]
    } else {
        &pattern_segments[..]
    };

    // Quick reject on segment counts.
    if path_segments.len() < fixed.len() || (tail.is_none() && path_segments.len() != fixed.len()) {
        return None;
    }

    let mut params = RouteParams::new();

    for (pattern_seg, path_seg) in fixed.iter().zip(&path_segments) {
        if let Some(name) = extract_param_name(pattern_seg) {
            params.insert(name, path_seg.as_str());
        } else if *pattern_seg != path_seg.as_str() {
            return None;
        }
    }

    if let Some(name) = tail.map(|segment| &segment[1..]).filter(|name| !name.is_empty()) {
        params.insert(name, path_segments[fixed.len()..].join("/"));
    }

    Some(params)
}

/// Split a path into segments, filtering empty segments
///
/// # Examples
///
/// ```
/// use region_navigator::matching::split_path;
///
/// assert_eq!(split_path("/users/123"), vec!["users", "123"]);
/// assert!(split_path("/").is_empty());
/// assert_eq!(split_path("users/"), vec!["users"]);
/// ```
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Extract parameter name from a `:name` segment
pub fn extract_param_name(segment: &str) -> Option<&str> {
    segment.strip_prefix(':').filter(|name| !name.is_empty())
}

/// Check if a segment is a parameter
pub fn is_param_segment(segment: &str) -> bool {
    extract_param_name(segment).is_some()
}

/// Check if a segment is a wildcard
pub fn is_wildcard_segment(segment: &str) -> bool {
    segment.starts_with('*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("users/123/profile"), vec!["users", "123", "profile"]);
        assert_eq!(split_path(""), Vec::<&str>::new());
        assert_eq!(split_path("//users//"), vec!["users"]);
    }

    #[test]
    fn test_literal_match() {
        assert!(match_pattern("customers", "customers").unwrap().is_empty());
        assert!(match_pattern("customers", "products").is_none());
        assert!(match_pattern("/customers/", "customers").is_some());
    }

    #[test]
    fn test_empty_pattern_matches_only_empty_path() {
        assert!(match_pattern("", "").is_some());
        assert!(match_pattern("", "customers").is_none());
    }

    #[test]
    fn test_param_capture() {
        let params = match_pattern("licenses/:product/:key", "licenses/tp/ABC-1").unwrap();
        assert_eq!(params.get("product"), Some("tp"));
        assert_eq!(params.get("key"), Some("ABC-1"));
    }

    #[test]
    fn test_unnamed_wildcard() {
        let params = match_pattern("reports/*", "reports/2024/q1").unwrap();
        assert!(params.is_empty());
        assert!(match_pattern("reports/*", "reports").is_some());
        assert!(match_pattern("reports/*", "other/2024").is_none());
    }

    #[test]
    fn test_named_wildcard_empty_rest() {
        let params = match_pattern("docs/*rest", "docs").unwrap();
        assert_eq!(params.get("rest"), Some(""));
    }

    #[test]
    fn test_inner_star_is_literal() {
        assert!(match_pattern("a/*/b", "a/x/c").is_none());
        assert!(match_pattern("a/*/b", "a/x/b").is_none());
        assert!(match_pattern("a/*/b", "a/*/b").is_some());
    }

    #[test]
    fn test_captures_are_percent_decoded() {
        let params = match_pattern("customers/:id", "customers/John%20Doe").unwrap();
        assert_eq!(params.get("id"), Some("John Doe"));

        let params = match_pattern("files/*path", "files/a%2Fb/c+d").unwrap();
        assert_eq!(params.get("path"), Some("a/b/c+d"));

        assert!(match_pattern("caf\u{e9}", "caf%C3%A9").is_some());
    }

    #[test]
    fn test_segment_helpers() {
        assert_eq!(extract_param_name(":id"), Some("id"));
        assert_eq!(extract_param_name(":"), None);
        assert_eq!(extract_param_name("users"), None);
        assert!(is_param_segment(":userId"));
        assert!(!is_param_segment("users"));
        assert!(is_wildcard_segment("*"));
        assert!(is_wildcard_segment("*path"));
        assert!(!is_wildcard_segment(":id"));
    }
}
