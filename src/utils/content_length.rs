//! Content length extraction utilities.
//!
//! A transfer's expected size comes from the response headers. `Content-Range`
//! totals win over `Content-Length`, since a ranged response's length only
//! covers the returned slice.

use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_RANGE};

/// Returns the declared total size of the resource, if any.
///
/// # Example
///
/// ```rust
/// use harvester::utils::declared_length;
/// use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};
///
/// let mut headers = HeaderMap::new();
/// headers.insert(CONTENT_LENGTH, HeaderValue::from_static("2048"));
/// assert_eq!(declared_length(&headers), Some(2048));
/// assert_eq!(declared_length(&HeaderMap::new()), None);
/// ```
pub fn declared_length(headers: &HeaderMap) -> Option<u64> {
    if let Some(total) = headers
        .get(CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_content_range_total)
    {
        return Some(total);
    }
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

/// Parse Content-Range header to extract total size.
///
/// Content-Range header format: "bytes start-end/total". An unknown total
/// (`*`) yields `None`.
///
/// ```rust
/// use harvester::utils::parse_content_range_total;
///
/// assert_eq!(parse_content_range_total("bytes 0-1023/2048"), Some(2048));
/// assert_eq!(parse_content_range_total("bytes 0-1023/*"), None);
/// ```
pub fn parse_content_range_total(content_range: &str) -> Option<u64> {
    let (_, total) = content_range.rsplit_once('/')?;
    total.trim().parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("bytes 0-1023/2048"), Some(2048));
        assert_eq!(parse_content_range_total("bytes 200-1023/5000"), Some(5000));
        assert_eq!(parse_content_range_total("bytes 0-0/1"), Some(1));
        assert_eq!(parse_content_range_total("invalid"), None);
        assert_eq!(parse_content_range_total("bytes 0-1023"), None);
        assert_eq!(parse_content_range_total(""), None);
    }

    #[test]
    fn test_parse_content_range_total_edge_cases() {
        // Test with whitespace
        assert_eq!(parse_content_range_total("bytes 0-1023/ 2048 "), Some(2048));
        // Test with zero size
        assert_eq!(parse_content_range_total("bytes 0-0/0"), Some(0));
        assert_eq!(parse_content_range_total("bytes */*"), None);
    }

    #[test]
    fn test_declared_length_prefers_content_range() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("1"));
        headers.insert(CONTENT_RANGE, HeaderValue::from_static("bytes 0-0/4096"));
        assert_eq!(declared_length(&headers), Some(4096));
    }

    #[test]
    fn test_declared_length_invalid_header() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("lots"));
        assert_eq!(declared_length(&headers), None);
    }
}
