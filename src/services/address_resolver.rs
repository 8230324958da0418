//! Address-bar input resolution.
//!
//! Typed text becomes a URL by one of three rules: explicit `http(s)://`
//! URLs pass through, anything with a dot is treated as a host, and the rest
//! is sent to the configured search engine.

use url::form_urlencoded;

/// Placeholder in the search template that receives the encoded query.
pub const QUERY_PLACEHOLDER: &str = "{}";

/// Resolves raw address-bar text. Blank input resolves to nothing.
pub fn resolve_input(input: &str, search_url: &str) -> Option<String> {
    let text = input.trim();
    if text.is_empty() {
        return None;
    }
    if text.starts_with("http://") || text.starts_with("https://") {
        return Some(text.to_string());
    }
    if text.contains('.') {
        return Some(format!("http://{}", text));
    }
    Some(search_for(text, search_url))
}

/// Fills the search template with `query`, form-urlencoded.
pub fn search_for(query: &str, search_url: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    if search_url.contains(QUERY_PLACEHOLDER) {
        search_url.replace(QUERY_PLACEHOLDER, &encoded)
    } else {
        format!("{}{}", search_url, encoded)
    }
}
