//! Path-suffix concatenation.
//!
//! The join is purely textual. A slash is inserted only when neither side
//! supplies one; when both do, the double slash is kept.

/// Append `path_suffix` to `base_url`.
pub fn build_url(base_url: &str, path_suffix: Option<&str>) -> String {
    let suffix = match path_suffix {
        Some(s) if !s.is_empty() => s,
        _ => return base_url.to_string(),
    };

    let mut url = String::with_capacity(base_url.len() + suffix.len() + 1);
    url.push_str(base_url);
    if !base_url.ends_with('/') && !suffix.starts_with('/') {
        url.push('/');
    }
    url.push_str(suffix);
    url
}
