//! Link normalization
//!
//! Best effort: a link that cannot be parsed is still saved.

use url::Url;

/// Normalize a user-entered link
///
/// - empty stays empty
/// - a missing `http://` / `https://` prefix (any case) becomes `https://`
/// - parseable URLs come back in canonical form, others unchanged
pub fn normalize_url(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let candidate = if has_http_scheme(raw) {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    match Url::parse(&candidate) {
        Ok(url) => url.to_string(),
        Err(err) => {
            tracing::debug!(link = %candidate, error = %err, "link did not parse, keeping as entered");
            candidate
        }
    }
}

fn has_http_scheme(s: &str) -> bool {
    let starts = |prefix: &str| {
        s.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };
    starts("http://") || starts("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(normalize_url(""), "");
    }

    #[test]
    fn test_adds_https() {
        assert_eq!(normalize_url("example.com/a"), "https://example.com/a");
    }

    #[test]
    fn test_bare_host_gets_root_path() {
        assert_eq!(normalize_url("example.com"), "https://example.com/");
    }

    #[test]
    fn test_keeps_http() {
        assert_eq!(normalize_url("http://example.com/x"), "http://example.com/x");
    }

    #[test]
    fn test_scheme_case_insensitive() {
        assert_eq!(normalize_url("HTTPS://Example.COM/Path"), "https://example.com/Path");
    }

    #[test]
    fn test_unparseable_returned_prefixed() {
        assert_eq!(normalize_url("not a url"), "https://not a url");
    }

    #[test]
    fn test_other_scheme_gets_prefixed() {
        // "ftp://host" is not http(s), so it is treated as a host-ish string
        let out = normalize_url("ftp://host");
        assert!(out.starts_with("https://"));
    }

    #[test]
    fn test_multibyte_input_does_not_panic() {
        assert!(normalize_url("ü").starts_with("https://"));
    }
}
