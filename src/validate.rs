//! URL validation and normalization.

use crate::error::{ScanError, ScanResult};
use url::Url;

/// Normalize a user-supplied string into an absolute http(s) URL.
///
/// Inputs without a scheme separator get `https://` prepended, so bare
/// domains like `example.com` work. Anything that does not parse to an
/// http(s) URL with a non-empty host collapses to [`ScanError::InvalidUrl`];
/// the distinction between malformed and wrong-scheme survives only in the
/// message text.
pub fn validate(input: &str) -> ScanResult<Url> {
    let candidate = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{input}")
    };

    let parsed = Url::parse(&candidate)
        .map_err(|e| ScanError::InvalidUrl(format!("{input} ({e})")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ScanError::InvalidUrl(format!(
            "{input} (scheme {:?} is not http or https)",
            parsed.scheme()
        )));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ScanError::InvalidUrl(format!("{input} (missing host)")));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_domain_gets_https() {
        let url = validate("example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_explicit_http_kept() {
        let url = validate("http://example.com/login").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.path(), "/login");
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            validate("not a url"),
            Err(ScanError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_disallowed_scheme_rejected() {
        assert!(matches!(
            validate("ftp://x.com"),
            Err(ScanError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_missing_host_rejected() {
        // `file` scheme fails earlier; an http URL with an empty host
        // does not even parse, so this collapses at the parse step.
        assert!(matches!(validate("https://"), Err(ScanError::InvalidUrl(_))));
    }

    #[test]
    fn test_port_and_ip_accepted() {
        let url = validate("127.0.0.1:8080").unwrap();
        assert_eq!(url.as_str(), "https://127.0.0.1:8080/");
    }
}
