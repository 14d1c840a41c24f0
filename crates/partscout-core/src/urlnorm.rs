//! Link resolution for scraped URL fragments.

use url::Url;

/// Resolves a possibly-relative `fragment` against `base_url`.
///
/// Pure string rules, no network access:
/// - a fragment with a scheme is returned unchanged;
/// - `//cdn.example/img.png` gets an `https:` prefix;
/// - `/path` hangs off the base URL's origin;
/// - anything else is appended as a path segment under the base.
#[must_use]
pub fn resolve_url(fragment: &str, base_url: &str) -> String {
    let fragment = fragment.trim();
    if fragment.is_empty() {
        return String::new();
    }
    if has_scheme(fragment) {
        return fragment.to_owned();
    }
    if let Some(rest) = fragment.strip_prefix("//") {
        return format!("https://{rest}");
    }
    if fragment.starts_with('/') {
        return format!("{}{fragment}", origin(base_url));
    }
    format!("{}/{fragment}", base_url.trim_end_matches('/'))
}

fn has_scheme(fragment: &str) -> bool {
    fragment.find("://").is_some_and(|idx| {
        idx > 0
            && fragment[..idx]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// `scheme://host[:port]` of `base_url`. Falls back to the trimmed base
/// when it does not parse — the resolver must not fail on a bad base.
fn origin(base_url: &str) -> String {
    if let Ok(url) = Url::parse(base_url) {
        if let Some(host) = url.host_str() {
            return match url.port() {
                Some(port) => format!("{}://{host}:{port}", url.scheme()),
                None => format!("{}://{host}", url.scheme()),
            };
        }
    }
    base_url.trim_end_matches('/').to_owned()
}
