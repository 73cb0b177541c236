//! `og:image` extraction from raw page text.
//!
//! Two restricted patterns, one per attribute order, instead of an HTML
//! parser: malformed documents that still carry a recognizable meta tag must
//! keep working.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// `property="og:image"` (or `name=`) before `content="..."`.
static PROPERTY_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?i)<meta\s[^>]*(?:property|name)\s*=\s*["']og:image["']"#,
        r#"[^>]*content\s*=\s*["']([^"']+)["'][^>]*>"#,
    ))
    .expect("og:image property-first regex must compile")
});

/// `content="..."` before `property="og:image"` (or `name=`).
static CONTENT_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?i)<meta\s[^>]*content\s*=\s*["']([^"']+)["']"#,
        r#"[^>]*(?:property|name)\s*=\s*["']og:image["'][^>]*>"#,
    ))
    .expect("og:image content-first regex must compile")
});

/// Find the first `og:image` reference in `html` and make it absolute against `base`.
///
/// Patterns are tried in order (property-first, then content-first); only the
/// first match of each is considered. A match whose value cannot be turned
/// into a URL falls through to the next pattern.
pub fn extract_og_image(html: &str, base: &Url) -> Option<Url> {
    [&*PROPERTY_FIRST, &*CONTENT_FIRST]
        .into_iter()
        .filter_map(|re| first_capture(re, html))
        .find_map(|raw| make_absolute(raw, base))
}

fn first_capture<'h>(re: &Regex, html: &'h str) -> Option<&'h str> {
    let value = re.captures(html)?.get(1)?.as_str().trim();
    (!value.is_empty()).then_some(value)
}

/// Values with a scheme are used as-is; anything else is a relative reference.
fn make_absolute(raw: &str, base: &Url) -> Option<Url> {
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => base.join(raw).ok(),
        Err(e) => {
            tracing::debug!(value = raw, error = %e, "og:image value is not a usable URL");
            None
        }
    }
}
