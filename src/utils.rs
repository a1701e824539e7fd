use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\r\n\f]+").expect("valid whitespace pattern"));

/// Collapses runs of HTML whitespace into a single space, the way a browser
/// renders inline text.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// Resolves a link target against the file context.
///
/// Only absolute base URLs are used for resolution; any other context (a
/// vault-relative note path, for example) leaves the href untouched.
pub(crate) fn resolve_href(file_context: &str, href: &str) -> String {
    if Url::parse(href).is_ok() || href.starts_with('#') {
        return href.to_string();
    }
    match Url::parse(file_context) {
        Ok(base) if !base.cannot_be_a_base() => base
            .join(href)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| href.to_string()),
        _ => href.to_string(),
    }
}
