//! Slug derivation for news post titles.

/// Slug used when a title has no ASCII alphanumerics at all.
pub const FALLBACK_SLUG: &str = "post";

/// Derive a URL slug from a title.
///
/// Lowercases ASCII letters, drops every character that is not an ASCII
/// alphanumeric, whitespace or `-`, and collapses runs of whitespace and
/// hyphens into a single `-`. Leading and trailing hyphens are trimmed.
///
/// `slugify(&slugify(t)) == slugify(t)` for every input.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' {
            pending_dash = true;
        }
        // Everything else (punctuation, non-ASCII) is stripped.
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}
