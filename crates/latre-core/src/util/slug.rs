//! Slug generation for file names derived from contact display names.
//!
//! ## Summary
//! Exported contacts are written one file per record, named after a
//! representative display name. Slugs keep letters and digits from any
//! script so that non-ASCII names stay readable on disk.

/// Fallback stem used when a name yields no usable characters.
pub const FALLBACK_SLUG: &str = "contact";

/// Generate a file-system safe slug from a display name.
///
/// Lowercases, replaces every run of non-alphanumeric characters with a
/// single hyphen and trims edge hyphens.
///
/// Examples:
/// - "John Doe" -> "john-doe"
/// - "+84 912 345" -> "84-912-345"
/// - "Nguyễn Hồng Quân" -> "nguyễn-hồng-quân"
#[must_use]
pub fn generate_slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Like [`generate_slug`], but never returns an empty string.
#[must_use]
pub fn slug_or_fallback(name: &str) -> String {
    let slug = generate_slug(name);
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}
