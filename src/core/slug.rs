//! Slug derivation and validation
//!
//! Slugs are lowercase, hyphen-separated derivations of display names and
//! address entities anywhere an ID is accepted.

/// Derive a slug from a display name.
///
/// Lowercases, maps whitespace and underscores to hyphens, drops every other
/// non-alphanumeric character, and collapses hyphen runs.
///
/// # Examples
/// ```
/// use osb::core::slug::slugify;
///
/// assert_eq!(slugify("Visual Studio Code"), "visual-studio-code");
/// assert_eq!(slugify("E-Commerce / Payments"), "e-commerce-payments");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true; // swallow leading hyphens

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if (ch.is_whitespace() || ch == '-' || ch == '_' || ch == '/') && !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    // Trim a trailing hyphen left by trailing separators/punctuation
    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Check that a string is already in canonical slug form
pub fn is_valid_slug(s: &str) -> bool {
    !s.is_empty() && s == slugify(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Shopify"), "shopify");
        assert_eq!(slugify("Google Analytics"), "google-analytics");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("Real - Time   Collaboration"), "real-time-collaboration");
        assert_eq!(slugify("e_commerce"), "e-commerce");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Notion (workspace)"), "notion-workspace");
        assert_eq!(slugify("CI/CD"), "ci-cd");
    }

    #[test]
    fn test_slugify_trims_edges() {
        assert_eq!(slugify("  Draft!  "), "draft");
        assert_eq!(slugify("--x--"), "x");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("visual-studio-code"));
        assert!(!is_valid_slug("Visual Studio Code"));
        assert!(!is_valid_slug(""));
    }
}
