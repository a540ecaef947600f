// ZIP / state sanitation shared by the rating pipeline.

/// Trim and keep at most the first five characters (ZIP+4 → ZIP).
pub fn sanitize_zip(raw: &str) -> String {
    raw.trim().chars().take(5).collect()
}

/// Trim and upper-case a two-letter state code.
pub fn sanitize_state(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// First three characters of a sanitized ZIP, the coarse income region.
pub fn zip_prefix(zip: &str) -> &str {
    match zip.char_indices().nth(3) {
        Some((idx, _)) => &zip[..idx],
        None => zip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_plus_four_is_truncated() {
        assert_eq!(sanitize_zip(" 43551-1234 "), "43551");
        assert_eq!(sanitize_zip("4355"), "4355");
        assert_eq!(sanitize_zip(""), "");
    }

    #[test]
    fn state_is_uppercased() {
        assert_eq!(sanitize_state(" oh "), "OH");
    }

    #[test]
    fn prefix_of_short_zip() {
        assert_eq!(zip_prefix("43551"), "435");
        assert_eq!(zip_prefix("43"), "43");
        assert_eq!(zip_prefix(""), "");
    }
}
