//! Lenient name matching shared by the `FromStr` impls.

/// Lowercase, trim, and fold `_` and spaces into `-`.
///
/// `"Floyd_Steinberg"`, `" floyd steinberg "` and `"FLOYD-STEINBERG"` all
/// normalize to `"floyd-steinberg"`.
pub(crate) fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Floyd_Steinberg"), "floyd-steinberg");
        assert_eq!(normalize("  edge enhance "), "edge-enhance");
        assert_eq!(normalize("BICUBIC"), "bicubic");
        assert_eq!(normalize(""), "");
    }
}
