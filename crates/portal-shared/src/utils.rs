//! Utility functions

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[^a-z0-9-]").expect("static slug pattern"))
}

fn hyphen_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("-+").expect("static hyphen pattern"))
}

/// URL-friendly slug: `"Profil Organisasi"` becomes `"profil-organisasi"`.
///
/// Accents are folded (`é` to `e`); remaining characters outside `[a-z0-9-]`
/// are dropped.
pub fn normalize_slug(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let folded: String = input
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    let hyphenated = folded.replace(' ', "-");
    let cleaned = disallowed_chars().replace_all(&hyphenated, "");
    let collapsed = hyphen_runs().replace_all(&cleaned, "-");
    collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_slug() {
        assert_eq!(normalize_slug("Profil Organisasi"), "profil-organisasi");
        assert_eq!(normalize_slug("  Agenda & Kegiatan  "), "agenda-kegiatan");
        assert_eq!(normalize_slug("--Berita--Terbaru--"), "berita-terbaru");
        assert_eq!(normalize_slug(""), "");
    }

    #[test]
    fn test_normalize_slug_folds_accents() {
        assert_eq!(normalize_slug("Café"), "cafe");
        assert_eq!(normalize_slug("Café Naïve"), "cafe-naive");
        assert_eq!(normalize_slug("Kegiatan Ñusantara 2024"), "kegiatan-nusantara-2024");
    }

    #[test]
    fn test_normalize_slug_drops_unfoldable_characters() {
        assert_eq!(normalize_slug("Berita 日本 Terkini"), "berita-terkini");
    }
}
