//! URL slug derivation

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_]+").expect("valid slug regex"));

/// Derive a slug from a title or name.
///
/// Accents are folded ("Análisis" -> "analisis"), every run of whitespace or
/// non-word characters becomes a single hyphen, and leading/trailing hyphens
/// are trimmed.
pub fn slugify(text: &str) -> String {
    let folded: String = text
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    NON_WORD
        .replace_all(&folded, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_title() {
        assert_eq!(slugify("Informe X"), "informe-x");
    }

    #[test]
    fn test_collapses_punctuation_runs() {
        assert_eq!(slugify("  Elecciones 2025: ¿qué pasó?  "), "elecciones-2025-que-paso");
    }

    #[test]
    fn test_folds_accents_and_enye() {
        assert_eq!(slugify("Análisis de campaña"), "analisis-de-campana");
    }

    #[test]
    fn test_keeps_underscores() {
        assert_eq!(slugify("guia_rapida v2"), "guia_rapida-v2");
    }

    #[test]
    fn test_only_symbols_gives_empty() {
        assert_eq!(slugify("!!!"), "");
    }
}
