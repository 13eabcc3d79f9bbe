// Accent- and case-insensitive text folding for course name matching

use unicode_normalization::UnicodeNormalization;

const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Lower-case, decompose (NFD) and drop combining diacritical marks.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "Café",
        "CAFÉ con LECHE",
        "Programación Orientada a Objetos",
        "Ñandú",
        "Über Straße",
        "e\u{0301}cole",
        "Cálculo Diferencial - Grupo B",
        "plain ascii 123",
    ];

    #[test]
    fn test_strips_accents_and_case() {
        assert_eq!(normalize("Café"), "cafe");
        assert_eq!(normalize("PROGRAMACIÓN"), "programacion");
        assert_eq!(normalize("Ñandú"), "nandu");
        assert_eq!(normalize("e\u{0301}cole"), "ecole");
    }

    #[test]
    fn test_idempotent() {
        for s in SAMPLES {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_no_combining_marks_remain() {
        for s in SAMPLES {
            assert!(
                !normalize(s).chars().any(|c| COMBINING_MARKS.contains(&c)),
                "combining mark left in {:?}",
                s
            );
        }
    }
}
