use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Strip diacritics (NFD + drop combining marks) and lower-case.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Comma-separated names as written in a recipients cell.
pub fn split_raw_names(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_accents_and_case() {
        assert_eq!(normalize("José MARÍA Núñez"), "jose maria nunez");
        assert_eq!(normalize("Ñandú Çelik"), "nandu celik");
    }

    #[test]
    fn split_raw_names_drops_blanks() {
        assert_eq!(split_raw_names(" Ana , ,Luis,"), vec!["Ana", "Luis"]);
        assert!(split_raw_names("   ").is_empty());
    }
}
