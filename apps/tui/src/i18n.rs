use serde::{Deserialize, Serialize};

/// Display language of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ar,
    En,
}

impl Language {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "ar" | "arabic" => Some(Self::Ar),
            "en" | "english" => Some(Self::En),
            _ => None,
        }
    }

    pub const fn toggle(self) -> Self {
        match self {
            Self::Ar => Self::En,
            Self::En => Self::Ar,
        }
    }

    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Ar)
    }

    /// Label for the button that switches away from this language.
    pub const fn toggle_label(self) -> &'static str {
        match self {
            Self::Ar => "English",
            Self::En => "عربي",
        }
    }

    /// Picks static UI copy for this language.
    pub const fn pick<'a>(self, ar: &'a str, en: &'a str) -> &'a str {
        match self {
            Self::Ar => ar,
            Self::En => en,
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

/// Resolves a bilingual field pair to display text.
///
/// `primary` is conventionally the Arabic value and `fallback` the `_en`
/// counterpart. Arabic prefers `primary`, English prefers `fallback`, and
/// either falls back to the other side. Empty strings count as absent.
pub fn resolve(language: Language, primary: Option<&str>, fallback: Option<&str>) -> String {
    let (preferred, other) = match language {
        Language::Ar => (primary, fallback),
        Language::En => (fallback, primary),
    };

    present(preferred)
        .or_else(|| present(other))
        .unwrap_or_default()
        .to_string()
}

/// Shorthand for the common case where the Arabic side is always present.
pub fn localize(language: Language, ar: &str, en: Option<&String>) -> String {
    resolve(language, Some(ar), en.map(String::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arabic_prefers_primary() {
        assert_eq!(resolve(Language::Ar, Some("خالد"), Some("Khalid")), "خالد");
    }

    #[test]
    fn english_prefers_fallback() {
        assert_eq!(resolve(Language::En, Some("خالد"), Some("Khalid")), "Khalid");
    }

    #[test]
    fn missing_side_falls_back_to_other_language() {
        assert_eq!(resolve(Language::En, Some("خالد"), None), "خالد");
        assert_eq!(resolve(Language::Ar, None, Some("Khalid")), "Khalid");
    }

    #[test]
    fn empty_counts_as_absent() {
        assert_eq!(resolve(Language::En, Some("خالد"), Some("")), "خالد");
        assert_eq!(resolve(Language::Ar, Some(""), Some("Khalid")), "Khalid");
    }

    #[test]
    fn both_absent_resolves_to_empty() {
        assert_eq!(resolve(Language::Ar, None, None), "");
        assert_eq!(resolve(Language::En, Some(""), None), "");
    }

    #[test]
    fn non_empty_input_always_yields_non_empty_output() {
        let samples = [None, Some(""), Some("x")];
        for language in [Language::Ar, Language::En] {
            for primary in samples {
                for fallback in samples {
                    let any_present = [primary, fallback]
                        .iter()
                        .any(|value| value.is_some_and(|text| !text.is_empty()));
                    let resolved = resolve(language, primary, fallback);
                    assert_eq!(!resolved.is_empty(), any_present);
                }
            }
        }
    }

    #[test]
    fn parse_and_toggle() {
        assert_eq!(Language::parse(" EN "), Some(Language::En));
        assert_eq!(Language::parse("arabic"), Some(Language::Ar));
        assert_eq!(Language::parse("fr"), None);
        assert_eq!(Language::Ar.toggle(), Language::En);
        assert!(Language::Ar.is_rtl());
        assert!(!Language::En.is_rtl());
    }
}
