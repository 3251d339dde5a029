//! Page language detection
//!
//! Signals are checked in a fixed order: the `<html lang>` attribute, then
//! language hints in the address, then script counts in the body text, then a
//! few German marker words. Anything else is English.

use serde::{Deserialize, Serialize};

use super::Locale;

/// Characters of one script needed before the body text counts as that language
const SCRIPT_COUNT_THRESHOLD: usize = 100;

const GERMAN_MARKER_WORDS: &[&str] = &["Herunterladen", "Spielen", "Installieren"];

/// Collects the inputs of [`detect_locale`] from the listing tab
pub const LANGUAGE_HINTS_SCRIPT: &str = r#"
    (() => ({
        html_lang: document.documentElement.lang || '',
        url: window.location.href,
        body_text: (document.body && document.body.textContent) || ''
    }))()
"#;

/// Raw language signals read from a page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageLanguageHints {
    pub html_lang: String,
    pub url: String,
    pub body_text: String,
}

#[must_use]
pub fn detect_locale(hints: &PageLanguageHints) -> Locale {
    let html_lang = hints.html_lang.to_lowercase();
    if !html_lang.is_empty() {
        match Locale::from_tag(&html_lang) {
            Some(Locale::En) | None => {}
            Some(locale) => return locale,
        }
    }

    for locale in [Locale::Zh, Locale::Ja, Locale::De] {
        let code = locale.code();
        if hints.url.contains(&format!("/{code}/")) || hints.url.contains(&format!("?lang={code}"))
        {
            return locale;
        }
    }

    let han = hints.body_text.chars().filter(|c| is_han(*c)).count();
    if han > SCRIPT_COUNT_THRESHOLD {
        return Locale::Zh;
    }
    let kana = hints.body_text.chars().filter(|c| is_kana(*c)).count();
    if kana > SCRIPT_COUNT_THRESHOLD {
        return Locale::Ja;
    }

    if GERMAN_MARKER_WORDS
        .iter()
        .any(|word| hints.body_text.contains(word))
    {
        return Locale::De;
    }

    Locale::En
}

fn is_han(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

fn is_kana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c) || ('\u{30A0}'..='\u{30FF}').contains(&c)
}
