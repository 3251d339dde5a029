//! Localization provider
//!
//! Maps a detected page locale to the user-facing strings shown by the
//! control surface. Unsupported locales fall back to English.

mod catalog;
pub mod detect;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub use detect::{LANGUAGE_HINTS_SCRIPT, PageLanguageHints, detect_locale};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\d+)\}").expect("placeholder pattern is valid"));

/// Supported display locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
    Ja,
    De,
}

impl Locale {
    /// Resolve a BCP 47-ish tag (`zh-CN`, `de`, `ja_JP`) by its language prefix
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_lowercase();
        if tag.starts_with("zh") {
            Some(Self::Zh)
        } else if tag.starts_with("ja") {
            Some(Self::Ja)
        } else if tag.starts_with("de") {
            Some(Self::De)
        } else if tag.starts_with("en") {
            Some(Self::En)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
            Self::Ja => "ja",
            Self::De => "de",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| format!("Unsupported locale: {s}"))
    }
}

/// The fixed set of message keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    ButtonText,
    DownloadingAlert,
    NoModsFound,
    ConfirmDownload,
    DownloadComplete,
    DownloadError,
    ProgressStatus,
}

/// Message lookup bound to one locale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Localized text for `key` with `{n}` placeholders filled from `args`
    #[must_use]
    pub fn text(&self, key: MessageKey, args: &[&dyn fmt::Display]) -> String {
        format_message(catalog::template(self.locale, key), args)
    }
}

/// Replace `{n}` with the n-th argument; indices without an argument stay verbatim
#[must_use]
pub fn format_message(template: &str, args: &[&dyn fmt::Display]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| args.get(index))
                .map_or_else(|| caps[0].to_string(), ToString::to_string)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_arguments_keep_placeholder() {
        assert_eq!(format_message("{0}/{1}", &[&3]), "3/{1}");
        assert_eq!(format_message("{0}{0}", &[&"a"]), "aa");
    }

    #[test]
    fn locale_tags_resolve_by_prefix() {
        assert_eq!(Locale::from_tag("zh-CN"), Some(Locale::Zh));
        assert_eq!(Locale::from_tag("DE"), Some(Locale::De));
        assert_eq!(Locale::from_tag("fr"), None);
        assert_eq!("ja_JP".parse::<Locale>(), Ok(Locale::Ja));
    }
}
