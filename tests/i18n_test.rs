//! Localized messages and page language detection

use kodegen_tools_bulkdl::i18n::{Locale, MessageKey, Messages, PageLanguageHints, detect_locale};

fn hints(html_lang: &str, url: &str, body_text: &str) -> PageLanguageHints {
    PageLanguageHints {
        html_lang: html_lang.to_string(),
        url: url.to_string(),
        body_text: body_text.to_string(),
    }
}

#[test]
fn every_locale_has_every_message() {
    let keys = [
        MessageKey::ButtonText,
        MessageKey::DownloadingAlert,
        MessageKey::NoModsFound,
        MessageKey::ConfirmDownload,
        MessageKey::DownloadComplete,
        MessageKey::DownloadError,
        MessageKey::ProgressStatus,
    ];
    for locale in [Locale::En, Locale::Zh, Locale::Ja, Locale::De] {
        let messages = Messages::new(locale);
        for key in keys {
            assert!(
                !messages.text(key, &[&1, &2]).is_empty(),
                "{locale} is missing {key:?}"
            );
        }
    }
}

#[test]
fn placeholders_are_filled_in_order() {
    let en = Messages::new(Locale::En);
    assert_eq!(en.text(MessageKey::ProgressStatus, &[&2, &7]), "Progress: 2/7");
    assert_eq!(
        en.text(MessageKey::ConfirmDownload, &[&12]),
        "Found 12 mods. Start downloading?"
    );
    assert_eq!(
        en.text(MessageKey::DownloadError, &[&"browser crashed"]),
        "Error during download: browser crashed"
    );

    let zh = Messages::new(Locale::Zh);
    assert_eq!(zh.text(MessageKey::ProgressStatus, &[&1, &3]), "下载进度: 1/3");
}

#[test]
fn html_lang_wins_over_other_hints() {
    let detected = detect_locale(&hints("de-DE", "https://example.com/zh/mods", "Hello"));
    assert_eq!(detected, Locale::De);
}

#[test]
fn english_html_lang_falls_through_to_later_hints() {
    let detected = detect_locale(&hints("en", "https://example.com/ja/mods", ""));
    assert_eq!(detected, Locale::Ja);
}

#[test]
fn url_language_hints_are_recognized() {
    assert_eq!(
        detect_locale(&hints("", "https://example.com/mods?lang=zh", "")),
        Locale::Zh
    );
    assert_eq!(
        detect_locale(&hints("", "https://example.com/de/installed", "")),
        Locale::De
    );
}

#[test]
fn body_script_counts_need_more_than_a_hundred_characters() {
    let few_han = "模".repeat(100);
    assert_eq!(detect_locale(&hints("", "", &few_han)), Locale::En);

    let many_han = "模".repeat(101);
    assert_eq!(detect_locale(&hints("", "", &many_han)), Locale::Zh);

    let many_kana = "ダウンロード".repeat(20);
    assert_eq!(detect_locale(&hints("", "", &many_kana)), Locale::Ja);
}

#[test]
fn german_marker_words_select_german() {
    let detected = detect_locale(&hints("", "https://example.com", "Jetzt Herunterladen"));
    assert_eq!(detected, Locale::De);
}

#[test]
fn unknown_pages_are_english() {
    assert_eq!(detect_locale(&PageLanguageHints::default()), Locale::En);
    assert_eq!(detect_locale(&hints("fr", "https://example.com/fr/", "Bonjour")), Locale::En);
}
