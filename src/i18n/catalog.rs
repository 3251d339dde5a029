use super::{Locale, MessageKey};

pub(super) fn template(locale: Locale, key: MessageKey) -> &'static str {
    use MessageKey::*;

    match (locale, key) {
        (Locale::En, ButtonText) => "Download All Mods",
        (Locale::En, DownloadingAlert) => "Download is in progress, please wait...",
        (Locale::En, NoModsFound) => "No mods found! Please make sure the page is fully loaded.",
        (Locale::En, ConfirmDownload) => "Found {0} mods. Start downloading?",
        (Locale::En, DownloadComplete) => "All mods download completed!",
        (Locale::En, DownloadError) => "Error during download: {0}",
        (Locale::En, ProgressStatus) => "Progress: {0}/{1}",

        (Locale::Zh, ButtonText) => "一键下载所有模组",
        (Locale::Zh, DownloadingAlert) => "下载正在进行中，请等待完成...",
        (Locale::Zh, NoModsFound) => "未找到可下载的模组！请确保页面已完全加载。",
        (Locale::Zh, ConfirmDownload) => "找到 {0} 个模组，是否开始下载？",
        (Locale::Zh, DownloadComplete) => "所有模组下载完成！",
        (Locale::Zh, DownloadError) => "下载过程中出现错误: {0}",
        (Locale::Zh, ProgressStatus) => "下载进度: {0}/{1}",

        (Locale::Ja, ButtonText) => "全てのMODをダウンロード",
        (Locale::Ja, DownloadingAlert) => "ダウンロード進行中です。お待ちください...",
        (Locale::Ja, NoModsFound) => {
            "MODが見つかりません！ページが完全に読み込まれていることを確認してください。"
        }
        (Locale::Ja, ConfirmDownload) => "{0}個のMODが見つかりました。ダウンロードを開始しますか？",
        (Locale::Ja, DownloadComplete) => "全てのMODのダウンロードが完了しました！",
        (Locale::Ja, DownloadError) => "ダウンロード中にエラーが発生しました: {0}",
        (Locale::Ja, ProgressStatus) => "進捗状況: {0}/{1}",

        (Locale::De, ButtonText) => "Alle Mods herunterladen",
        (Locale::De, DownloadingAlert) => "Download läuft, bitte warten...",
        (Locale::De, NoModsFound) => {
            "Keine Mods gefunden! Bitte stellen Sie sicher, dass die Seite vollständig geladen ist."
        }
        (Locale::De, ConfirmDownload) => "{0} Mods gefunden. Download starten?",
        (Locale::De, DownloadComplete) => "Download aller Mods abgeschlossen!",
        (Locale::De, DownloadError) => "Fehler beim Download: {0}",
        (Locale::De, ProgressStatus) => "Fortschritt: {0}/{1}",
    }
}
