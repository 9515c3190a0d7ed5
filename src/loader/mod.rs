//! データ読み込み
//!
//! 取得元（URL or ローカルCSV）→ CSV解析 → 列推定 → 作業セット

mod csv_rows;
mod fetch;

pub use csv_rows::parse_csv;
pub use fetch::fetch_csv;

use crate::config::Config;
use crate::error::{Result, SesBoardError};
use indicatif::{ProgressBar, ProgressStyle};
use ses_board_common::{map_rows, resolve_headers, HeaderReport, Listing, RawRow};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CSVの取得元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// 引数を解釈する（http(s)で始まればURL、それ以外はファイル）
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
            Source::Url(trimmed.to_string())
        } else {
            Source::File(PathBuf::from(trimmed))
        }
    }

    /// 指定がなければ設定のURL
    pub fn resolve(value: Option<&str>, config: &Config) -> Self {
        match value {
            Some(v) => Self::parse(v),
            None => Source::Url(config.sheet_url()),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{}", url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// 1回分の読み込み結果（再読み込みで丸ごと置き換える）
#[derive(Debug, Clone)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
    pub listings: Vec<Listing>,
    pub report: HeaderReport,
}

impl Dataset {
    /// 解析済みの行から作業セットを組み立てる
    pub fn from_rows(headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        let report = resolve_headers(headers.iter().map(String::as_str));
        let listings = map_rows(&rows);
        Self {
            headers,
            rows,
            listings,
            report,
        }
    }

    pub fn find(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }
}

/// 取得元からCSV本文を読む
pub async fn read_source(source: &Source, timeout_seconds: u64) -> Result<String> {
    match source {
        Source::Url(url) => {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("データを取得中...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let result = fetch_csv(url, timeout_seconds).await;
            spinner.finish_and_clear();
            result
        }
        Source::File(path) => read_file(path),
    }
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(SesBoardError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// CSV本文から作業セットを作る
pub fn load_from_str(content: &str, origin: &str) -> Result<Dataset> {
    let (headers, rows) = parse_csv(content)?;
    if rows.is_empty() {
        return Err(SesBoardError::EmptyDataset(origin.to_string()));
    }

    let dataset = Dataset::from_rows(headers, rows);
    log_header_diagnostics(&dataset.report);
    tracing::info!(
        rows = dataset.rows.len(),
        listings = dataset.listings.len(),
        "作業セットを構築"
    );

    Ok(dataset)
}

/// 取得元から作業セットを作る
pub async fn load_dataset(source: &Source, timeout_seconds: u64) -> Result<Dataset> {
    let content = read_source(source, timeout_seconds).await?;
    load_from_str(&content, &source.to_string())
}

fn log_header_diagnostics(report: &HeaderReport) {
    for field in report.missing() {
        tracing::warn!(field = %field, "該当する列が見つかりません");
    }
    for resolution in report.ambiguous() {
        tracing::warn!(
            field = %resolution.field,
            selected = resolution.selected().unwrap_or_default(),
            candidates = ?resolution.matches,
            "複数の列が該当します（先頭の列を使用）"
        );
    }
    if report.uses_positional_copy_text() {
        tracing::debug!("コピー用テキストはR列から取得");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse() {
        assert_eq!(
            Source::parse("https://example.com/a.csv"),
            Source::Url("https://example.com/a.csv".to_string())
        );
        assert_eq!(
            Source::parse("./data/list.csv"),
            Source::File(PathBuf::from("./data/list.csv"))
        );
    }

    #[test]
    fn test_source_resolve_defaults_to_config_url() {
        let config = Config {
            sheet_url: "https://example.com/sheet.csv".to_string(),
            ..Default::default()
        };
        // 環境変数で上書きされていない前提
        if std::env::var("SES_BOARD_SHEET_URL").is_err() {
            assert_eq!(
                Source::resolve(None, &config),
                Source::Url("https://example.com/sheet.csv".to_string())
            );
        }
        assert_eq!(
            Source::resolve(Some("x.csv"), &config),
            Source::File(PathBuf::from("x.csv"))
        );
    }

    #[test]
    fn test_load_from_str_empty_dataset() {
        let err = load_from_str("案件名,単金\n", "test").unwrap_err();
        assert!(matches!(err, SesBoardError::EmptyDataset(_)));
    }

    #[test]
    fn test_load_from_str_drops_untitled_rows() {
        let content = "案件番号,案件名,単金\nP-001,Java,65万\nP-002,,50万\n";
        let dataset = load_from_str(content, "test").unwrap();
        assert_eq!(dataset.rows.len(), 2);
        assert_eq!(dataset.listings.len(), 1);
        assert!(dataset.find("P-001").is_some());
        assert!(dataset.find("P-002").is_none());
    }
}
