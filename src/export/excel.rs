//! Excel出力（CLI版）
//!
//! ブック生成は共通ライブラリ、ここではファイル名の決定と書き込みのみ。

use crate::error::Result;
use chrono::NaiveDate;
use ses_board_common::export::excel_core::generate_listing_workbook;
use ses_board_common::Listing;
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "案件一覧";

/// 既定のファイル名（`案件一覧_YYYYMMDD.xlsx`）
pub fn default_file_name(date: NaiveDate) -> String {
    format!("{}_{}.xlsx", FILE_PREFIX, date.format("%Y%m%d"))
}

/// 出力先を決める
///
/// 省略時はカレント、ディレクトリまたは拡張子なしならその中に既定名で置く。
pub fn resolve_output_path(output: Option<&Path>, date: NaiveDate) -> PathBuf {
    let file_name = default_file_name(date);
    match output {
        None => PathBuf::from(file_name),
        Some(path) if path.is_dir() || path.extension().is_none() => path.join(file_name),
        Some(path) => path.to_path_buf(),
    }
}

/// 案件一覧をxlsxに書き出す
pub fn write_excel(listings: &[Listing], output_path: &Path) -> Result<()> {
    let buffer = generate_listing_workbook(listings)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, buffer)?;

    tracing::debug!(path = %output_path.display(), rows = listings.len(), "Excel出力");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(default_file_name(date()), "案件一覧_20260401.xlsx");
    }

    #[test]
    fn test_resolve_output_path() {
        assert_eq!(
            resolve_output_path(None, date()),
            PathBuf::from("案件一覧_20260401.xlsx")
        );

        let dir = tempdir().unwrap();
        assert_eq!(
            resolve_output_path(Some(dir.path()), date()),
            dir.path().join("案件一覧_20260401.xlsx")
        );

        let file = dir.path().join("out.xlsx");
        assert_eq!(resolve_output_path(Some(&file), date()), file);
    }
}
