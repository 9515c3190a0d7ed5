//! CSV → RawRow 変換
//!
//! 1行目をヘッダーとし、以降の各行をヘッダー順の (ヘッダー, 値) に変換する。
//! 列数が足りない行は空文字で補い、ヘッダーより多い列は捨てる。

use crate::error::Result;
use ses_board_common::RawRow;

/// CSV文字列を解析する
///
/// # Returns
/// (ヘッダー一覧, 行一覧)
pub fn parse_csv(content: &str) -> Result<(Vec<String>, Vec<RawRow>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if is_blank(&record) {
            continue;
        }

        let row = RawRow::from_pairs(
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| (header.clone(), record.get(i).unwrap_or_default().to_string())),
        );
        rows.push(row);
    }

    Ok((headers, rows))
}

fn is_blank(record: &csv::StringRecord) -> bool {
    record.is_empty() || (record.len() == 1 && record[0].is_empty())
}
