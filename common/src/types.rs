//! 案件データの型定義
//!
//! - RawRow: CSVの1行（ヘッダー名と値のペア、列順を保持）
//! - Listing: 列推定後の正規化済み案件レコード

use crate::mapper::{ListingField, COPY_TEXT_FALLBACK_INDEX};
use serde::{Deserialize, Serialize};

/// 「その他の情報」に出さない列（主要フィールドで表示済み）
const EXTRA_EXCLUDED: &[&str] = &[
    "種別",
    "ERP",
    "案件番号",
    "案件名",
    "業務",
    "作業",
    "概要",
    "スキル要件",
    "スキル",
    "必須",
    "経験",
    "状態",
];

/// CSVの1行
///
/// ヘッダー名はスプレッドシート側で自由に編集されるため、
/// 改行や空白を含む任意の文字列になりうる。列順は推定ルールで意味を持つ。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// (ヘッダー, 値) の列から作成
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.cells.push((header.into(), value.into()));
    }

    /// ヘッダーを列順に列挙
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(h, _)| h.as_str())
    }

    /// ヘッダー名で値を取得（重複時は先頭）
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    /// 列位置で値を取得
    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// 正規化済みの案件レコード
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Listing {
    pub category: String,                // 種別
    pub id: String,                      // 案件番号
    pub status: String,                  // 状態
    pub title: String,                   // 案件名
    pub description: String,             // 業務概要
    pub skills: String,                  // スキル
    pub location: String,                // 場所
    pub period: String,                  // 期間
    pub price: String,                   // 単金
    pub contract_type: String,           // 契約形態
    pub interview_info: String,          // 打合せ
    pub foreign_national_policy: String, // 外国籍
    pub subcontract_policy: String,      // 再委託
    pub remarks: String,                 // 備考・その他
    pub copy_text: String,               // 案件PR（コピー用テキスト）

    /// 元の行（正規化されていない列の参照用）
    pub raw: RawRow,
}

impl Listing {
    /// 論理フィールドの値を取得
    pub fn field(&self, field: ListingField) -> &str {
        match field {
            ListingField::Category => &self.category,
            ListingField::Id => &self.id,
            ListingField::Status => &self.status,
            ListingField::Title => &self.title,
            ListingField::Description => &self.description,
            ListingField::Skills => &self.skills,
            ListingField::Location => &self.location,
            ListingField::Period => &self.period,
            ListingField::Price => &self.price,
            ListingField::ContractType => &self.contract_type,
            ListingField::InterviewInfo => &self.interview_info,
            ListingField::ForeignNationalPolicy => &self.foreign_national_policy,
            ListingField::SubcontractPolicy => &self.subcontract_policy,
            ListingField::Remarks => &self.remarks,
            ListingField::CopyText => &self.copy_text,
        }
    }

    /// 案件名コピー用テキスト（`番号｜案件名`）
    pub fn title_copy_text(&self) -> String {
        format!("{}｜{}", self.id, self.title)
    }

    /// 詳細表示の「その他の情報」
    ///
    /// 元の行のうち値が空でない列。R列と主要フィールドの列は除く。
    pub fn extra_fields(&self) -> Vec<(&str, &str)> {
        self.raw
            .iter()
            .enumerate()
            .filter(|&(index, (header, value))| {
                index != COPY_TEXT_FALLBACK_INDEX
                    && !value.is_empty()
                    && !is_extra_excluded(header)
            })
            .map(|(_, cell)| cell)
            .collect()
    }

    /// 自由検索の対象テキスト（小文字化済み）
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.id, self.title, self.skills, self.description
        )
        .to_lowercase()
    }
}

fn is_extra_excluded(header: &str) -> bool {
    let header = header.to_lowercase();
    EXTRA_EXCLUDED
        .iter()
        .any(|kw| header.contains(&kw.to_lowercase()))
}
