//! 列推定モジュール
//!
//! スプレッドシートのヘッダー名は運用担当者が自由に編集するため、
//! キーワードの部分一致で各列の意味を推定して `Listing` に変換する。
//!
//! ## 推定ルール
//! 1. ヘッダーから空白・改行をすべて除去して正規化
//! 2. フィールドごとのキーワードをいずれか含む最初のヘッダーを採用（列順）
//! 3. 備考はスキル系の列を誤検出しないよう除外キーワードを持つ
//! 4. コピー用テキストは見つからなければ18列目（R列）を使う

use crate::types::{Listing, RawRow};
use serde::{Deserialize, Serialize};

/// 案件名が推定できなかった場合のプレースホルダー
pub const TITLE_PLACEHOLDER: &str = "案件名なし";

/// コピー用テキストの固定列位置（R列）
pub const COPY_TEXT_FALLBACK_INDEX: usize = 17;

/// 「その他」列でも備考とみなさないキーワード
const REMARKS_EXCLUDED: &[&str] = &["スキル", "言語", "要件"];

/// 案件レコードの論理フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListingField {
    Category,
    Id,
    Status,
    Title,
    Description,
    Skills,
    Location,
    Period,
    Price,
    ContractType,
    InterviewInfo,
    ForeignNationalPolicy,
    SubcontractPolicy,
    Remarks,
    CopyText,
}

impl ListingField {
    pub const ALL: [ListingField; 15] = [
        ListingField::Category,
        ListingField::Id,
        ListingField::Status,
        ListingField::Title,
        ListingField::Description,
        ListingField::Skills,
        ListingField::Location,
        ListingField::Period,
        ListingField::Price,
        ListingField::ContractType,
        ListingField::InterviewInfo,
        ListingField::ForeignNationalPolicy,
        ListingField::SubcontractPolicy,
        ListingField::Remarks,
        ListingField::CopyText,
    ];

    /// ヘッダー推定に使うキーワード（優先順）
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            ListingField::Category => &["種別"],
            ListingField::Id => &["案件番号"],
            ListingField::Status => &["状態"],
            ListingField::Title => &["案件名"],
            ListingField::Description => &["業務", "作業", "概要"],
            ListingField::Skills => &["スキル"],
            ListingField::Location => &["場所", "勤務地"],
            ListingField::Period => &["期間"],
            ListingField::Price => &["単金"],
            ListingField::ContractType => &["契約形態"],
            ListingField::InterviewInfo => &["打合せ"],
            ListingField::ForeignNationalPolicy => &["外国籍"],
            ListingField::SubcontractPolicy => &["再委託"],
            ListingField::Remarks => &["備考", "その他"],
            ListingField::CopyText => &["案件PR", "PR", "コピー"],
        }
    }

    /// 表示用ラベル
    pub fn label(self) -> &'static str {
        match self {
            ListingField::Category => "種別",
            ListingField::Id => "案件番号",
            ListingField::Status => "状態",
            ListingField::Title => "案件名",
            ListingField::Description => "業務概要",
            ListingField::Skills => "スキル",
            ListingField::Location => "場所",
            ListingField::Period => "期間",
            ListingField::Price => "単価",
            ListingField::ContractType => "契約形態",
            ListingField::InterviewInfo => "打合せ",
            ListingField::ForeignNationalPolicy => "外国籍",
            ListingField::SubcontractPolicy => "再委託",
            ListingField::Remarks => "その他",
            ListingField::CopyText => "コピー用テキスト",
        }
    }

    /// 正規化済みヘッダーがこのフィールドに該当するか
    pub fn matches(self, normalized_header: &str) -> bool {
        match self {
            ListingField::Remarks => {
                normalized_header.contains("備考")
                    || (normalized_header.contains("その他")
                        && !REMARKS_EXCLUDED
                            .iter()
                            .any(|kw| normalized_header.contains(kw)))
            }
            _ => self
                .keywords()
                .iter()
                .any(|kw| normalized_header.contains(kw)),
        }
    }
}

impl std::fmt::Display for ListingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ListingField {
    type Err = String;

    /// フィールド名・列ID・日本語ラベルを受け付ける
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim() {
            "category" | "種別" => ListingField::Category,
            "id" | "案件番号" => ListingField::Id,
            "status" | "状態" => ListingField::Status,
            "title" | "案件名" => ListingField::Title,
            "description" | "業務概要" => ListingField::Description,
            "skills" | "スキル" => ListingField::Skills,
            "location" | "場所" => ListingField::Location,
            "period" | "期間" => ListingField::Period,
            "price" | "単価" | "単金" => ListingField::Price,
            "contractType" | "type" | "契約" | "契約形態" => ListingField::ContractType,
            "interviewInfo" | "interview" | "打合せ" => ListingField::InterviewInfo,
            "foreignNationalPolicy" | "foreign" | "外国籍" => {
                ListingField::ForeignNationalPolicy
            }
            "subcontractPolicy" | "subcontract" | "再委託" => ListingField::SubcontractPolicy,
            "remarks" | "others" | "その他" | "備考" => ListingField::Remarks,
            "copyText" | "コピー" => ListingField::CopyText,
            other => return Err(format!("不明なフィールド: {}", other)),
        };
        Ok(field)
    }
}

/// ヘッダー名を正規化（空白・改行・BOMを除去）
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{feff}')
        .collect()
}

/// フィールドに該当する列の値を取得
pub fn field_value(row: &RawRow, field: ListingField) -> Option<&str> {
    row.iter()
        .find(|(header, _)| field.matches(&normalize_header(header)))
        .map(|(_, value)| value)
}

/// 1行を案件レコードに変換する
///
/// 該当列がないフィールドは空文字列になり、エラーにはならない。
/// 案件名のみ空の場合にプレースホルダーが入る。
pub fn map_row(row: &RawRow) -> Listing {
    let value = |field: ListingField| field_value(row, field).unwrap_or_default().to_string();

    let title = match field_value(row, ListingField::Title) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => TITLE_PLACEHOLDER.to_string(),
    };

    let copy_text = match field_value(row, ListingField::CopyText) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ if row.len() > COPY_TEXT_FALLBACK_INDEX => row
            .value_at(COPY_TEXT_FALLBACK_INDEX)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    };

    Listing {
        category: value(ListingField::Category),
        id: value(ListingField::Id),
        status: value(ListingField::Status),
        title,
        description: value(ListingField::Description),
        skills: value(ListingField::Skills),
        location: value(ListingField::Location),
        period: value(ListingField::Period),
        price: value(ListingField::Price),
        contract_type: value(ListingField::ContractType),
        interview_info: value(ListingField::InterviewInfo),
        foreign_national_policy: value(ListingField::ForeignNationalPolicy),
        subcontract_policy: value(ListingField::SubcontractPolicy),
        remarks: value(ListingField::Remarks),
        copy_text,
        raw: row.clone(),
    }
}

/// 全行を変換し、案件名のないレコードを除外する
pub fn map_rows(rows: &[RawRow]) -> Vec<Listing> {
    rows.iter()
        .map(map_row)
        .filter(has_title)
        .collect()
}

/// 作業セットに残すべきレコードか
pub fn has_title(listing: &Listing) -> bool {
    !listing.title.is_empty() && listing.title != TITLE_PLACEHOLDER
}

/// フィールドごとのヘッダー推定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldResolution {
    pub field: ListingField,
    /// 該当したヘッダー（列順）
    pub matches: Vec<String>,
}

impl FieldResolution {
    /// 実際に採用されるヘッダー
    pub fn selected(&self) -> Option<&str> {
        self.matches.first().map(String::as_str)
    }

    pub fn is_missing(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn is_ambiguous(&self) -> bool {
        self.matches.len() > 1
    }
}

/// ヘッダー推定の診断レポート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderReport {
    pub resolutions: Vec<FieldResolution>,
    pub column_count: usize,
}

impl HeaderReport {
    pub fn resolution(&self, field: ListingField) -> Option<&FieldResolution> {
        self.resolutions.iter().find(|r| r.field == field)
    }

    /// 該当列のないフィールド（R列で補えるコピー用テキストは除く）
    pub fn missing(&self) -> Vec<ListingField> {
        self.resolutions
            .iter()
            .filter(|r| r.is_missing())
            .filter(|r| !(r.field == ListingField::CopyText && self.uses_positional_copy_text()))
            .map(|r| r.field)
            .collect()
    }

    /// 複数列に該当したフィールド
    pub fn ambiguous(&self) -> Vec<&FieldResolution> {
        self.resolutions.iter().filter(|r| r.is_ambiguous()).collect()
    }

    /// コピー用テキストをR列から取るか
    pub fn uses_positional_copy_text(&self) -> bool {
        self.resolution(ListingField::CopyText)
            .is_some_and(|r| r.is_missing())
            && self.column_count > COPY_TEXT_FALLBACK_INDEX
    }

    pub fn is_clean(&self) -> bool {
        self.missing().is_empty() && self.ambiguous().is_empty()
    }
}

/// ヘッダー一覧からフィールドごとの該当列を洗い出す
pub fn resolve_headers<'a, I>(headers: I) -> HeaderReport
where
    I: IntoIterator<Item = &'a str>,
{
    let headers: Vec<&str> = headers.into_iter().collect();
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

    let resolutions = ListingField::ALL
        .iter()
        .map(|&field| FieldResolution {
            field,
            matches: headers
                .iter()
                .zip(&normalized)
                .filter(|(_, norm)| field.matches(norm))
                .map(|(header, _)| header.to_string())
                .collect(),
        })
        .collect();

    HeaderReport {
        resolutions,
        column_count: headers.len(),
    }
}
