//! 絞り込み候補（種別・契約形態）

use crate::types::Listing;
use std::collections::BTreeSet;

/// 先頭に並べる種別（この順）
pub const CATEGORY_PRIORITY: &[&str] = &["開発系", "インフラ", "ERP"];

/// 契約形態の選択肢は固定
pub const CONTRACT_TYPE_FACETS: &[&str] = &["準委任", "派遣"];

/// 作業セットに含まれる種別を表示順に返す
///
/// 優先種別を先頭に固定し、残りは文字列順。
pub fn category_facets(listings: &[Listing]) -> Vec<String> {
    let unique: BTreeSet<&str> = listings
        .iter()
        .map(|l| l.category.trim())
        .filter(|c| !c.is_empty())
        .collect();

    let mut categories: Vec<&str> = unique.into_iter().collect();
    categories.sort_by_key(|c| {
        CATEGORY_PRIORITY
            .iter()
            .position(|p| p == c)
            .unwrap_or(CATEGORY_PRIORITY.len())
    });

    categories.into_iter().map(str::to_string).collect()
}
