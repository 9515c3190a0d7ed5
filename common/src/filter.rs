//! 検索・絞り込みエンジン
//!
//! 作業セットに対して以下の条件をすべて満たすレコードだけを残す（AND結合）。
//! 1. お気に入りのみ
//! 2. 単価範囲
//! 3. フリーワード（空白区切りのAND検索）
//! 4. 種別（完全一致のOR）
//! 5. 契約形態（部分一致のOR）
//!
//! 元の並び順は保持する。並び替えは `sort` モジュールで別に行う。

use crate::favorites::Favorites;
use crate::types::Listing;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 上限なしを表す単価（万円）
pub const PRICE_UNBOUNDED: u32 = 999;

/// 絞り込み条件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// フリーワード（空白区切りでAND）
    pub query: String,
    /// 種別（空なら制約なし）
    pub categories: Vec<String>,
    /// 契約形態（空なら制約なし）
    pub contract_types: Vec<String>,
    /// 下限単価（0なら制約なし）
    pub min_price: u32,
    /// 上限単価（PRICE_UNBOUNDEDなら制約なし）
    pub max_price: u32,
    /// お気に入りのみ表示
    pub favorites_only: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            categories: Vec::new(),
            contract_types: Vec::new(),
            min_price: 0,
            max_price: PRICE_UNBOUNDED,
            favorites_only: false,
        }
    }
}

impl FilterCriteria {
    /// 検索キーワード（小文字化・空白分割済み）
    pub fn keywords(&self) -> Vec<String> {
        self.query
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// 何も絞り込まない条件か
    pub fn is_unconstrained(&self) -> bool {
        self.keywords().is_empty()
            && self.categories.is_empty()
            && self.contract_types.is_empty()
            && self.min_price == 0
            && self.max_price >= PRICE_UNBOUNDED
            && !self.favorites_only
    }
}

/// 単価文字列から最初の数字列を取り出す（数字がなければ0）
///
/// 例: "単価60万円" → 60, "65〜70万" → 65, "応相談" → 0
pub fn extract_price(price: &str) -> u32 {
    lazy_static::lazy_static! {
        // 全角数字は対象外
        static ref DIGITS_RE: Regex = Regex::new(r"[0-9]+").unwrap();
    }

    DIGITS_RE
        .find(price)
        .map(|m| m.as_str().parse::<u32>().unwrap_or(u32::MAX))
        .unwrap_or(0)
}

fn matches_favorites(listing: &Listing, criteria: &FilterCriteria, favorites: &Favorites) -> bool {
    !criteria.favorites_only || favorites.contains(&listing.id)
}

fn matches_price(listing: &Listing, criteria: &FilterCriteria) -> bool {
    let price = extract_price(&listing.price);
    if criteria.min_price > 0 && price < criteria.min_price {
        return false;
    }
    if criteria.max_price < PRICE_UNBOUNDED && price > criteria.max_price {
        return false;
    }
    true
}

fn matches_text(listing: &Listing, keywords: &[String]) -> bool {
    if keywords.is_empty() {
        return true;
    }
    let text = listing.searchable_text();
    keywords.iter().all(|kw| text.contains(kw.as_str()))
}

fn matches_category(listing: &Listing, criteria: &FilterCriteria) -> bool {
    criteria.categories.is_empty() || criteria.categories.iter().any(|c| *c == listing.category)
}

fn matches_contract_type(listing: &Listing, criteria: &FilterCriteria) -> bool {
    // 「準委任」で「準委任契約（再委託不可）」にも一致させるため部分一致
    criteria.contract_types.is_empty()
        || criteria
            .contract_types
            .iter()
            .any(|t| {
                !listing.contract_type.is_empty() && listing.contract_type.contains(t.as_str())
            })
}

fn matches_with_keywords(
    listing: &Listing,
    criteria: &FilterCriteria,
    keywords: &[String],
    favorites: &Favorites,
) -> bool {
    matches_favorites(listing, criteria, favorites)
        && matches_price(listing, criteria)
        && matches_text(listing, keywords)
        && matches_category(listing, criteria)
        && matches_contract_type(listing, criteria)
}

/// 作業セットを絞り込む
///
/// # Arguments
/// * `listings` - 作業セット（読み込み順）
/// * `criteria` - 絞り込み条件
/// * `favorites` - お気に入りID（参照のみ）
///
/// # Returns
/// 条件を満たすレコード（元の順序を保持）
pub fn filter_listings(
    listings: &[Listing],
    criteria: &FilterCriteria,
    favorites: &Favorites,
) -> Vec<Listing> {
    if criteria.is_unconstrained() {
        return listings.to_vec();
    }

    let keywords = criteria.keywords();
    listings
        .iter()
        .filter(|l| matches_with_keywords(l, criteria, &keywords, favorites))
        .cloned()
        .collect()
}
