//! 並び替え
//!
//! 同じ列を選び直すたびに 昇順 → 降順 → 並び替えなし と切り替わる。
//! 単価は先頭の数字列で数値比較、それ以外は小文字化した文字列比較。

use crate::filter::extract_price;
use crate::mapper::ListingField;
use crate::types::Listing;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 並び替え状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: Option<ListingField>,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: None,
            ascending: true,
        }
    }
}

impl SortState {
    pub fn ascending(key: ListingField) -> Self {
        Self {
            key: Some(key),
            ascending: true,
        }
    }

    pub fn descending(key: ListingField) -> Self {
        Self {
            key: Some(key),
            ascending: false,
        }
    }

    /// 列を選択したときの次の状態
    pub fn toggle(self, key: ListingField) -> Self {
        match self.key {
            Some(current) if current == key && self.ascending => Self::descending(key),
            Some(current) if current == key => Self::default(),
            _ => Self::ascending(key),
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.key.is_some()
    }
}

fn compare(a: &Listing, b: &Listing, key: ListingField) -> Ordering {
    match key {
        ListingField::Price => extract_price(&a.price).cmp(&extract_price(&b.price)),
        _ => a
            .field(key)
            .to_lowercase()
            .cmp(&b.field(key).to_lowercase()),
    }
}

/// 並び替える（安定ソート）。並び替えなしの場合は何もしない
pub fn sort_listings(listings: &mut [Listing], state: &SortState) {
    let Some(key) = state.key else {
        return;
    };

    listings.sort_by(|a, b| {
        let ord = compare(a, b, key);
        if state.ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, title: &str, price: &str) -> Listing {
        Listing {
            id: id.to_string(),
            title: title.to_string(),
            price: price.to_string(),
            ..Default::default()
        }
    }

    fn ids(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_toggle_cycle() {
        let state = SortState::default();
        let state = state.toggle(ListingField::Price);
        assert_eq!(state, SortState::ascending(ListingField::Price));
        let state = state.toggle(ListingField::Price);
        assert_eq!(state, SortState::descending(ListingField::Price));
        let state = state.toggle(ListingField::Price);
        assert_eq!(state, SortState::default());
        assert!(!state.is_sorted());
    }

    #[test]
    fn test_toggle_other_key_restarts_ascending() {
        let state = SortState::descending(ListingField::Price).toggle(ListingField::Title);
        assert_eq!(state, SortState::ascending(ListingField::Title));
    }

    #[test]
    fn test_price_sorts_numerically() {
        let mut listings = vec![
            listing("a", "", "100万"),
            listing("b", "", "65万"),
            listing("c", "", "応相談"),
            listing("d", "", "8万"),
        ];
        sort_listings(&mut listings, &SortState::ascending(ListingField::Price));
        assert_eq!(ids(&listings), vec!["c", "d", "b", "a"]);

        sort_listings(&mut listings, &SortState::descending(ListingField::Price));
        assert_eq!(ids(&listings), vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn test_string_sort_is_case_insensitive() {
        let mut listings = vec![
            listing("1", "php", ""),
            listing("2", "Java", ""),
            listing("3", "AWS", ""),
        ];
        sort_listings(&mut listings, &SortState::ascending(ListingField::Title));
        assert_eq!(ids(&listings), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_sort_is_stable_and_unsorted_keeps_order() {
        let mut listings = vec![
            listing("1", "", "60万"),
            listing("2", "", "60万"),
            listing("3", "", "50万"),
        ];
        sort_listings(&mut listings, &SortState::default());
        assert_eq!(ids(&listings), vec!["1", "2", "3"]);

        sort_listings(&mut listings, &SortState::ascending(ListingField::Price));
        assert_eq!(ids(&listings), vec!["3", "1", "2"]);
    }
}
