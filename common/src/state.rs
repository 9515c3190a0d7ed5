//! 検索条件の保存形式
//!
//! 保存済みJSONの単価は文字列（"0", "999"）で書かれていることがあるため、
//! 数値・文字列のどちらでも読み込めるようにしている。

use crate::filter::{FilterCriteria, PRICE_UNBOUNDED};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchState {
    pub query: String,
    pub fav_only: bool,
    pub cats: Vec<String>,
    pub contracts: Vec<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub min_price: String,
    #[serde(deserialize_with = "string_or_number")]
    pub max_price: String,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            fav_only: false,
            cats: Vec::new(),
            contracts: Vec::new(),
            min_price: "0".to_string(),
            max_price: PRICE_UNBOUNDED.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

impl SearchState {
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        Self {
            query: criteria.query.clone(),
            fav_only: criteria.favorites_only,
            cats: criteria.categories.clone(),
            contracts: criteria.contract_types.clone(),
            min_price: criteria.min_price.to_string(),
            max_price: criteria.max_price.to_string(),
        }
    }

    /// 絞り込み条件に変換する。解釈できない単価は「制約なし」
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            query: self.query.trim().to_string(),
            categories: self.cats.clone(),
            contract_types: self.contracts.clone(),
            min_price: self.min_price.trim().parse().unwrap_or(0),
            max_price: self.max_price.trim().parse().unwrap_or(PRICE_UNBOUNDED),
            favorites_only: self.fav_only,
        }
    }
}
