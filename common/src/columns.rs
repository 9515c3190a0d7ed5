//! 一覧表の列定義と並び順・幅
//!
//! 保存済みの並び順・幅は古いバージョンのものでもそのまま復元できるよう、
//! 未知の列は捨て、足りない列は既定順で末尾に補う。

use crate::mapper::ListingField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 列ID（保存形式の文字列と一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnId {
    Category,
    Title,
    Description,
    Skills,
    Location,
    Period,
    Price,
    Type,
    Foreign,
    Subcontract,
    Others,
}

/// 列定義
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub id: ColumnId,
    pub label: &'static str,
    /// 既定幅（px）
    pub width: u32,
    /// この列をクリックしたときの並び替えキー
    pub sort_key: ListingField,
}

pub const COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        id: ColumnId::Category,
        label: "種別 / 状態",
        width: 100,
        sort_key: ListingField::Category,
    },
    ColumnDef {
        id: ColumnId::Title,
        label: "案件名 / 番号",
        width: 280,
        sort_key: ListingField::Title,
    },
    ColumnDef {
        id: ColumnId::Description,
        label: "業務概要",
        width: 400,
        sort_key: ListingField::Description,
    },
    ColumnDef {
        id: ColumnId::Skills,
        label: "スキル",
        width: 400,
        sort_key: ListingField::Skills,
    },
    ColumnDef {
        id: ColumnId::Location,
        label: "場所",
        width: 100,
        sort_key: ListingField::Location,
    },
    ColumnDef {
        id: ColumnId::Period,
        label: "期間",
        width: 200,
        sort_key: ListingField::Period,
    },
    ColumnDef {
        id: ColumnId::Price,
        label: "単価",
        width: 100,
        sort_key: ListingField::Price,
    },
    ColumnDef {
        id: ColumnId::Type,
        label: "契約",
        width: 100,
        sort_key: ListingField::ContractType,
    },
    ColumnDef {
        id: ColumnId::Foreign,
        label: "外国籍",
        width: 80,
        sort_key: ListingField::ForeignNationalPolicy,
    },
    ColumnDef {
        id: ColumnId::Subcontract,
        label: "再委託",
        width: 80,
        sort_key: ListingField::SubcontractPolicy,
    },
    ColumnDef {
        id: ColumnId::Others,
        label: "その他",
        width: 150,
        sort_key: ListingField::Remarks,
    },
];

impl ColumnId {
    pub fn def(self) -> &'static ColumnDef {
        COLUMNS
            .iter()
            .find(|c| c.id == self)
            .unwrap_or(&COLUMNS[0])
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnId::Category => "category",
            ColumnId::Title => "title",
            ColumnId::Description => "description",
            ColumnId::Skills => "skills",
            ColumnId::Location => "location",
            ColumnId::Period => "period",
            ColumnId::Price => "price",
            ColumnId::Type => "type",
            ColumnId::Foreign => "foreign",
            ColumnId::Subcontract => "subcontract",
            ColumnId::Others => "others",
        }
    }
}

impl std::str::FromStr for ColumnId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        COLUMNS
            .iter()
            .map(|c| c.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("不明な列: {}", s))
    }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 列の並び順と幅
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    order: Vec<ColumnId>,
    widths: BTreeMap<ColumnId, u32>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            order: COLUMNS.iter().map(|c| c.id).collect(),
            widths: COLUMNS.iter().map(|c| (c.id, c.width)).collect(),
        }
    }
}

impl ColumnLayout {
    /// 保存された並び順・幅から復元する
    ///
    /// # Arguments
    /// * `saved_order` - 保存された列ID（未知のIDは無視）
    /// * `saved_widths` - 保存された列幅（未知のIDは無視）
    pub fn restore(saved_order: &[String], saved_widths: &BTreeMap<String, u32>) -> Self {
        let mut layout = Self::default();

        let mut order: Vec<ColumnId> = Vec::with_capacity(COLUMNS.len());
        for id in saved_order.iter().filter_map(|s| s.parse::<ColumnId>().ok()) {
            if !order.contains(&id) {
                order.push(id);
            }
        }
        for def in COLUMNS {
            if !order.contains(&def.id) {
                order.push(def.id);
            }
        }
        layout.order = order;

        for (key, &width) in saved_widths {
            if let Ok(id) = key.parse::<ColumnId>() {
                layout.widths.insert(id, width);
            }
        }

        layout
    }

    pub fn order(&self) -> &[ColumnId] {
        &self.order
    }

    pub fn width(&self, id: ColumnId) -> u32 {
        self.widths.get(&id).copied().unwrap_or(id.def().width)
    }

    pub fn set_width(&mut self, id: ColumnId, width: u32) {
        self.widths.insert(id, width);
    }

    /// 列を移動する（ドラッグ&ドロップ相当）。範囲外なら何もしない
    pub fn move_column(&mut self, from: usize, to: usize) -> bool {
        if from >= self.order.len() || to >= self.order.len() || from == to {
            return false;
        }
        let id = self.order.remove(from);
        self.order.insert(to, id);
        true
    }

    /// 保存用の並び順
    pub fn saved_order(&self) -> Vec<String> {
        self.order.iter().map(|id| id.as_str().to_string()).collect()
    }

    /// 保存用の列幅
    pub fn saved_widths(&self) -> BTreeMap<String, u32> {
        self.order
            .iter()
            .map(|&id| (id.as_str().to_string(), self.width(id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_order() {
        let layout = ColumnLayout::default();
        assert_eq!(layout.order().len(), 11);
        assert_eq!(layout.order()[0], ColumnId::Category);
        assert_eq!(layout.width(ColumnId::Title), 280);
    }

    #[test]
    fn test_restore_drops_unknown_and_appends_missing() {
        let saved = strings(&["price", "legacy", "title", "price"]);
        let layout = ColumnLayout::restore(&saved, &BTreeMap::new());

        assert_eq!(layout.order()[0], ColumnId::Price);
        assert_eq!(layout.order()[1], ColumnId::Title);
        assert_eq!(layout.order()[2], ColumnId::Category);
        assert_eq!(layout.order().len(), 11);
    }

    #[test]
    fn test_restore_widths_only_known() {
        let mut widths = BTreeMap::new();
        widths.insert("skills".to_string(), 250);
        widths.insert("legacy".to_string(), 10);
        let layout = ColumnLayout::restore(&[], &widths);

        assert_eq!(layout.width(ColumnId::Skills), 250);
        assert_eq!(layout.saved_widths().len(), 11);
        assert!(!layout.saved_widths().contains_key("legacy"));
    }

    #[test]
    fn test_move_column() {
        let mut layout = ColumnLayout::default();
        assert!(layout.move_column(6, 0));
        assert_eq!(layout.order()[0], ColumnId::Price);
        assert_eq!(layout.order()[1], ColumnId::Category);
        assert!(!layout.move_column(0, 42));
    }

    #[test]
    fn test_saved_order_roundtrip() {
        let mut layout = ColumnLayout::default();
        layout.move_column(10, 1);
        let restored = ColumnLayout::restore(&layout.saved_order(), &layout.saved_widths());
        assert_eq!(restored, layout);
    }

    #[test]
    fn test_column_id_serde_matches_saved_ids() {
        assert_eq!(serde_json::to_string(&ColumnId::Type).unwrap(), "\"type\"");
        assert_eq!("others".parse::<ColumnId>(), Ok(ColumnId::Others));
    }
}
