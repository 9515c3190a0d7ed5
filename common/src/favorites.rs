//! お気に入り管理
//!
//! 案件番号の集合。永続化はアプリ側で行い、ここでは集合操作のみ扱う。

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    ids: BTreeSet<String>,
}

impl Favorites {
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    /// 登録/解除を切り替え、切り替え後に登録済みならtrue
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// 表示中の案件を一括で切り替える
    ///
    /// 1件でも登録済みなら表示中をすべて解除、なければすべて登録。
    /// 切り替え後に登録状態ならtrue。
    pub fn toggle_all<'a, I>(&mut self, visible_ids: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let visible: Vec<&str> = visible_ids.into_iter().collect();
        if visible.is_empty() {
            return false;
        }

        if visible.iter().any(|id| self.contains(id)) {
            for id in visible {
                self.ids.remove(id);
            }
            false
        } else {
            for id in visible {
                self.ids.insert(id.to_string());
            }
            true
        }
    }

    /// 表示中の案件がすべて登録済みか（空なら false）
    pub fn all_favorite<'a, I>(&self, visible_ids: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut any = false;
        for id in visible_ids {
            if !self.contains(id) {
                return false;
            }
            any = true;
        }
        any
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for Favorites {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut fav = Favorites::default();
        assert!(fav.toggle("P-001"));
        assert!(fav.contains("P-001"));
        assert!(!fav.toggle("P-001"));
        assert!(fav.is_empty());
    }

    #[test]
    fn test_toggle_all_adds_when_none_favorite() {
        let mut fav: Favorites = ["P-009"].into_iter().collect();
        assert!(fav.toggle_all(["P-001", "P-002"]));
        assert!(fav.all_favorite(["P-001", "P-002"]));
        assert_eq!(fav.len(), 3);
    }

    #[test]
    fn test_toggle_all_removes_when_any_favorite() {
        let mut fav: Favorites = ["P-001", "P-009"].into_iter().collect();
        assert!(!fav.toggle_all(["P-001", "P-002"]));
        assert!(!fav.contains("P-001"));
        assert!(!fav.contains("P-002"));
        // 表示外のお気に入りは残る
        assert!(fav.contains("P-009"));
    }

    #[test]
    fn test_toggle_all_empty_is_noop() {
        let mut fav: Favorites = ["P-001"].into_iter().collect();
        assert!(!fav.toggle_all(std::iter::empty()));
        assert_eq!(fav.len(), 1);
        assert!(!fav.all_favorite(std::iter::empty()));
    }

    #[test]
    fn test_serialize_as_array() {
        let fav: Favorites = ["B", "A"].into_iter().collect();
        assert_eq!(serde_json::to_string(&fav).unwrap(), r#"["A","B"]"#);
        let restored: Favorites = serde_json::from_str(r#"["X","Y"]"#).unwrap();
        assert!(restored.contains("Y"));
    }
}
