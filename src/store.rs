//! 永続化ストア
//!
//! お気に入り・検索条件・列の並び順/幅をキーごとのJSONファイルに保存する。
//! 読めないファイルは既定値として扱い、起動を妨げない。

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use ses_board_common::{ColumnLayout, Favorites, SearchState};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

pub const FAVORITES_KEY: &str = "ses_favorites";
pub const SEARCH_STATE_KEY: &str = "ses_search_state";
pub const COLUMN_ORDER_KEY: &str = "ses_column_order";
pub const COLUMN_WIDTHS_KEY: &str = "ses_column_widths";

pub const ALL_KEYS: &[&str] = &[
    FAVORITES_KEY,
    SEARCH_STATE_KEY,
    COLUMN_ORDER_KEY,
    COLUMN_WIDTHS_KEY,
];

/// キーごとのJSONファイルを置くディレクトリ
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// 読み込み（存在しない・壊れている場合は None）
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.key_path(key);
        if !path.exists() {
            return None;
        }

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "保存データを開けません");
                return None;
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "保存データが壊れています（既定値を使用）"
                );
                None
            }
        }
    }

    pub fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let file = File::create(self.key_path(key))?;
        serde_json::to_writer_pretty(BufWriter::new(file), value)?;
        Ok(())
    }

    /// 削除。存在しなければ false
    pub fn remove(&self, key: &str) -> Result<bool> {
        let path = self.key_path(key);
        if path.exists() {
            std::fs::remove_file(path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// 全設定を初期化。削除したキーの数を返す
    pub fn reset(&self) -> Result<usize> {
        let mut removed = 0;
        for key in ALL_KEYS {
            if self.remove(key)? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    pub fn load_favorites(&self) -> Favorites {
        self.load_json(FAVORITES_KEY).unwrap_or_default()
    }

    pub fn save_favorites(&self, favorites: &Favorites) -> Result<()> {
        self.save_json(FAVORITES_KEY, favorites)
    }

    pub fn load_search_state(&self) -> Option<SearchState> {
        self.load_json(SEARCH_STATE_KEY)
    }

    pub fn save_search_state(&self, state: &SearchState) -> Result<()> {
        self.save_json(SEARCH_STATE_KEY, state)
    }

    pub fn load_column_layout(&self) -> ColumnLayout {
        let order: Vec<String> = self.load_json(COLUMN_ORDER_KEY).unwrap_or_default();
        let widths: BTreeMap<String, u32> = self.load_json(COLUMN_WIDTHS_KEY).unwrap_or_default();
        ColumnLayout::restore(&order, &widths)
    }

    pub fn save_column_layout(&self, layout: &ColumnLayout) -> Result<()> {
        self.save_json(COLUMN_ORDER_KEY, &layout.saved_order())?;
        self.save_json(COLUMN_WIDTHS_KEY, &layout.saved_widths())
    }

    /// 列の並び順/幅だけを初期化
    pub fn reset_column_layout(&self) -> Result<()> {
        self.remove(COLUMN_ORDER_KEY)?;
        self.remove(COLUMN_WIDTHS_KEY)?;
        Ok(())
    }
}
