use crate::error::{Result, SesBoardError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 公開スプレッドシートのCSV出力URL
pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQY3X20AFaDYSVOwGls8Ps2nQeVbiWVhybs6SMXgd05ptpJb5opAkPzQ1SVxsU0NFXkcWunmDpr7g7Z/pub?gid=433722107&single=true&output=csv";

const SHEET_URL_ENV: &str = "SES_BOARD_SHEET_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sheet_url: String,
    pub timeout_seconds: u64,
    /// 保存先（省略時はOSのデータディレクトリ）
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_url: DEFAULT_SHEET_URL.into(),
            timeout_seconds: 30,
            data_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SesBoardError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("ses-board").join("config.json"))
    }

    /// 取得元URL（環境変数を優先）
    pub fn sheet_url(&self) -> String {
        match std::env::var(SHEET_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.sheet_url.clone(),
        }
    }

    /// 保存先ディレクトリ
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_dir()
            .ok_or_else(|| SesBoardError::Config("データディレクトリが見つかりません".into()))?;
        Ok(base.join("ses-board"))
    }

    pub fn set_sheet_url(&mut self, url: String) -> Result<()> {
        self.sheet_url = url;
        self.save()
    }
}
