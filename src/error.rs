use thiserror::Error;

#[derive(Error, Debug)]
pub enum SesBoardError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("データの読み込みに失敗しました: {0}")]
    Http(String),

    #[error("データが見つかりませんでした: {0}")]
    EmptyDataset(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("案件が見つかりません: {0}")]
    ListingNotFound(String),

    #[error("CSV解析エラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] ses_board_common::Error),
}

pub type Result<T> = std::result::Result<T, SesBoardError>;
