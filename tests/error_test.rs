//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use ses_board::error::SesBoardError;
use ses_board::loader;

/// SesBoardErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        SesBoardError::Config("テスト設定エラー".to_string()),
        SesBoardError::Http("HTTP 404".to_string()),
        SesBoardError::EmptyDataset("sheet".to_string()),
        SesBoardError::FileNotFound("list.csv".to_string()),
        SesBoardError::ListingNotFound("P-999".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 取得失敗時のメッセージ
#[test]
fn test_http_error_message() {
    let err = SesBoardError::Http("HTTP 500".to_string());
    let display = format!("{}", err);

    assert!(display.contains("データの読み込みに失敗しました"));
    assert!(display.contains("500"));
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = SesBoardError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: SesBoardError = io_err.into();

    assert!(matches!(err, SesBoardError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: SesBoardError = json_err.into();

    assert!(matches!(err, SesBoardError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = ses_board_common::Error::Export("書き込み失敗".to_string());
    let err: SesBoardError = common_err.into();

    assert!(matches!(err, SesBoardError::Common(_)));
    assert!(format!("{}", err).contains("書き込み失敗"));
}

/// 存在しない案件番号
#[test]
fn test_listing_not_found_message() {
    let content = "案件番号,案件名\nP-001,Java\n";
    let dataset = loader::load_from_str(content, "inline").unwrap();
    let err = dataset
        .find("P-999")
        .map(|_| ())
        .ok_or_else(|| SesBoardError::ListingNotFound("P-999".to_string()))
        .unwrap_err();

    assert!(format!("{}", err).contains("P-999"));
}
