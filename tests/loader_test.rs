//! CSV読み込み → 作業セット構築の統合テスト

use ses_board::error::SesBoardError;
use ses_board::loader::{self, Source};
use ses_board_common::{filter_listings, Favorites, FilterCriteria, ListingField, TITLE_PLACEHOLDER};
use std::path::PathBuf;
use tempfile::tempdir;

const SAMPLE_CSV: &str = "\
種別,状態,案件番号,案件名,業務概要,必須スキル,場所,期間,単金,契約形態,打合せ,外国籍,再委託,備考
開発系,募集中,P-001,Javaエンジニア募集,\"受発注システム改修
設計〜テスト\",\"Java
Spring\",東京,即日〜長期,65万円,準委任契約,1回,不可,不可,リモート可
インフラ,募集中,P-002,AWS構築,クラウド移行,AWS,大阪,3ヶ月,単価60万円,派遣,2回,可,可,
開発系,終了,P-003,,空行扱い,,,,,,,,,
";

async fn load_sample(content: &str) -> ses_board::loader::Dataset {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("listings.csv");
    std::fs::write(&path, content).expect("CSV書き込み失敗");
    loader::load_dataset(&Source::File(path), 5)
        .await
        .expect("読み込み失敗")
}

#[tokio::test]
async fn test_load_local_csv() {
    let dataset = load_sample(SAMPLE_CSV).await;

    assert_eq!(dataset.headers.len(), 14);
    assert_eq!(dataset.rows.len(), 3);
    // 案件名のない行は作業セットに入らない
    assert_eq!(dataset.listings.len(), 2);
    assert!(dataset.listings.iter().all(|l| l.title != TITLE_PLACEHOLDER));

    let first = dataset.find("P-001").expect("P-001がない");
    assert_eq!(first.title, "Javaエンジニア募集");
    assert_eq!(first.skills, "Java\nSpring");
    assert_eq!(first.remarks, "リモート可");
    assert_eq!(first.interview_info, "1回");
}

#[tokio::test]
async fn test_header_report_from_file() {
    let dataset = load_sample(SAMPLE_CSV).await;
    let report = &dataset.report;

    assert_eq!(report.column_count, 14);
    assert_eq!(
        report.resolution(ListingField::Skills).and_then(|r| r.selected()),
        Some("必須スキル")
    );
    // コピー用テキスト列もR列もない
    assert!(report.missing().contains(&ListingField::CopyText));
    assert!(!report.uses_positional_copy_text());
}

#[tokio::test]
async fn test_missing_file() {
    let source = Source::File(PathBuf::from("/nonexistent/ses.csv"));
    let result = loader::load_dataset(&source, 5).await;
    assert!(matches!(result, Err(SesBoardError::FileNotFound(_))));
}

#[tokio::test]
async fn test_header_only_csv_is_empty_dataset() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "案件番号,案件名\n").unwrap();

    let result = loader::load_dataset(&Source::File(path), 5).await;
    let err = result.unwrap_err();
    assert!(matches!(err, SesBoardError::EmptyDataset(_)));
    assert!(err.to_string().contains("データが見つかりませんでした"));
}

/// 1行の生データから絞り込みまで
#[test]
fn test_end_to_end_single_listing() {
    let content = "案件番号,案件名,単金,契約形態,種別\nP-001,Javaエンジニア募集,65万円,準委任契約,開発系\n";
    let dataset = loader::load_from_str(content, "inline").unwrap();

    let listing = &dataset.listings[0];
    assert_eq!(listing.id, "P-001");
    assert_eq!(listing.title, "Javaエンジニア募集");
    assert_eq!(listing.price, "65万円");
    assert_eq!(listing.contract_type, "準委任契約");
    assert_eq!(listing.category, "開発系");

    let favorites = Favorites::default();
    let criteria = FilterCriteria {
        min_price: 60,
        max_price: 70,
        contract_types: vec!["準委任".to_string()],
        ..Default::default()
    };
    assert_eq!(filter_listings(&dataset.listings, &criteria, &favorites).len(), 1);

    let criteria = FilterCriteria {
        categories: vec!["インフラ".to_string()],
        ..Default::default()
    };
    assert!(filter_listings(&dataset.listings, &criteria, &favorites).is_empty());
}

/// 18列以上あり、コピー用の列名がない場合はR列を使う
#[test]
fn test_positional_copy_text() {
    let headers: Vec<String> = (0..18).map(|i| format!("列{}", i)).collect();
    let mut headers = headers;
    headers[0] = "案件名".to_string();
    let mut values: Vec<String> = (0..18).map(|_| String::new()).collect();
    values[0] = "Go開発".to_string();
    values[17] = "【案件PR】Go案件です".to_string();

    let content = format!("{}\n{}\n", headers.join(","), values.join(","));
    let dataset = loader::load_from_str(&content, "inline").unwrap();

    assert!(dataset.report.uses_positional_copy_text());
    assert_eq!(dataset.listings[0].copy_text, "【案件PR】Go案件です");
}
