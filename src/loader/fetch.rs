//! 公開スプレッドシートのCSV取得

use crate::error::{Result, SesBoardError};
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("ses-board/", env!("CARGO_PKG_VERSION"));

/// URLからCSV本文を取得する（リトライなし）
pub async fn fetch_csv(url: &str, timeout_seconds: u64) -> Result<String> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| SesBoardError::Http(e.to_string()))?;

    tracing::debug!(url, "CSV取得開始");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SesBoardError::Http(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SesBoardError::Http(format!("HTTP {}", status)));
    }

    let body = response
        .text()
        .await
        .map_err(|e| SesBoardError::Http(e.to_string()))?;
    tracing::debug!(bytes = body.len(), "CSV取得完了");

    Ok(body)
}
