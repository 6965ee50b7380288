use crate::shared::errors::{SyncError, SyncResult};

/// HTTP-клиент с общим таймаутом и заголовками, заданными один раз при создании
pub fn build_http_client(
    timeout_secs: u64,
    default_headers: Option<reqwest::header::HeaderMap>,
) -> SyncResult<reqwest::Client> {
    let mut builder =
        reqwest::Client::builder().timeout(std::time::Duration::from_secs(timeout_secs));
    if let Some(headers) = default_headers {
        builder = builder.default_headers(headers);
    }
    builder
        .build()
        .map_err(|e| SyncError::Initialization(format!("Failed to create HTTP client: {}", e)))
}

/// Прочитать тело неуспешного ответа и превратить его в RemoteCall
pub async fn ensure_success(
    endpoint: &str,
    response: reqwest::Response,
) -> SyncResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SyncError::remote(endpoint, Some(status.as_u16()), preview(&body)))
}

/// Первые 500 символов тела для логов
pub fn preview(body: &str) -> String {
    let preview: String = body.chars().take(500).collect();
    if preview.len() < body.len() {
        format!("{}...", preview)
    } else {
        preview
    }
}
