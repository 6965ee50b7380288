use async_trait::async_trait;
use serde::Deserialize;

use crate::shared::config::BridgeConfig;
use crate::shared::errors::{SyncError, SyncResult};
use crate::shared::http::{build_http_client, ensure_success};

/// Склад и токен продавца
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub warehouse_id: i64,
    pub token: String,
}

/// Источник учётных данных продавца
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn credentials(&self, token_id: i64) -> SyncResult<Credentials>;
}

/// Запись сервиса токенов
#[derive(Debug, Clone, Deserialize)]
struct TokenRow {
    id: i64,
    #[serde(default)]
    warehouse_id: Option<i64>,
    #[serde(default)]
    common_token: String,
}

/// Сервис токенов bridge: GET token_url с заголовком `Authorization: Token <token>`
pub struct BridgeTokenService {
    client: reqwest::Client,
    token_url: String,
    token: String,
}

impl BridgeTokenService {
    pub fn new(config: &BridgeConfig) -> SyncResult<Self> {
        Ok(Self {
            client: build_http_client(config.timeout_secs, None)?,
            token_url: config.token_url.clone(),
            token: config.token.clone(),
        })
    }
}

#[async_trait]
impl CredentialProvider for BridgeTokenService {
    async fn credentials(&self, token_id: i64) -> SyncResult<Credentials> {
        let endpoint = format!("GET {}", self.token_url);
        let init_error = |e: SyncError| SyncError::Initialization(e.to_string());

        let response = self
            .client
            .get(&self.token_url)
            .header("Authorization", format!("Token {}", self.token))
            .send()
            .await
            .map_err(|e| init_error(SyncError::transport(&endpoint, e)))?;
        let rows: Vec<TokenRow> = ensure_success(&endpoint, response)
            .await
            .map_err(init_error)?
            .json()
            .await
            .map_err(|e| init_error(SyncError::transport(&endpoint, e)))?;

        match select_credentials(&rows, token_id) {
            Some(credentials) => {
                tracing::debug!(
                    "Token {} resolved to warehouse {}",
                    token_id,
                    credentials.warehouse_id
                );
                Ok(credentials)
            }
            None => {
                tracing::error!("Warehouse id is not found for token {}", token_id);
                Err(SyncError::Initialization(format!(
                    "Warehouse id is not found for token {}",
                    token_id
                )))
            }
        }
    }
}

/// Первая запись с нужным ID и заполненным складом
fn select_credentials(rows: &[TokenRow], token_id: i64) -> Option<Credentials> {
    rows.iter()
        .find(|row| row.id == token_id && row.warehouse_id.is_some())
        .and_then(|row| {
            Some(Credentials {
                warehouse_id: row.warehouse_id?,
                token: row.common_token.clone(),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<TokenRow> {
        serde_json::from_str(
            r#"[
                {"id": 1, "warehouse_id": null, "common_token": "no-warehouse"},
                {"id": 2, "warehouse_id": 77, "common_token": "other"},
                {"id": 1, "warehouse_id": 123, "common_token": "token"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_skips_rows_without_warehouse() {
        let credentials = select_credentials(&rows(), 1).unwrap();
        assert_eq!(credentials.warehouse_id, 123);
        assert_eq!(credentials.token, "token");
    }

    #[test]
    fn test_unknown_token_id() {
        assert!(select_credentials(&rows(), 5).is_none());
    }
}
