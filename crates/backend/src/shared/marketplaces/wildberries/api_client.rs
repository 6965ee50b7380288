use contracts::domain::order_status::{CreateSupplyRequest, Supply};
use contracts::domain::prices::{PriceEntry, PriceInfoRow, PriceUploadResponse};
use contracts::domain::stocks::{StockEntry, StockQueryRequest, StockQueryResponse, StockUpdateRequest};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::collections::HashMap;

use crate::shared::config::base_url;
use crate::shared::errors::{SyncError, SyncResult};
use crate::shared::http::{build_http_client, ensure_success, preview};

/// HTTP-клиент Wildberries Marketplace API.
///
/// Токен продавца кладётся в заголовок `Authorization` один раз при создании
/// и дальше только читается.
pub struct WildberriesApiClient {
    client: reqwest::Client,
    base_url: String,
    warehouse_id: i64,
}

impl WildberriesApiClient {
    pub fn new(api_url: &str, token: &str, warehouse_id: i64, timeout_secs: u64) -> SyncResult<Self> {
        // Очищаем токен от невидимых символов и пробелов
        let token = token.trim().replace(['\n', '\r', '\t'], "");
        if token.is_empty() {
            return Err(SyncError::Initialization("API Key не может быть пустым".into()));
        }
        if !token.is_ascii() {
            return Err(SyncError::Initialization(
                "API ключ содержит недопустимые символы".into(),
            ));
        }
        let mut auth = HeaderValue::from_str(&token).map_err(|_| {
            SyncError::Initialization("API ключ содержит недопустимые символы".into())
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        Ok(Self {
            client: build_http_client(timeout_secs, Some(headers))?,
            base_url: base_url(api_url).to_string(),
            warehouse_id,
        })
    }

    pub fn warehouse_id(&self) -> i64 {
        self.warehouse_id
    }

    async fn execute(&self, endpoint: &str, request: reqwest::RequestBuilder) -> SyncResult<reqwest::Response> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Wildberries API connection error ({}): {}", endpoint, e);
            SyncError::transport(endpoint, e)
        })?;
        tracing::debug!("{} -> {}", endpoint, response.status());
        ensure_success(endpoint, response).await
    }

    /// PUT /api/v3/stocks/{warehouseId}
    pub async fn put_stocks(&self, stocks: Vec<StockEntry>) -> SyncResult<()> {
        let endpoint = format!("PUT /api/v3/stocks/{}", self.warehouse_id);
        let url = format!("{}/api/v3/stocks/{}", self.base_url, self.warehouse_id);
        let body = StockUpdateRequest { stocks };

        self.execute(&endpoint, self.client.put(&url).json(&body)).await?;
        Ok(())
    }

    /// POST /api/v3/stocks/{warehouseId}: остатки по списку баркодов
    pub async fn query_stocks(&self, skus: Vec<String>) -> SyncResult<Vec<StockEntry>> {
        let endpoint = format!("POST /api/v3/stocks/{}", self.warehouse_id);
        let url = format!("{}/api/v3/stocks/{}", self.base_url, self.warehouse_id);
        let body = StockQueryRequest { skus };

        let response = self.execute(&endpoint, self.client.post(&url).json(&body)).await?;
        let data: StockQueryResponse = response
            .json()
            .await
            .map_err(|e| SyncError::transport(&endpoint, e))?;
        Ok(data.stocks)
    }

    /// GET /public/api/v1/info: текущие цены всего каталога продавца
    pub async fn fetch_prices(&self) -> SyncResult<HashMap<i64, i64>> {
        let endpoint = "GET /public/api/v1/info";
        let url = format!("{}/public/api/v1/info", self.base_url);

        let response = self.execute(endpoint, self.client.get(&url)).await?;
        let rows: Vec<PriceInfoRow> = response
            .json()
            .await
            .map_err(|e| SyncError::transport(endpoint, e))?;

        tracing::debug!("Wildberries price info: {} rows", rows.len());
        Ok(rows.into_iter().map(|row| (row.nm_id, row.price)).collect())
    }

    /// POST /public/api/v1/prices
    pub async fn post_prices(&self, prices: &[PriceEntry]) -> SyncResult<PriceUploadResponse> {
        let endpoint = "POST /public/api/v1/prices";
        let url = format!("{}/public/api/v1/prices", self.base_url);

        let response = self.execute(endpoint, self.client.post(&url).json(prices)).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SyncError::transport(endpoint, e))?;
        tracing::info!("Wildberries price upload response: {} {}", status, preview(&body));

        // Тело ответа только для аудита: 2xx означает, что загрузка принята
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    /// POST /api/v3/supplies
    pub async fn create_supply(&self, name: &str) -> SyncResult<Supply> {
        let endpoint = "POST /api/v3/supplies";
        let url = format!("{}/api/v3/supplies", self.base_url);
        let body = CreateSupplyRequest {
            name: name.to_string(),
        };

        let response = self.execute(endpoint, self.client.post(&url).json(&body)).await?;
        let supply: Supply = response
            .json()
            .await
            .map_err(|e| SyncError::transport(endpoint, e))?;
        tracing::info!("Wildberries supply {} created", supply.id);
        Ok(supply)
    }

    /// PATCH /api/v3/supplies/{supplyId}/orders/{orderId}
    pub async fn add_order_to_supply(&self, supply_id: &str, order_id: i64) -> SyncResult<()> {
        let endpoint = format!("PATCH /api/v3/supplies/{}/orders/{}", supply_id, order_id);
        let url = format!("{}/api/v3/supplies/{}/orders/{}", self.base_url, supply_id, order_id);

        self.execute(&endpoint, self.client.patch(&url)).await?;
        Ok(())
    }

    /// PATCH /api/v3/orders/{orderId}/cancel
    pub async fn cancel_order(&self, order_id: i64) -> SyncResult<()> {
        let endpoint = format!("PATCH /api/v3/orders/{}/cancel", order_id);
        let url = format!("{}/api/v3/orders/{}/cancel", self.base_url, order_id);

        self.execute(&endpoint, self.client.patch(&url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_token() {
        let result = WildberriesApiClient::new("https://wb.example/", " \n", 1, 10);
        assert!(matches!(result, Err(SyncError::Initialization(_))));
    }

    #[test]
    fn test_rejects_non_ascii_token() {
        let result = WildberriesApiClient::new("https://wb.example/", "токен", 1, 10);
        assert!(matches!(result, Err(SyncError::Initialization(_))));
    }

    #[test]
    fn test_trims_base_url() {
        let client = WildberriesApiClient::new("https://wb.example/", "token", 7, 10).unwrap();
        assert_eq!(client.base_url, "https://wb.example");
        assert_eq!(client.warehouse_id(), 7);
    }
}
