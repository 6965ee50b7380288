pub mod api_client;
pub mod prices;
pub mod statuses;
pub mod stocks;

use async_trait::async_trait;
use contracts::domain::stocks::StockEntry;
use contracts::enums::marketplace_type::MarketplaceType;
use contracts::shared::refresh_report::RefreshReport;
use std::collections::HashMap;

use super::Marketplace;
use crate::shared::bridge::{CredentialProvider, MappingClient};
use crate::shared::config::Config;
use crate::shared::errors::{SyncError, SyncResult};
use api_client::WildberriesApiClient;

/// Адаптер Wildberries: сопоставление через bridge + Marketplace API
pub struct WildberriesAdapter {
    api: WildberriesApiClient,
    mapping: MappingClient,
    items_refresh_limit: usize,
}

impl WildberriesAdapter {
    /// Получить склад и токен продавца и собрать адаптер.
    /// Любая ошибка здесь фатальна: `SyncError::Initialization`.
    pub async fn connect(config: &Config, provider: &dyn CredentialProvider) -> SyncResult<Self> {
        let wb = &config.wildberries;
        let credentials = provider
            .credentials(wb.token_id)
            .await
            .inspect_err(|e| tracing::error!("Wildberries is not initialized: {}", e))?;

        let api = WildberriesApiClient::new(
            &wb.api_url,
            &credentials.token,
            credentials.warehouse_id,
            wb.timeout_secs,
        )?;
        let mapping = MappingClient::new(&config.bridge)?;

        tracing::info!(
            "Wildberries is initialized (warehouse {})",
            credentials.warehouse_id
        );
        Self::from_parts(api, mapping, wb.items_refresh_limit)
    }

    pub fn from_parts(
        api: WildberriesApiClient,
        mapping: MappingClient,
        items_refresh_limit: usize,
    ) -> SyncResult<Self> {
        if items_refresh_limit == 0 {
            return Err(SyncError::Initialization(
                "items_refresh_limit must be greater than 0".into(),
            ));
        }
        Ok(Self {
            api,
            mapping,
            items_refresh_limit,
        })
    }

    pub fn items_refresh_limit(&self) -> usize {
        self.items_refresh_limit
    }
}

/// Остатки и цены не бывают отрицательными
fn ensure_non_negative(values: &[i64], what: &str) -> SyncResult<()> {
    match values.iter().find(|v| **v < 0) {
        Some(v) => Err(SyncError::InvalidInput(format!(
            "{} must not be negative, got {}",
            what, v
        ))),
        None => Ok(()),
    }
}

#[async_trait]
impl Marketplace for WildberriesAdapter {
    fn marketplace_type(&self) -> MarketplaceType {
        MarketplaceType::Wildberries
    }

    async fn fetch_stocks(&self, ids: &[String]) -> SyncResult<Vec<StockEntry>> {
        self.get_stocks(ids).await
    }

    async fn fetch_prices(&self) -> SyncResult<HashMap<i64, i64>> {
        self.api.fetch_prices().await
    }

    async fn refresh_stock(&self, id: &str, value: i64) -> SyncResult<()> {
        self.update_stock(id, value).await
    }

    async fn refresh_stocks(&self, ids: &[String], values: &[i64]) -> SyncResult<RefreshReport> {
        self.update_stocks(ids, values).await
    }

    async fn refresh_price(&self, id: &str, value: i64) -> SyncResult<()> {
        self.update_price(id, value).await
    }

    async fn refresh_prices(&self, ids: &[String], values: &[i64]) -> SyncResult<RefreshReport> {
        self.update_prices(ids, values).await
    }

    async fn refresh_status(
        &self,
        order_id: i64,
        status: &str,
        supply_id: Option<&str>,
    ) -> SyncResult<Option<String>> {
        self.update_status(order_id, status, supply_id).await
    }

    async fn refresh_statuses(&self, order_ids: &[i64], statuses: &[String]) -> SyncResult<RefreshReport> {
        self.update_statuses(order_ids, statuses).await
    }
}
