pub mod wildberries;

use async_trait::async_trait;
use contracts::domain::stocks::StockEntry;
use contracts::enums::marketplace_type::MarketplaceType;
use contracts::shared::refresh_report::RefreshReport;
use std::collections::HashMap;

use crate::shared::bridge::BridgeTokenService;
use crate::shared::config::Config;
use crate::shared::errors::{SyncError, SyncResult};

/// Операции выгрузки, которые умеет адаптер маркетплейса
#[async_trait]
pub trait Marketplace: Send + Sync {
    fn marketplace_type(&self) -> MarketplaceType;

    /// Текущие остатки по внутренним ID
    async fn fetch_stocks(&self, ids: &[String]) -> SyncResult<Vec<StockEntry>>;

    /// Текущие цены: nmId -> цена
    async fn fetch_prices(&self) -> SyncResult<HashMap<i64, i64>>;

    async fn refresh_stock(&self, id: &str, value: i64) -> SyncResult<()>;

    async fn refresh_stocks(&self, ids: &[String], values: &[i64]) -> SyncResult<RefreshReport>;

    async fn refresh_price(&self, id: &str, value: i64) -> SyncResult<()>;

    async fn refresh_prices(&self, ids: &[String], values: &[i64]) -> SyncResult<RefreshReport>;

    /// Переход статуса одного задания. Для "confirm" без `supply_id`
    /// сначала создаётся поставка. Возвращает ID использованной поставки.
    async fn refresh_status(
        &self,
        order_id: i64,
        status: &str,
        supply_id: Option<&str>,
    ) -> SyncResult<Option<String>>;

    async fn refresh_statuses(&self, order_ids: &[i64], statuses: &[String]) -> SyncResult<RefreshReport>;
}

/// Определение типа маркетплейса по коду или описанию
pub fn get_marketplace_type(marketplace_code: &str) -> Option<MarketplaceType> {
    let code_lower = marketplace_code.trim().to_lowercase();

    if let Some(mp_type) = MarketplaceType::from_code(&code_lower) {
        return Some(mp_type);
    }

    if code_lower.contains("ozon") || code_lower.contains("озон") {
        return Some(MarketplaceType::Ozon);
    }
    if code_lower.contains("wildberries") || code_lower.contains("вб") || code_lower == "wb" {
        return Some(MarketplaceType::Wildberries);
    }

    None
}

/// Создать адаптер нужного маркетплейса: получить токен продавца через bridge
/// и настроить HTTP-клиент
pub async fn connect(marketplace_type: MarketplaceType, config: &Config) -> SyncResult<Box<dyn Marketplace>> {
    match marketplace_type {
        MarketplaceType::Wildberries => {
            let provider = BridgeTokenService::new(&config.bridge)?;
            let adapter = wildberries::WildberriesAdapter::connect(config, &provider).await?;
            Ok(Box::new(adapter))
        }
        MarketplaceType::Ozon => Err(SyncError::Initialization(
            "Интеграция с Ozon пока не реализована".into(),
        )),
    }
}
