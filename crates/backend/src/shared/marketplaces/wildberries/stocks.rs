use contracts::domain::mapping::MappedItem;
use contracts::domain::stocks::StockEntry;
use contracts::shared::refresh_report::RefreshReport;

use super::{ensure_non_negative, WildberriesAdapter};
use crate::shared::bridge::mapping::validate_ids_and_values;
use crate::shared::chunks::get_chunks;
use crate::shared::errors::{SyncError, SyncResult};

fn stock_entries(items: &[MappedItem]) -> Vec<StockEntry> {
    items
        .iter()
        .map(|item| StockEntry {
            sku: item.marketplace_sku.clone(),
            amount: item.target_value,
        })
        .collect()
}

impl WildberriesAdapter {
    /// Остатки на складе продавца по внутренним ID
    pub(super) async fn get_stocks(&self, ids: &[String]) -> SyncResult<Vec<StockEntry>> {
        let zeros = vec![0; ids.len()];
        let outcome = self.mapping.get_mapped_data(ids, &zeros).await?;
        if !outcome.missing.is_empty() {
            return Err(SyncError::MappingNotFound { ids: outcome.missing });
        }
        if outcome.resolved.is_empty() {
            return Ok(Vec::new());
        }

        let skus = outcome
            .resolved
            .iter()
            .map(|item| item.marketplace_sku.clone())
            .collect();
        self.api.query_stocks(skus).await.inspect_err(|e| {
            tracing::error!("Wildberries: {:?} stock is not received. Error: {}", ids, e)
        })
    }

    pub(super) async fn update_stock(&self, id: &str, value: i64) -> SyncResult<()> {
        ensure_non_negative(&[value], "stock")?;
        let ids = [id.to_string()];
        let outcome = self.mapping.get_mapped_data(&ids, &[value]).await?;
        if !outcome.missing.is_empty() {
            return Err(SyncError::MappingNotFound { ids: outcome.missing });
        }

        self.api
            .put_stocks(stock_entries(&outcome.resolved))
            .await
            .inspect_err(|e| {
                tracing::error!("Wildberries: {} stock is not refreshed. Error: {}", id, e)
            })?;
        tracing::info!("Wildberries: {} stock is refreshed", id);
        Ok(())
    }

    /// Пакетная запись остатков. Списки длиннее лимита режутся на чанки,
    /// каждый чанк сопоставляется и пишется отдельно, строго по очереди.
    pub(super) async fn update_stocks(&self, ids: &[String], values: &[i64]) -> SyncResult<RefreshReport> {
        validate_ids_and_values(ids, values)?;
        ensure_non_negative(values, "stock")?;

        if ids.len() <= self.items_refresh_limit {
            return self.update_stocks_chunk(ids, values).await;
        }

        let mut report = RefreshReport::default();
        for (chunk_ids, chunk_values) in get_chunks(ids, values, self.items_refresh_limit) {
            report.merge(self.update_stocks_chunk(chunk_ids, chunk_values).await?);
        }
        Ok(report)
    }

    async fn update_stocks_chunk(&self, ids: &[String], values: &[i64]) -> SyncResult<RefreshReport> {
        let outcome = self.mapping.get_mapped_data(ids, values).await?;
        if outcome.is_empty() {
            return Ok(RefreshReport {
                missing: outcome.missing,
                ..Default::default()
            });
        }

        self.api
            .put_stocks(stock_entries(&outcome.resolved))
            .await
            .inspect_err(|e| {
                tracing::error!("Wildberries: {:?} stock is not refreshed. Error: {}", ids, e)
            })?;
        tracing::info!("Wildberries: {} stocks are refreshed", outcome.resolved.len());

        Ok(RefreshReport {
            updated: outcome.resolved_ids(),
            missing: outcome.missing,
            rounds: 0,
            supply_id: None,
        })
    }
}
