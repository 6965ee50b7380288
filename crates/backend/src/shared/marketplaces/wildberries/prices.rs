//! Переоценка на Wildberries.
//!
//! Маркетплейс отклоняет изменение цены больше чем в 2 раза за один шаг.
//! Поэтому цена идёт к цели раундами: пока цель ниже половины текущей
//! цены (или выше удвоенной), отправляется промежуточное значение, и товар
//! уходит в следующий раунд. Каждый раунд это один POST со всеми товарами
//! раунда, следующий начинается только после успешного ответа на предыдущий.
//! Откат уже принятых раундов не делается.

use contracts::domain::mapping::MappedItem;
use contracts::domain::prices::{PriceEntry, RepricingItem};
use contracts::shared::refresh_report::RefreshReport;
use std::collections::HashMap;

use super::{ensure_non_negative, WildberriesAdapter};
use crate::shared::bridge::mapping::validate_ids_and_values;
use crate::shared::chunks::get_chunks;
use crate::shared::errors::{SyncError, SyncResult};

/// Что отправить по товару в текущем раунде
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceStep {
    /// Цель достижима за один шаг, товар выходит из переоценки
    Final(i64),
    /// Допустимая промежуточная цена, товар остаётся на следующий раунд
    Intermediate(i64),
}

/// Следующий шаг цены при ограничении "не больше чем в 2 раза за раз".
///
/// Без известной текущей цены (или при нулевой) цель ставится сразу.
/// Половина считается с округлением вниз.
pub fn next_price_step(current: Option<i64>, target: i64) -> PriceStep {
    match current {
        Some(current) if current > 0 => {
            let half = current / 2;
            let double = current.saturating_mul(2);
            if target < half {
                PriceStep::Intermediate(half)
            } else if target > double {
                PriceStep::Intermediate(double)
            } else {
                PriceStep::Final(target)
            }
        }
        _ => PriceStep::Final(target),
    }
}

/// Один раунд переоценки
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceRound {
    /// Все цены раунда: и финальные, и промежуточные, в одном запросе
    pub entries: Vec<PriceEntry>,
    /// Товары, которым нужен ещё раунд (текущая цена уже сдвинута)
    pub pending: Vec<RepricingItem>,
}

pub fn plan_round(items: &[RepricingItem]) -> PriceRound {
    let mut round = PriceRound::default();
    for item in items {
        let price = match next_price_step(item.current_value, item.target_value()) {
            PriceStep::Final(price) => price,
            PriceStep::Intermediate(price) => {
                round.pending.push(item.stepped_to(price));
                price
            }
        };
        round.entries.push(PriceEntry {
            nm_id: item.nm_id(),
            price,
        });
    }
    round
}

/// Приложить текущие цены маркетплейса к сопоставленным товарам
fn attach_current_prices(items: Vec<MappedItem>, current: &HashMap<i64, i64>) -> Vec<RepricingItem> {
    items
        .into_iter()
        .map(|item| {
            let current_value = current.get(&item.marketplace_numeric_id).copied();
            if current_value.is_none() {
                tracing::warn!(
                    "Wildberries: no current price for {} (nmId {}), target is applied directly",
                    item.internal_id,
                    item.marketplace_numeric_id
                );
            }
            RepricingItem::new(item, current_value)
        })
        .collect()
}

impl WildberriesAdapter {
    pub(super) async fn update_price(&self, id: &str, value: i64) -> SyncResult<()> {
        let ids = [id.to_string()];
        ensure_non_negative(&[value], "price")?;
        let outcome = self.mapping.get_mapped_data(&ids, &[value]).await?;
        if !outcome.missing.is_empty() {
            return Err(SyncError::MappingNotFound { ids: outcome.missing });
        }

        let log_failure =
            |e: &SyncError| tracing::error!("Wildberries: {} price is not refreshed. Error: {}", id, e);
        let current = self.api.fetch_prices().await.inspect_err(log_failure)?;
        self.reconcile(attach_current_prices(outcome.resolved, &current))
            .await
            .inspect_err(log_failure)?;
        tracing::info!("Wildberries: {} price is refreshed", id);
        Ok(())
    }

    pub(super) async fn update_prices(&self, ids: &[String], values: &[i64]) -> SyncResult<RefreshReport> {
        validate_ids_and_values(ids, values)?;
        ensure_non_negative(values, "price")?;

        if ids.len() <= self.items_refresh_limit {
            return self.update_prices_chunk(ids, values).await;
        }

        let mut report = RefreshReport::default();
        for (chunk_ids, chunk_values) in get_chunks(ids, values, self.items_refresh_limit) {
            report.merge(self.update_prices_chunk(chunk_ids, chunk_values).await?);
        }
        Ok(report)
    }

    async fn update_prices_chunk(&self, ids: &[String], values: &[i64]) -> SyncResult<RefreshReport> {
        let outcome = self.mapping.get_mapped_data(ids, values).await?;
        if outcome.is_empty() {
            return Ok(RefreshReport {
                missing: outcome.missing,
                ..Default::default()
            });
        }

        let updated = outcome.resolved_ids();
        let log_failure =
            |e: &SyncError| tracing::error!("Wildberries: {:?} prices are not refreshed. Error: {}", ids, e);
        let current = self.api.fetch_prices().await.inspect_err(log_failure)?;
        let items = attach_current_prices(outcome.resolved, &current);

        let rounds = self.reconcile(items).await.inspect_err(log_failure)?;
        tracing::info!("Wildberries: {} prices are refreshed in {} rounds", updated.len(), rounds);

        Ok(RefreshReport {
            updated,
            missing: outcome.missing,
            rounds,
            supply_id: None,
        })
    }

    /// Отправлять раунды, пока есть товары, не дошедшие до цели.
    /// Возвращает число отправленных раундов.
    async fn reconcile(&self, items: Vec<RepricingItem>) -> SyncResult<u32> {
        let mut pending = items;
        let mut rounds = 0;

        while !pending.is_empty() {
            let round = plan_round(&pending);
            rounds += 1;
            tracing::debug!(
                "Price round {}: {} entries, {} stepped",
                rounds,
                round.entries.len(),
                round.pending.len()
            );

            let upload = self.api.post_prices(&round.entries).await?;
            if let Some(error_text) = upload.error_text.filter(|t| !t.is_empty()) {
                tracing::warn!("Wildberries price upload round {}: {}", rounds, error_text);
            }
            pending = round.pending;
        }

        Ok(rounds)
    }
}
