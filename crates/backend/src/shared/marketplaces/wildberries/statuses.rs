use contracts::domain::order_status::StatusTransition;
use contracts::shared::refresh_report::RefreshReport;

use super::WildberriesAdapter;
use crate::shared::errors::{ensure_same_len, SyncError, SyncResult};

fn parse_transition(status: &str) -> SyncResult<StatusTransition> {
    status.parse().map_err(SyncError::InvalidStatus)
}

impl WildberriesAdapter {
    pub(super) async fn update_status(
        &self,
        order_id: i64,
        status: &str,
        supply_id: Option<&str>,
    ) -> SyncResult<Option<String>> {
        let transition = parse_transition(status)?;
        let mut supply_id = supply_id.map(str::to_string);
        self.apply_transition(order_id, transition, &mut supply_id, || {
            format!("supply_order{}", order_id)
        })
        .await?;
        Ok(supply_id)
    }

    /// Пакетная смена статусов. Все имена проверяются до первого запроса.
    /// На весь пакет создаётся одна поставка, при первом "confirm".
    /// Пакет только из отмен поставку не создаёт, `supply_id` в отчёте будет `None`.
    pub(super) async fn update_statuses(
        &self,
        order_ids: &[i64],
        statuses: &[String],
    ) -> SyncResult<RefreshReport> {
        ensure_same_len(order_ids.len(), statuses.len())?;
        let transitions = statuses
            .iter()
            .map(|s| parse_transition(s))
            .collect::<SyncResult<Vec<_>>>()?;

        let mut report = RefreshReport::default();
        for (order_id, transition) in order_ids.iter().zip(transitions) {
            self.apply_transition(*order_id, transition, &mut report.supply_id, || {
                "supply_orders".to_string()
            })
            .await?;
            report.updated.push(order_id.to_string());
        }
        Ok(report)
    }

    async fn apply_transition<F>(
        &self,
        order_id: i64,
        transition: StatusTransition,
        supply_id: &mut Option<String>,
        supply_name: F,
    ) -> SyncResult<()>
    where
        F: FnOnce() -> String + Send,
    {
        let result = match transition {
            StatusTransition::Confirm => {
                let supply = match supply_id.as_deref() {
                    Some(id) => id.to_string(),
                    None => {
                        let created = self
                            .api
                            .create_supply(&supply_name())
                            .await
                            .inspect_err(|e| {
                                tracing::error!(
                                    "Wildberries: supply for order {} is not created. Error: {}",
                                    order_id,
                                    e
                                )
                            })?;
                        *supply_id = Some(created.id.clone());
                        created.id
                    }
                };
                self.api.add_order_to_supply(&supply, order_id).await
            }
            StatusTransition::Cancel => self.api.cancel_order(order_id).await,
        };

        match &result {
            Ok(()) => tracing::info!(
                "Wildberries: order {} is {:?}",
                order_id,
                transition.target_state()
            ),
            Err(e) => tracing::error!(
                "Wildberries: order {} {} failed. Error: {}",
                order_id,
                transition.code(),
                e
            ),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transition() {
        assert_eq!(parse_transition("confirm").unwrap(), StatusTransition::Confirm);
        assert!(matches!(
            parse_transition("archive"),
            Err(SyncError::InvalidStatus(_))
        ));
    }
}
