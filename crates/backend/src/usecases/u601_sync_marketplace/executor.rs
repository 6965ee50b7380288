use chrono::Utc;
use contracts::shared::refresh_report::RefreshReport;
use contracts::usecases::u601_sync_marketplace::{SyncEvent, SyncRequest, SyncResponse, SyncTarget};
use uuid::Uuid;

use crate::shared::errors::{SyncError, SyncResult};
use crate::shared::marketplaces::Marketplace;

/// Executor для UseCase выгрузки на маркетплейс
pub struct SyncExecutor {
    marketplace: Box<dyn Marketplace>,
}

impl SyncExecutor {
    pub fn new(marketplace: Box<dyn Marketplace>) -> Self {
        Self { marketplace }
    }

    /// Выполнить выгрузку
    pub async fn execute(&self, request: SyncRequest) -> SyncResult<SyncResponse> {
        let marketplace_type = self.marketplace.marketplace_type();
        if request.marketplace != marketplace_type {
            return Err(SyncError::InvalidInput(format!(
                "request is for {}, executor is connected to {}",
                request.marketplace, marketplace_type
            )));
        }

        let session_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        let target = request.target.name().to_string();

        emit(&SyncEvent::SyncStarted {
            session_id: session_id.clone(),
            marketplace: marketplace_type.display_name().to_string(),
            target: target.clone(),
            total: request.target.len(),
        });

        let report = match self.run(&request.target).await {
            Ok(report) => report,
            Err(e) => {
                emit(&SyncEvent::SyncFailed {
                    session_id,
                    error: e.to_string(),
                });
                return Err(e);
            }
        };

        emit(&SyncEvent::SyncCompleted {
            session_id: session_id.clone(),
            updated: report.updated.len(),
            missing: report.missing.len(),
            rounds: report.rounds,
        });

        Ok(SyncResponse {
            session_id,
            marketplace: marketplace_type,
            target,
            started_at,
            finished_at: Utc::now(),
            report,
        })
    }

    async fn run(&self, target: &SyncTarget) -> SyncResult<RefreshReport> {
        match target {
            SyncTarget::Stocks { ids, values } => self.marketplace.refresh_stocks(ids, values).await,
            SyncTarget::Prices { ids, values } => self.marketplace.refresh_prices(ids, values).await,
            SyncTarget::Statuses { order_ids, statuses } => {
                self.marketplace.refresh_statuses(order_ids, statuses).await
            }
        }
    }
}

fn emit(event: &SyncEvent) {
    match event {
        SyncEvent::SyncFailed { .. } => {
            tracing::error!("{}", serde_json::to_string(event).unwrap_or_default())
        }
        _ => tracing::info!("{}", serde_json::to_string(event).unwrap_or_default()),
    }
}
