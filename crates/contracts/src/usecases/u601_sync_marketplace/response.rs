use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::marketplace_type::MarketplaceType;
use crate::shared::refresh_report::RefreshReport;

/// Ответ на выгрузку
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResponse {
    pub session_id: String,
    pub marketplace: MarketplaceType,
    pub target: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: RefreshReport,
}
