use serde::{Deserialize, Serialize};

/// События выгрузки
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncEvent {
    SyncStarted {
        session_id: String,
        marketplace: String,
        target: String,
        total: usize,
    },

    SyncCompleted {
        session_id: String,
        updated: usize,
        missing: usize,
        rounds: u32,
    },

    SyncFailed {
        session_id: String,
        error: String,
    },
}
