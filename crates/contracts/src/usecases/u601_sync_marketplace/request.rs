use serde::{Deserialize, Serialize};

use crate::enums::marketplace_type::MarketplaceType;

/// Запрос на выгрузку данных на маркетплейс
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncRequest {
    #[serde(default)]
    pub marketplace: MarketplaceType,

    #[serde(flatten)]
    pub target: SyncTarget,
}

/// Что выгружаем
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum SyncTarget {
    /// Остатки: внутренние ID и новые количества
    Stocks { ids: Vec<String>, values: Vec<i64> },
    /// Цены: внутренние ID и целевые цены
    Prices { ids: Vec<String>, values: Vec<i64> },
    /// Статусы: ID сборочных заданий и имена переходов ("confirm" / "cancel")
    Statuses {
        order_ids: Vec<i64>,
        statuses: Vec<String>,
    },
}

impl SyncTarget {
    pub fn name(&self) -> &'static str {
        match self {
            SyncTarget::Stocks { .. } => "stocks",
            SyncTarget::Prices { .. } => "prices",
            SyncTarget::Statuses { .. } => "statuses",
        }
    }

    /// Количество позиций в запросе
    pub fn len(&self) -> usize {
        match self {
            SyncTarget::Stocks { ids, .. } | SyncTarget::Prices { ids, .. } => ids.len(),
            SyncTarget::Statuses { order_ids, .. } => order_ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
