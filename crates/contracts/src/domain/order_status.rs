use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Состояние сборочного задания
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    Confirmed,
    Cancelled,
}

/// Переход статуса сборочного задания
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTransition {
    /// Добавить задание в поставку
    Confirm,
    /// Отменить задание
    Cancel,
}

impl StatusTransition {
    pub fn code(&self) -> &'static str {
        match self {
            StatusTransition::Confirm => "confirm",
            StatusTransition::Cancel => "cancel",
        }
    }

    /// Конечное состояние после перехода
    pub fn target_state(&self) -> OrderState {
        match self {
            StatusTransition::Confirm => OrderState::Confirmed,
            StatusTransition::Cancel => OrderState::Cancelled,
        }
    }
}

impl FromStr for StatusTransition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "confirm" => Ok(StatusTransition::Confirm),
            "cancel" => Ok(StatusTransition::Cancel),
            other => Err(format!("Status name is not valid: '{}'", other)),
        }
    }
}

/// Поставка Wildberries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supply {
    pub id: String,
}

/// Тело POST /api/v3/supplies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSupplyRequest {
    pub name: String,
}
