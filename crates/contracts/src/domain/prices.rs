use serde::{Deserialize, Serialize};

use super::mapping::MappedItem;

/// Товар в процессе переоценки: сопоставленный товар плюс текущая цена
/// на маркетплейсе
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepricingItem {
    #[serde(flatten)]
    pub item: MappedItem,
    /// `None` означает, что маркетплейс не знает цены товара (новая карточка)
    pub current_value: Option<i64>,
}

impl RepricingItem {
    pub fn new(item: MappedItem, current_value: Option<i64>) -> Self {
        Self {
            item,
            current_value,
        }
    }

    pub fn nm_id(&self) -> i64 {
        self.item.marketplace_numeric_id
    }

    pub fn target_value(&self) -> i64 {
        self.item.target_value
    }

    /// Копия товара после промежуточного шага: цель прежняя, текущая цена новая
    pub fn stepped_to(&self, price: i64) -> Self {
        Self {
            item: self.item.clone(),
            current_value: Some(price),
        }
    }
}

/// Строка записи цены для Wildberries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEntry {
    #[serde(rename = "nmId")]
    pub nm_id: i64,
    pub price: i64,
}

/// Строка ответа GET /public/api/v1/info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceInfoRow {
    #[serde(rename = "nmId")]
    pub nm_id: i64,
    pub price: i64,
    #[serde(default)]
    pub discount: Option<i64>,
    #[serde(rename = "promoCode", default)]
    pub promo_code: Option<i64>,
}

/// Ответ на загрузку цен
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceUploadResponse {
    #[serde(rename = "uploadId", default)]
    pub upload_id: Option<i64>,
    #[serde(rename = "errorText", default)]
    pub error_text: Option<String>,
}
