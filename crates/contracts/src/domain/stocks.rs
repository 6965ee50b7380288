use serde::{Deserialize, Serialize};

/// Остаток по баркоду на складе продавца
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    pub sku: String,
    pub amount: i64,
}

/// Тело PUT /api/v3/stocks/{warehouseId}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockUpdateRequest {
    pub stocks: Vec<StockEntry>,
}

/// Тело POST /api/v3/stocks/{warehouseId}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockQueryRequest {
    pub skus: Vec<String>,
}

/// Ответ POST /api/v3/stocks/{warehouseId}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockQueryResponse {
    #[serde(default)]
    pub stocks: Vec<StockEntry>,
}
