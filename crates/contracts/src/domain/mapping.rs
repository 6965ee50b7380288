use serde::{Deserialize, Deserializer, Serialize};

/// Запись сервиса сопоставления (bridge): внутренний ID товара
/// и его идентификаторы на маркетплейсе
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRecord {
    pub ms_id: String,
    pub barcodes: String,
    #[serde(deserialize_with = "number_or_string")]
    pub nm_id: i64,
    #[serde(default)]
    pub name: String,
}

/// Сервис сопоставления отдаёт nm_id то числом, то строкой
fn number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid nm_id '{}': {}", s, e))),
    }
}

/// Товар, сопоставленный с маркетплейсом, вместе с целевым значением
/// (остаток или цена), которое передал вызывающий код
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedItem {
    pub internal_id: String,
    /// Баркод, используется для записи остатков
    pub marketplace_sku: String,
    /// nmId, используется для записи цен
    pub marketplace_numeric_id: i64,
    pub display_name: String,
    pub target_value: i64,
}

impl MappedItem {
    pub fn from_record(record: MappingRecord, target_value: i64) -> Self {
        Self {
            internal_id: record.ms_id,
            marketplace_sku: record.barcodes,
            marketplace_numeric_id: record.nm_id,
            display_name: record.name,
            target_value,
        }
    }
}

/// Результат сопоставления: найденные товары и ID, которых нет в bridge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingOutcome {
    pub resolved: Vec<MappedItem>,
    pub missing: Vec<String>,
}

impl MappingOutcome {
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    pub fn resolved_ids(&self) -> Vec<String> {
        self.resolved.iter().map(|i| i.internal_id.clone()).collect()
    }
}
