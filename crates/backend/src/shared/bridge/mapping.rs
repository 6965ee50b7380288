use contracts::domain::mapping::{MappedItem, MappingOutcome, MappingRecord};
use std::collections::{HashMap, HashSet};

use crate::shared::config::BridgeConfig;
use crate::shared::errors::{ensure_same_len, SyncError, SyncResult};
use crate::shared::http::{build_http_client, ensure_success};

/// Клиент сервиса сопоставления: внутренний ID -> баркод и nmId
pub struct MappingClient {
    client: reqwest::Client,
    mapping_url: String,
}

impl MappingClient {
    pub fn new(config: &BridgeConfig) -> SyncResult<Self> {
        Ok(Self {
            client: build_http_client(config.timeout_secs, None)?,
            mapping_url: config.mapping_url.clone(),
        })
    }

    /// Сопоставить внутренние ID и приложить к каждому целевое значение.
    ///
    /// Один запрос к bridge на весь список. Значения привязываются по ID,
    /// а не по позиции: bridge не обязан сохранять порядок. Результат
    /// идёт в порядке запроса, ненайденные ID попадают в `missing`.
    pub async fn get_mapped_data(&self, ids: &[String], values: &[i64]) -> SyncResult<MappingOutcome> {
        validate_ids_and_values(ids, values)?;
        if ids.is_empty() {
            return Ok(MappingOutcome::default());
        }

        let records = self.fetch_records(ids).await?;
        let outcome = join_records(ids, values, records);

        if !outcome.missing.is_empty() {
            tracing::warn!("Mapping not found for: {:?}", outcome.missing);
        }
        Ok(outcome)
    }

    /// GET mapping_url?ms_id=<id1,id2,...>
    pub async fn fetch_records(&self, ids: &[String]) -> SyncResult<Vec<MappingRecord>> {
        let endpoint = format!("GET {}", self.mapping_url);
        let joined = ids.join(",");
        tracing::debug!("Mapping request: ms_id={}", joined);

        let response = self
            .client
            .get(&self.mapping_url)
            .query(&[("ms_id", joined.as_str())])
            .send()
            .await
            .map_err(|e| SyncError::transport(&endpoint, e))?;

        ensure_success(&endpoint, response)
            .await
            .inspect_err(|e| tracing::error!("Mapping request for {:?} failed: {}", ids, e))?
            .json::<Vec<MappingRecord>>()
            .await
            .map_err(|e| SyncError::transport(&endpoint, e))
    }
}

/// Проверка входных списков: одинаковая длина, непустые и неповторяющиеся ID
pub fn validate_ids_and_values(ids: &[String], values: &[i64]) -> SyncResult<()> {
    ensure_same_len(ids.len(), values.len())?;

    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if id.trim().is_empty() {
            return Err(SyncError::InvalidInput("ids must not be blank".into()));
        }
        if !seen.insert(id.as_str()) {
            return Err(SyncError::InvalidInput(format!("duplicate id '{}'", id)));
        }
    }
    Ok(())
}

/// Склеить ответ bridge с запрошенными значениями
fn join_records(ids: &[String], values: &[i64], records: Vec<MappingRecord>) -> MappingOutcome {
    // Для одного ID обходимся без словаря
    if let ([id], [value]) = (ids, values) {
        return match records.into_iter().find(|r| &r.ms_id == id) {
            Some(record) => MappingOutcome {
                resolved: vec![MappedItem::from_record(record, *value)],
                missing: vec![],
            },
            None => MappingOutcome {
                resolved: vec![],
                missing: vec![id.clone()],
            },
        };
    }

    let id_value_map: HashMap<&str, (usize, i64)> = ids
        .iter()
        .zip(values)
        .enumerate()
        .map(|(pos, (id, value))| (id.as_str(), (pos, *value)))
        .collect();

    let mut found: Vec<Option<MappedItem>> = vec![None; ids.len()];
    for record in records {
        match id_value_map.get(record.ms_id.as_str()) {
            Some(&(pos, value)) => {
                if found[pos].is_none() {
                    found[pos] = Some(MappedItem::from_record(record, value));
                }
            }
            None => tracing::warn!("Mapping returned unrequested id {}", record.ms_id),
        }
    }

    let mut outcome = MappingOutcome::default();
    for (id, item) in ids.iter().zip(found) {
        match item {
            Some(item) => outcome.resolved.push(item),
            None => outcome.missing.push(id.clone()),
        }
    }
    outcome
}
