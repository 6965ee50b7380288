use serde::{Deserialize, Serialize};

/// Итог пакетного обновления на маркетплейсе
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshReport {
    /// Внутренние ID (или ID заданий), по которым запись подтверждена
    pub updated: Vec<String>,
    /// ID, для которых bridge не вернул сопоставления
    pub missing: Vec<String>,
    /// Количество раундов переоценки (0 для остатков и статусов)
    pub rounds: u32,
    /// Поставка, созданная при подтверждении заданий
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supply_id: Option<String>,
}

impl RefreshReport {
    /// Присоединить результат следующего чанка
    pub fn merge(&mut self, other: RefreshReport) {
        self.updated.extend(other.updated);
        self.missing.extend(other.missing);
        self.rounds = self.rounds.max(other.rounds);
        if self.supply_id.is_none() {
            self.supply_id = other.supply_id;
        }
    }

    /// Все ли переданные ID обработаны
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_order_and_max_rounds() {
        let mut report = RefreshReport {
            updated: vec!["1".into()],
            missing: vec![],
            rounds: 3,
            supply_id: None,
        };
        report.merge(RefreshReport {
            updated: vec!["2".into()],
            missing: vec!["3".into()],
            rounds: 1,
            supply_id: Some("WB-GI-1".into()),
        });

        assert_eq!(report.updated, vec!["1", "2"]);
        assert_eq!(report.missing, vec!["3"]);
        assert_eq!(report.rounds, 3);
        assert_eq!(report.supply_id.as_deref(), Some("WB-GI-1"));
        assert!(!report.is_complete());
    }
}
