use thiserror::Error;

/// Ошибки синхронизации с маркетплейсом
#[derive(Debug, Error)]
pub enum SyncError {
    /// Не удалось получить склад и токен продавца
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// Ошибка вызывающего кода: разная длина списков, пустые или повторяющиеся ID
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Mapping not found for: {}", .ids.join(","))]
    MappingNotFound { ids: Vec<String> },

    /// Неуспешный ответ или сетевая ошибка при обращении к внешнему API
    #[error("Remote call {endpoint} failed{}: {message}", status_suffix(.status))]
    RemoteCall {
        endpoint: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Invalid status: {0}")]
    InvalidStatus(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|s| format!(" with status {}", s))
        .unwrap_or_default()
}

pub type SyncResult<T> = Result<T, SyncError>;

impl SyncError {
    pub fn remote(endpoint: impl Into<String>, status: Option<u16>, message: impl Into<String>) -> Self {
        SyncError::RemoteCall {
            endpoint: endpoint.into(),
            status,
            message: message.into(),
        }
    }

    /// Перевод ошибки reqwest в RemoteCall с уточнением причины
    pub fn transport(endpoint: impl Into<String>, e: reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            format!("request timeout: {}", e)
        } else if e.is_connect() {
            format!("connection error: {}", e)
        } else if e.is_decode() {
            format!("invalid response body: {}", e)
        } else {
            e.to_string()
        };
        SyncError::remote(endpoint, e.status().map(|s| s.as_u16()), message)
    }
}

/// Проверка, что списки ID и значений одинаковой длины
pub fn ensure_same_len(ids_len: usize, values_len: usize) -> SyncResult<()> {
    if ids_len != values_len {
        return Err(SyncError::InvalidInput(format!(
            "ids and values should have the same length ({} != {})",
            ids_len, values_len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = SyncError::MappingNotFound {
            ids: vec!["1".into(), "2".into()],
        };
        assert_eq!(e.to_string(), "Mapping not found for: 1,2");

        let e = SyncError::remote("PUT /api/v3/stocks/1", Some(409), "conflict");
        assert_eq!(
            e.to_string(),
            "Remote call PUT /api/v3/stocks/1 failed with status 409: conflict"
        );

        let e = SyncError::remote("GET /mapping", None, "connection error");
        assert_eq!(e.to_string(), "Remote call GET /mapping failed: connection error");
    }

    #[test]
    fn test_ensure_same_len() {
        assert!(ensure_same_len(2, 2).is_ok());
        assert!(matches!(ensure_same_len(2, 1), Err(SyncError::InvalidInput(_))));
    }
}
