use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub bridge: BridgeConfig,
    pub wildberries: WildberriesConfig,
}

/// Сервисы bridge: выдача токенов и сопоставление товаров
#[derive(Debug, Deserialize, Clone)]
pub struct BridgeConfig {
    /// Сервисный токен для обращения к выдаче токенов
    #[serde(default)]
    pub token: String,
    pub token_url: String,
    pub mapping_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WildberriesConfig {
    pub api_url: String,
    /// ID записи в сервисе токенов, по которой выбирается склад и токен продавца
    pub token_id: i64,
    /// Максимум позиций в одном запросе записи остатков или цен
    #[serde(default = "default_items_refresh_limit")]
    pub items_refresh_limit: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_items_refresh_limit() -> usize {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[bridge]
token = ""
token_url = "http://localhost:8000/api/tokens/"
mapping_url = "http://localhost:8000/api/mapping/"

[wildberries]
api_url = "https://suppliers-api.wildberries.ru/"
token_id = 1
items_refresh_limit = 1000
"#;

/// Load configuration
///
/// Search order:
/// 1. Path from `MP_HANDLER_CONFIG`
/// 2. config.toml next to the executable
/// 3. Embedded default config
///
/// Environment variables `BGD_TOKEN`, `BGD_TOKEN_URL`, `BGD_MAPPING_URL`,
/// `WB_API_URL` and `WB_TOKEN_ID` override values from the file. They are
/// also read from a `.env` file; the process environment wins over it.
pub fn load_config() -> anyhow::Result<Config> {
    let dotenv = read_dotenv();

    let mut config = match find_config_file() {
        Some(path) => {
            tracing::info!("Loading config from: {}", path.display());
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str::<Config>(&contents)?
        }
        None => {
            tracing::info!("Using default embedded configuration");
            toml::from_str::<Config>(DEFAULT_CONFIG)?
        }
    };

    apply_env_overrides(&mut config, |key| {
        std::env::var(key).ok().or_else(|| dotenv.get(key).cloned())
    })?;
    config.validate()?;
    Ok(config)
}

fn find_config_file() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var("MP_HANDLER_CONFIG") {
        return Some(PathBuf::from(explicit));
    }

    let exe_path = std::env::current_exe().ok()?;
    let config_path = exe_path.parent().map(|dir| dir.join("config.toml"))?;
    if config_path.exists() {
        Some(config_path)
    } else {
        tracing::warn!("config.toml not found at: {}", config_path.display());
        None
    }
}

/// Значения из `.env` в текущем каталоге или выше, без изменения окружения процесса
fn read_dotenv() -> HashMap<String, String> {
    match dotenvy::dotenv_iter() {
        Ok(iter) => collect_dotenv(iter),
        Err(e) if e.not_found() => HashMap::new(),
        Err(e) => {
            tracing::warn!("Failed to read .env: {}", e);
            HashMap::new()
        }
    }
}

fn collect_dotenv<R: std::io::Read>(iter: dotenvy::Iter<R>) -> HashMap<String, String> {
    iter.filter_map(|item| {
        item.inspect_err(|e| tracing::warn!("Skipping .env entry: {}", e))
            .ok()
    })
    .collect()
}

/// Переопределение значений из переменных окружения
fn apply_env_overrides<F>(config: &mut Config, var: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = var("BGD_TOKEN") {
        config.bridge.token = v;
    }
    if let Some(v) = var("BGD_TOKEN_URL") {
        config.bridge.token_url = v;
    }
    if let Some(v) = var("BGD_MAPPING_URL") {
        config.bridge.mapping_url = v;
    }
    if let Some(v) = var("WB_API_URL") {
        config.wildberries.api_url = v;
    }
    if let Some(v) = var("WB_TOKEN_ID") {
        config.wildberries.token_id = v
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("WB_TOKEN_ID must be an integer: {}", e))?;
    }
    Ok(())
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.wildberries.items_refresh_limit == 0 {
            anyhow::bail!("wildberries.items_refresh_limit must be greater than 0");
        }
        for (name, value) in [
            ("bridge.token_url", &self.bridge.token_url),
            ("bridge.mapping_url", &self.bridge.mapping_url),
            ("wildberries.api_url", &self.wildberries.api_url),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("{} must not be empty", name);
            }
        }
        Ok(())
    }
}

/// Базовый URL без завершающего слэша
pub fn base_url(url: &str) -> &str {
    url.trim().trim_end_matches('/')
}

/// Путь к каталогу логов рядом с исполняемым файлом
pub fn get_log_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("logs")))
        .unwrap_or_else(|| Path::new("target").join("logs"))
}
