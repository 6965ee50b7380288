#![allow(dead_code)]

use httpmock::prelude::*;
use httpmock::Mock;
use marketplace_handler::shared::bridge::BridgeTokenService;
use marketplace_handler::shared::config::{BridgeConfig, Config, WildberriesConfig};
use marketplace_handler::shared::marketplaces::wildberries::WildberriesAdapter;
use serde_json::{json, Value};
use std::io::Write;
use std::sync::{Arc, Mutex};

pub const WAREHOUSE_ID: i64 = 123;
pub const SELLER_TOKEN: &str = "seller-token";

pub fn config(server: &MockServer, items_refresh_limit: usize) -> Config {
    Config {
        bridge: BridgeConfig {
            token: "bridge-token".into(),
            token_url: server.url("/tokens"),
            mapping_url: server.url("/mapping"),
            timeout_secs: 5,
        },
        wildberries: WildberriesConfig {
            api_url: format!("{}/", server.base_url()),
            token_id: 1,
            items_refresh_limit,
            timeout_secs: 5,
        },
    }
}

pub async fn mock_tokens(server: &MockServer) -> Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/tokens")
                .header("Authorization", "Token bridge-token");
            then.status(200).json_body(json!([
                {"id": 1, "warehouse_id": WAREHOUSE_ID, "common_token": SELLER_TOKEN},
                {"id": 2, "warehouse_id": 456, "common_token": "other-token"}
            ]));
        })
        .await
}

/// Адаптер, подключённый к mock-серверу
pub async fn adapter(server: &MockServer, items_refresh_limit: usize) -> WildberriesAdapter {
    mock_tokens(server).await;
    let config = config(server, items_refresh_limit);
    let provider = BridgeTokenService::new(&config.bridge).unwrap();
    WildberriesAdapter::connect(&config, &provider).await.unwrap()
}

pub fn mapping_record(ms_id: &str) -> Value {
    match ms_id {
        "1" => json!({"ms_id": "1", "barcodes": "12313", "nm_id": 1231312, "name": "some_name"}),
        "2" => json!({"ms_id": "2", "barcodes": "22313", "nm_id": 1323312, "name": "another_name"}),
        other => json!({"ms_id": other, "barcodes": format!("bc-{}", other), "nm_id": 9000, "name": ""}),
    }
}

/// Mapping для запроса `ms_id=<query>`, ответ в переданном порядке
pub async fn mock_mapping<'a>(server: &'a MockServer, query: &str, records: Vec<Value>) -> Mock<'a> {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/mapping").query_param("ms_id", query);
            then.status(200).json_body(Value::Array(records));
        })
        .await
}

pub fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Буфер для перехвата логов в тесте
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Подписчик на время теста; `#[tokio::test]` работает в одном потоке
pub fn capture_logs() -> (tracing::subscriber::DefaultGuard, LogBuffer) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    (tracing::subscriber::set_default(subscriber), buffer)
}
