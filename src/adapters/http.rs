use crate::core::calendar::DateWindow;
use crate::domain::model::Order;
use crate::domain::ports::{ConfigProvider, OrderSource};
use crate::utils::error::{DashboardError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// 跟訂單 API 要一段時間窗的訂單,窗的兩端用 query string 帶過去
pub struct HttpOrderSource {
    client: Client,
    endpoint: String,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl HttpOrderSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            headers: HashMap::new(),
            timeout: None,
        }
    }

    pub fn from_config(config: &impl ConfigProvider) -> Self {
        let mut source = Self::new(config.source_endpoint());
        source.timeout = config.timeout_seconds().map(Duration::from_secs);
        source
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[async_trait]
impl OrderSource for HttpOrderSource {
    async fn orders_in_window(&self, window: DateWindow) -> Result<Vec<Order>> {
        tracing::debug!("Making API request to: {}", self.endpoint);

        let mut request = self.client.get(&self.endpoint).query(&[
            ("start_date", window.start.format("%Y-%m-%d").to_string()),
            ("end_date", window.end.format("%Y-%m-%d").to_string()),
        ]);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(DashboardError::DataUnavailable {
                message: format!("order store returned {}", response.status()),
            });
        }

        let payload: serde_json::Value = response.json().await?;
        decode_orders(payload)
    }
}

// 接受裸陣列或 {"orders": [...]} 兩種回應
fn decode_orders(payload: serde_json::Value) -> Result<Vec<Order>> {
    let items = match payload {
        serde_json::Value::Array(_) => payload,
        serde_json::Value::Object(mut map) => {
            map.remove("orders")
                .ok_or_else(|| DashboardError::DataUnavailable {
                    message: "response has no orders field".to_string(),
                })?
        }
        _ => {
            return Err(DashboardError::DataUnavailable {
                message: "unexpected response shape from order store".to_string(),
            })
        }
    };

    serde_json::from_value(items).map_err(|e| DashboardError::DataUnavailable {
        message: format!("could not decode orders: {}", e),
    })
}
