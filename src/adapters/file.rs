use crate::core::calendar::DateWindow;
use crate::domain::model::Order;
use crate::domain::ports::OrderSource;
use crate::utils::error::{DashboardError, Result};
use async_trait::async_trait;
use std::fs;

/// 離線來源:從 JSON 檔讀訂單,再依時間窗過濾
#[derive(Debug, Clone)]
pub struct JsonFileOrderSource {
    path: String,
}

impl JsonFileOrderSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl OrderSource for JsonFileOrderSource {
    async fn orders_in_window(&self, window: DateWindow) -> Result<Vec<Order>> {
        let data = fs::read(&self.path).map_err(|e| DashboardError::DataUnavailable {
            message: format!("could not read {}: {}", self.path, e),
        })?;

        let orders: Vec<Order> =
            serde_json::from_slice(&data).map_err(|e| DashboardError::DataUnavailable {
                message: format!("could not decode {}: {}", self.path, e),
            })?;

        tracing::debug!("Loaded {} orders from {}", orders.len(), self.path);
        Ok(orders
            .into_iter()
            .filter(|o| window.contains(o.date()))
            .collect())
    }
}
