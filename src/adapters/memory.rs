use crate::core::calendar::DateWindow;
use crate::domain::model::Order;
use crate::domain::ports::OrderSource;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 記憶體內的訂單來源,示範與測試用
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderSource {
    orders: Vec<Order>,
}

impl MemoryOrderSource {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl OrderSource for MemoryOrderSource {
    async fn orders_in_window(&self, window: DateWindow) -> Result<Vec<Order>> {
        Ok(self
            .orders
            .iter()
            .filter(|o| window.contains(o.date()))
            .cloned()
            .collect())
    }
}
