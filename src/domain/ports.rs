use crate::core::calendar::{BucketKind, DateWindow};
use crate::domain::model::{
    BucketSales, CategorySales, CustomerDemographics, Order, OrdersOverview, SalesSummary,
    WeatherDistribution,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 訂單資料來源,一次儀表板建置只會呼叫一次
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn orders_in_window(&self, window: DateWindow) -> Result<Vec<Order>>;
}

#[async_trait]
pub trait SalesAnalytics: Send + Sync {
    async fn summary(&self, orders: &[Order]) -> Result<SalesSummary>;

    /// 外帶訂單比例,介於 0 與 1,空集合為 0
    async fn takeout_rate(&self, orders: &[Order]) -> Result<f64>;

    /// 銷售額由高到低,同額依分類名稱排序,最多 limit 筆
    async fn top_categories(&self, orders: &[Order], limit: usize) -> Result<Vec<CategorySales>>;

    /// 時間窗內每個分桶一筆,沒訂單的桶補零
    async fn sales_series(
        &self,
        orders: &[Order],
        window: DateWindow,
        bucket: BucketKind,
    ) -> Result<Vec<BucketSales>>;
}

#[async_trait]
pub trait OrderAnalytics: Send + Sync {
    async fn overview(&self, orders: &[Order]) -> Result<OrdersOverview>;

    async fn demographics(&self, orders: &[Order]) -> Result<CustomerDemographics>;

    async fn weather_distribution(&self, orders: &[Order]) -> Result<WeatherDistribution>;
}

pub trait ConfigProvider: Send + Sync {
    fn source_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
    fn monitoring_enabled(&self) -> bool;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
