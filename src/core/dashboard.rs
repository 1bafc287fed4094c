use crate::core::calendar::{Anchor, DateWindow, Granularity};
use crate::domain::model::{
    BucketSales, CategorySales, CustomerDemographics, Dashboard, DailyDashboard, MonthlyDashboard,
    Order, OrdersOverview, SalesSummary, WeatherDistribution, WeeklyDashboard,
};
use crate::domain::ports::{OrderAnalytics, OrderSource, SalesAnalytics};
use crate::domain::services::{OrderService, SalesService};
use crate::utils::error::{DashboardError, Result};
use crate::utils::monitor::SystemMonitor;
use std::time::Duration;

/// 熱門品項排行固定取前五名
const TOP_ITEMS_LIMIT: usize = 5;

/// 儀表板協調器:解析時間窗、抓一次訂單快照、併發呼叫各彙總器、
/// 組出對應粒度的結果。本身無狀態,同樣輸入與資料得到同樣結果。
pub struct DashboardService<S, SA = SalesService, OA = OrderService> {
    source: S,
    sales: SA,
    orders: OA,
    monitor: SystemMonitor,
}

impl<S: OrderSource> DashboardService<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            sales: SalesService::new(),
            orders: OrderService::new(),
            monitor: SystemMonitor::default(),
        }
    }

    pub fn new_with_monitoring(source: S, enabled: bool) -> Self {
        Self {
            source,
            sales: SalesService::new(),
            orders: OrderService::new(),
            monitor: SystemMonitor::new(enabled),
        }
    }
}

impl<S, SA, OA> DashboardService<S, SA, OA>
where
    S: OrderSource,
    SA: SalesAnalytics,
    OA: OrderAnalytics,
{
    /// 自訂彙總器實作,測試或替換公式時用
    pub fn with_analytics(source: S, sales: SA, orders: OA) -> Self {
        Self {
            source,
            sales,
            orders,
            monitor: SystemMonitor::default(),
        }
    }

    pub async fn daily(&self, anchor: impl Into<Anchor>) -> Result<DailyDashboard> {
        let date = anchor.into().resolve()?;
        let window = Granularity::Day.window_for(date);
        let metrics = self.collect(window, Granularity::Day).await?;

        let customer_count = metrics.sales_summary.total_orders;
        let avg_order_value = metrics.sales_summary.avg_order_value;
        let total_discount = metrics.sales_summary.total_discount;
        Ok(DailyDashboard {
            date,
            sales_summary: metrics.sales_summary,
            orders: metrics.overview,
            takeout_rate: metrics.takeout_rate,
            popular_items: metrics.popular_items,
            customer_count,
            avg_order_value,
            total_discount,
            hourly_sales: metrics.sales_series,
            customer_demographics: metrics.demographics,
        })
    }

    pub async fn weekly(&self, anchor: impl Into<Anchor>) -> Result<WeeklyDashboard> {
        let date = anchor.into().resolve()?;
        let window = Granularity::Week.window_for(date);
        let metrics = self.collect(window, Granularity::Week).await?;

        let customer_count = metrics.sales_summary.total_orders;
        let avg_order_value = metrics.sales_summary.avg_order_value;
        let total_discount = metrics.sales_summary.total_discount;
        Ok(WeeklyDashboard {
            week_start: window.start,
            week_end: window.end,
            sales_summary: metrics.sales_summary,
            weather_distribution: metrics.weather.unwrap_or_default(),
            orders: metrics.overview,
            takeout_rate: metrics.takeout_rate,
            popular_items: metrics.popular_items,
            customer_count,
            avg_order_value,
            total_discount,
            daily_sales_breakdown: metrics.sales_series,
            customer_demographics: metrics.demographics,
        })
    }

    pub async fn monthly(&self, anchor: impl Into<Anchor>) -> Result<MonthlyDashboard> {
        let date = anchor.into().resolve()?;
        let window = Granularity::Month.window_for(date);
        let metrics = self.collect(window, Granularity::Month).await?;

        let customer_count = metrics.sales_summary.total_orders;
        let avg_order_value = metrics.sales_summary.avg_order_value;
        let total_discount = metrics.sales_summary.total_discount;
        Ok(MonthlyDashboard {
            month_start: window.start,
            month_end: window.end,
            sales_summary: metrics.sales_summary,
            weather_distribution: metrics.weather.unwrap_or_default(),
            orders: metrics.overview,
            takeout_rate: metrics.takeout_rate,
            popular_items: metrics.popular_items,
            customer_count,
            avg_order_value,
            total_discount,
            weekly_sales_breakdown: metrics.sales_series,
            customer_demographics: metrics.demographics,
        })
    }

    /// 以粒度參數分派到對應的建置入口
    pub async fn build(
        &self,
        anchor: impl Into<Anchor>,
        granularity: Granularity,
    ) -> Result<Dashboard> {
        match granularity {
            Granularity::Day => Ok(Dashboard::Daily(self.daily(anchor).await?)),
            Granularity::Week => Ok(Dashboard::Weekly(self.weekly(anchor).await?)),
            Granularity::Month => Ok(Dashboard::Monthly(self.monthly(anchor).await?)),
        }
    }

    /// 整個建置包在期限內,逾時一律回 `Cancelled`,不會留下部分結果
    pub async fn build_with_deadline(
        &self,
        anchor: impl Into<Anchor>,
        granularity: Granularity,
        deadline: Duration,
    ) -> Result<Dashboard> {
        match tokio::time::timeout(deadline, self.build(anchor, granularity)).await {
            Ok(result) => result,
            Err(_) => Err(DashboardError::Cancelled {
                message: format!("deadline of {:?} elapsed", deadline),
            }),
        }
    }

    async fn collect(&self, window: DateWindow, granularity: Granularity) -> Result<MetricsBundle> {
        tracing::info!(
            "📅 Building {} dashboard for {}",
            granularity.as_str(),
            window
        );
        self.monitor.log_stats("Fetch start");

        // 每次建置只抓一次訂單,之後全部彙總器共用同一份快照
        tracing::info!("📡 Fetching orders for {}", window);
        let orders = self.source.orders_in_window(window).await?;
        tracing::info!("📥 Fetched {} orders", orders.len());
        self.monitor.log_stats("Fetch complete");

        // 散出再聚合,任何一支彙總器失敗就整批取消
        let (sales_summary, overview, takeout_rate, popular_items, sales_series, demographics, weather) =
            tokio::try_join!(
                self.sales.summary(&orders),
                self.orders.overview(&orders),
                self.sales.takeout_rate(&orders),
                self.sales.top_categories(&orders, TOP_ITEMS_LIMIT),
                self.sales
                    .sales_series(&orders, window, granularity.bucket_kind()),
                self.orders.demographics(&orders),
                self.weather_if(&orders, granularity.includes_weather()),
            )?;

        tracing::debug!("🔄 Sub-aggregators completed");
        self.monitor.log_stats("Aggregation complete");
        self.monitor.log_final_stats();

        Ok(MetricsBundle {
            sales_summary,
            overview,
            takeout_rate,
            popular_items,
            sales_series,
            demographics,
            weather,
        })
    }

    /// 天氣分布只在週與月的粒度下被呼叫
    async fn weather_if(
        &self,
        orders: &[Order],
        wanted: bool,
    ) -> Result<Option<WeatherDistribution>> {
        if wanted {
            Ok(Some(self.orders.weather_distribution(orders).await?))
        } else {
            Ok(None)
        }
    }
}

struct MetricsBundle {
    sales_summary: SalesSummary,
    overview: OrdersOverview,
    takeout_rate: f64,
    popular_items: Vec<CategorySales>,
    sales_series: Vec<BucketSales>,
    demographics: CustomerDemographics,
    weather: Option<WeatherDistribution>,
}
