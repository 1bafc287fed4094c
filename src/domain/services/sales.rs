use crate::core::calendar::{week_segments, BucketKind, DateWindow};
use crate::domain::model::{BucketSales, CategorySales, Order, SalesSummary};
use crate::domain::ports::SalesAnalytics;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Timelike};
use std::collections::HashMap;

/// 銷售面指標的預設實作,對同一份訂單快照做純計算
#[derive(Debug, Clone, Copy, Default)]
pub struct SalesService;

impl SalesService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SalesAnalytics for SalesService {
    async fn summary(&self, orders: &[Order]) -> Result<SalesSummary> {
        let total_orders = orders.len() as u64;
        let total_sales: i64 = orders.iter().map(Order::total).sum();
        let total_discount: i64 = orders.iter().map(|o| o.discount).sum();
        let avg_order_value = if total_orders == 0 {
            0.0
        } else {
            total_sales as f64 / total_orders as f64
        };

        Ok(SalesSummary {
            total_orders,
            total_sales,
            avg_order_value,
            total_discount,
        })
    }

    async fn takeout_rate(&self, orders: &[Order]) -> Result<f64> {
        if orders.is_empty() {
            return Ok(0.0);
        }
        let takeout = orders.iter().filter(|o| o.takeout).count();
        Ok(takeout as f64 / orders.len() as f64)
    }

    async fn top_categories(&self, orders: &[Order], limit: usize) -> Result<Vec<CategorySales>> {
        let mut by_category: HashMap<&str, (i64, u64)> = HashMap::new();
        for order in orders {
            for item in &order.items {
                let entry = by_category.entry(item.category.as_str()).or_default();
                entry.0 += item.amount();
                entry.1 += item.quantity as u64;
            }
        }

        let mut ranking: Vec<CategorySales> = by_category
            .into_iter()
            .map(|(category, (sales, quantity))| CategorySales {
                category: category.to_string(),
                sales,
                quantity,
            })
            .collect();

        // 同額時依分類名稱,排序結果才會穩定
        ranking.sort_by(|a, b| b.sales.cmp(&a.sales).then_with(|| a.category.cmp(&b.category)));
        ranking.truncate(limit);
        Ok(ranking)
    }

    async fn sales_series(
        &self,
        orders: &[Order],
        window: DateWindow,
        bucket: BucketKind,
    ) -> Result<Vec<BucketSales>> {
        let series = match bucket {
            BucketKind::Hourly => hourly_series(orders),
            BucketKind::Daily => daily_series(orders, window),
            BucketKind::Weekly => weekly_series(orders, window),
        };
        Ok(series)
    }
}

fn hourly_series(orders: &[Order]) -> Vec<BucketSales> {
    let mut buckets: Vec<BucketSales> = (0..24)
        .map(|hour| BucketSales {
            label: format!("{:02}:00", hour),
            sales: 0,
            orders: 0,
        })
        .collect();

    for order in orders {
        let hour = order.ordered_at.time().hour() as usize;
        buckets[hour].sales += order.total();
        buckets[hour].orders += 1;
    }
    buckets
}

fn daily_series(orders: &[Order], window: DateWindow) -> Vec<BucketSales> {
    let mut by_date: HashMap<NaiveDate, (i64, u64)> = HashMap::new();
    for order in orders {
        let entry = by_date.entry(order.date()).or_default();
        entry.0 += order.total();
        entry.1 += 1;
    }

    window
        .dates()
        .map(|date| {
            let (sales, count) = by_date.get(&date).copied().unwrap_or((0, 0));
            BucketSales {
                label: date.format("%Y-%m-%d").to_string(),
                sales,
                orders: count,
            }
        })
        .collect()
}

fn weekly_series(orders: &[Order], window: DateWindow) -> Vec<BucketSales> {
    week_segments(window)
        .into_iter()
        .map(|segment| {
            let mut sales = 0i64;
            let mut count = 0u64;
            for order in orders.iter().filter(|o| segment.contains(o.date())) {
                sales += order.total();
                count += 1;
            }
            BucketSales {
                label: segment.start.format("%Y-%m-%d").to_string(),
                sales,
                orders: count,
            }
        })
        .collect()
}
