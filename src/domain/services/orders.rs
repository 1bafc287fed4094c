use crate::domain::model::{CustomerDemographics, Order, OrdersOverview, WeatherDistribution};
use crate::domain::ports::OrderAnalytics;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 訂單面指標的預設實作
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderService;

impl OrderService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OrderAnalytics for OrderService {
    async fn overview(&self, orders: &[Order]) -> Result<OrdersOverview> {
        let total_orders = orders.len() as u64;
        let takeout_orders = orders.iter().filter(|o| o.takeout).count() as u64;

        Ok(OrdersOverview {
            total_orders,
            takeout_orders,
            eat_in_orders: total_orders - takeout_orders,
            items_sold: orders.iter().map(Order::item_count).sum(),
        })
    }

    async fn demographics(&self, orders: &[Order]) -> Result<CustomerDemographics> {
        let mut demographics = CustomerDemographics::default();
        for order in orders {
            *demographics
                .by_gender
                .entry(order.customer.gender)
                .or_insert(0) += 1;
            *demographics
                .by_age_group
                .entry(order.customer.age_group)
                .or_insert(0) += 1;
        }
        Ok(demographics)
    }

    async fn weather_distribution(&self, orders: &[Order]) -> Result<WeatherDistribution> {
        let mut distribution = WeatherDistribution::new();
        for order in orders {
            *distribution.entry(order.weather).or_insert(0) += 1;
        }
        Ok(distribution)
    }
}
