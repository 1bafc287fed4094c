use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 天氣標籤，由上游訂單資料帶入，這裡不做推導
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Other,
}

/// 年齡層,依十歲為一級距
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AgeGroup {
    #[serde(rename = "10s")]
    Teens,
    #[serde(rename = "20s")]
    Twenties,
    #[serde(rename = "30s")]
    Thirties,
    #[serde(rename = "40s")]
    Forties,
    #[serde(rename = "50s")]
    Fifties,
    #[serde(rename = "60s+")]
    SixtiesPlus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub gender: Gender,
    pub age_group: AgeGroup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub category: String,
    pub quantity: u32,
    /// 單價,整數最小貨幣單位
    pub unit_price: i64,
}

impl OrderItem {
    pub fn amount(&self) -> i64 {
        self.unit_price * self.quantity as i64
    }
}

/// 單筆訂單,儀表板的輸入紀錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub ordered_at: NaiveDateTime,
    pub takeout: bool,
    /// 整單折扣金額
    pub discount: i64,
    pub weather: Weather,
    pub customer: CustomerProfile,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// 折扣前的品項總額
    pub fn gross(&self) -> i64 {
        self.items.iter().map(OrderItem::amount).sum()
    }

    /// 實收金額,品項總額扣掉整單折扣
    pub fn total(&self) -> i64 {
        self.gross() - self.discount
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| item.quantity as u64).sum()
    }

    pub fn date(&self) -> NaiveDate {
        self.ordered_at.date()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_orders: u64,
    pub total_sales: i64,
    pub avg_order_value: f64,
    pub total_discount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdersOverview {
    pub total_orders: u64,
    pub takeout_orders: u64,
    pub eat_in_orders: u64,
    pub items_sold: u64,
}

/// 單一品項分類的銷售統計,熱門排行的元素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySales {
    pub category: String,
    pub sales: i64,
    pub quantity: u64,
}

/// 走勢圖的一個分桶,沒有訂單的桶以零補齊
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSales {
    pub label: String,
    pub sales: i64,
    pub orders: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerDemographics {
    pub by_gender: BTreeMap<Gender, u64>,
    pub by_age_group: BTreeMap<AgeGroup, u64>,
}

/// 各天氣的訂單數,BTreeMap 保證輸出順序穩定
pub type WeatherDistribution = BTreeMap<Weather, u64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyDashboard {
    pub date: NaiveDate,
    pub sales_summary: SalesSummary,
    pub orders: OrdersOverview,
    pub takeout_rate: f64,
    pub popular_items: Vec<CategorySales>,
    pub customer_count: u64,
    pub avg_order_value: f64,
    pub total_discount: i64,
    pub hourly_sales: Vec<BucketSales>,
    pub customer_demographics: CustomerDemographics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyDashboard {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub sales_summary: SalesSummary,
    pub weather_distribution: WeatherDistribution,
    pub orders: OrdersOverview,
    pub takeout_rate: f64,
    pub popular_items: Vec<CategorySales>,
    pub customer_count: u64,
    pub avg_order_value: f64,
    pub total_discount: i64,
    pub daily_sales_breakdown: Vec<BucketSales>,
    pub customer_demographics: CustomerDemographics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyDashboard {
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
    pub sales_summary: SalesSummary,
    pub weather_distribution: WeatherDistribution,
    pub orders: OrdersOverview,
    pub takeout_rate: f64,
    pub popular_items: Vec<CategorySales>,
    pub customer_count: u64,
    pub avg_order_value: f64,
    pub total_discount: i64,
    pub weekly_sales_breakdown: Vec<BucketSales>,
    pub customer_demographics: CustomerDemographics,
}

/// 三種粒度的結果外型,序列化時不帶標籤
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dashboard {
    Daily(DailyDashboard),
    Weekly(WeeklyDashboard),
    Monthly(MonthlyDashboard),
}

impl Dashboard {
    pub fn label(&self) -> &'static str {
        match self {
            Dashboard::Daily(_) => "day",
            Dashboard::Weekly(_) => "week",
            Dashboard::Monthly(_) => "month",
        }
    }

    /// 走勢序列,日報為每小時、週報為每日、月報為每週
    pub fn sales_series(&self) -> &[BucketSales] {
        match self {
            Dashboard::Daily(d) => &d.hourly_sales,
            Dashboard::Weekly(w) => &w.daily_sales_breakdown,
            Dashboard::Monthly(m) => &m.weekly_sales_breakdown,
        }
    }

    pub fn popular_items(&self) -> &[CategorySales] {
        match self {
            Dashboard::Daily(d) => &d.popular_items,
            Dashboard::Weekly(w) => &w.popular_items,
            Dashboard::Monthly(m) => &m.popular_items,
        }
    }

    pub fn sales_summary(&self) -> &SalesSummary {
        match self {
            Dashboard::Daily(d) => &d.sales_summary,
            Dashboard::Weekly(w) => &w.sales_summary,
            Dashboard::Monthly(m) => &m.sales_summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        Order {
            id: 1,
            ordered_at: "2024-03-15T09:30:00".parse().unwrap(),
            takeout: true,
            discount: 50,
            weather: Weather::Sunny,
            customer: CustomerProfile {
                gender: Gender::Female,
                age_group: AgeGroup::Twenties,
            },
            items: vec![
                OrderItem {
                    name: "カフェラテ".to_string(),
                    category: "coffee".to_string(),
                    quantity: 2,
                    unit_price: 450,
                },
                OrderItem {
                    name: "クロワッサン".to_string(),
                    category: "bakery".to_string(),
                    quantity: 1,
                    unit_price: 300,
                },
            ],
        }
    }

    #[test]
    fn test_order_amounts() {
        let order = sample_order();
        assert_eq!(order.gross(), 1200);
        assert_eq!(order.total(), 1150);
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.date(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_order_serde_round_trip() {
        let order = sample_order();
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("\"weather\":\"sunny\""));
        assert!(json.contains("\"age_group\":\"20s\""));

        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn test_age_group_labels() {
        let json = serde_json::to_string(&AgeGroup::SixtiesPlus).unwrap();
        assert_eq!(json, "\"60s+\"");

        let back: AgeGroup = serde_json::from_str("\"10s\"").unwrap();
        assert_eq!(back, AgeGroup::Teens);
    }

    #[test]
    fn test_weather_map_keys_are_ordered() {
        let mut distribution = WeatherDistribution::new();
        distribution.insert(Weather::Snowy, 1);
        distribution.insert(Weather::Sunny, 3);
        distribution.insert(Weather::Cloudy, 2);

        let json = serde_json::to_string(&distribution).unwrap();
        assert_eq!(json, "{\"sunny\":3,\"cloudy\":2,\"snowy\":1}");
    }
}
