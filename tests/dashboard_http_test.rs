use cafe_dashboard::domain::model::Weather;
use cafe_dashboard::utils::error::ErrorKind;
use cafe_dashboard::{DashboardService, Granularity, HttpOrderSource};
use httpmock::prelude::*;
use std::time::Duration;

fn order_json(
    id: u64,
    ordered_at: &str,
    takeout: bool,
    category: &str,
    quantity: u32,
    unit_price: i64,
) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "ordered_at": ordered_at,
        "takeout": takeout,
        "discount": 0,
        "weather": "sunny",
        "customer": {"gender": "female", "age_group": "20s"},
        "items": [
            {"name": "Latte", "category": category, "quantity": quantity, "unit_price": unit_price}
        ]
    })
}

#[tokio::test]
async fn test_daily_dashboard_end_to_end() {
    let server = MockServer::start();
    let mock_data = serde_json::json!([
        order_json(1, "2024-03-15T09:30:00", true, "coffee", 2, 150),
        order_json(2, "2024-03-15T12:10:00", false, "dessert", 1, 450),
    ]);

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/orders")
            .query_param("start_date", "2024-03-15")
            .query_param("end_date", "2024-03-15");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(mock_data);
    });

    let source = HttpOrderSource::new(server.url("/api/orders"));
    let service = DashboardService::new(source);

    let dashboard = service.daily("2024-03-15").await.unwrap();
    api_mock.assert();

    assert_eq!(dashboard.sales_summary.total_orders, 2);
    assert_eq!(dashboard.sales_summary.total_sales, 750);
    assert_eq!(dashboard.takeout_rate, 0.5);
    assert_eq!(dashboard.customer_count, 2);
    assert_eq!(dashboard.hourly_sales.len(), 24);
    assert_eq!(dashboard.hourly_sales[9].label, "09:00");
    assert_eq!(dashboard.hourly_sales[9].sales, 300);
    assert_eq!(dashboard.hourly_sales[12].sales, 450);

    // 日報沒有天氣分布欄位
    let json = serde_json::to_value(&dashboard).unwrap();
    assert!(json.get("weather_distribution").is_none());
}

#[tokio::test]
async fn test_weekly_dashboard_requests_monday_to_sunday() {
    let server = MockServer::start();

    let sunny = order_json(1, "2024-03-11T08:00:00", true, "coffee", 1, 200);
    let mut rainy = order_json(2, "2024-03-17T18:45:00", false, "tea", 2, 120);
    rainy["weather"] = serde_json::json!("rainy");

    // 2024-03-15 是週五,視窗應該落在 03-11(一) 到 03-17(日)
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/orders")
            .query_param("start_date", "2024-03-11")
            .query_param("end_date", "2024-03-17");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([sunny, rainy]));
    });

    let service = DashboardService::new(HttpOrderSource::new(server.url("/api/orders")));
    let dashboard = service.weekly("2024-03-15").await.unwrap();
    api_mock.assert();

    assert_eq!(dashboard.week_start.to_string(), "2024-03-11");
    assert_eq!(dashboard.week_end.to_string(), "2024-03-17");
    assert_eq!(dashboard.daily_sales_breakdown.len(), 7);
    assert_eq!(dashboard.weather_distribution.get(&Weather::Sunny), Some(&1));
    assert_eq!(dashboard.weather_distribution.get(&Weather::Rainy), Some(&1));
}

#[tokio::test]
async fn test_monthly_dashboard_weekly_segments() {
    let server = MockServer::start();
    let mock_data = serde_json::json!([
        order_json(1, "2024-03-02T10:00:00", false, "coffee", 1, 500),
        order_json(2, "2024-03-12T10:00:00", true, "coffee", 1, 500),
    ]);

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/orders")
            .query_param("start_date", "2024-03-01")
            .query_param("end_date", "2024-03-31");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(mock_data);
    });

    let service = DashboardService::new(HttpOrderSource::new(server.url("/api/orders")));
    let dashboard = service.monthly("2024-03-15").await.unwrap();
    api_mock.assert();

    // 3/1 是週五,之後每段從週一起算,共 5 段
    let labels: Vec<&str> = dashboard
        .weekly_sales_breakdown
        .iter()
        .map(|b| b.label.as_str())
        .collect();
    assert_eq!(
        labels,
        ["2024-03-01", "2024-03-04", "2024-03-11", "2024-03-18", "2024-03-25"]
    );
    assert_eq!(dashboard.weekly_sales_breakdown[0].sales, 500);
    assert_eq!(dashboard.weekly_sales_breakdown[2].orders, 1);
    assert_eq!(dashboard.weekly_sales_breakdown[4].orders, 0);
}

#[tokio::test]
async fn test_invalid_date_fails_before_any_fetch() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/orders");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([]));
    });

    let service = DashboardService::new(HttpOrderSource::new(server.url("/api/orders")));
    let err = service
        .build("2024-13-99", Granularity::Day)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(api_mock.hits(), 0);
}

#[test]
fn test_unsupported_granularity_is_invalid_argument() {
    let err = "quarterly".parse::<Granularity>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[tokio::test]
async fn test_server_error_maps_to_data_unavailable() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/orders");
        then.status(500);
    });

    let service = DashboardService::new(HttpOrderSource::new(server.url("/api/orders")));
    let err = service
        .build("2024-03-15", Granularity::Day)
        .await
        .unwrap_err();

    api_mock.assert();
    assert_eq!(err.kind(), ErrorKind::DataUnavailable);
}

#[tokio::test]
async fn test_deadline_cancels_slow_source() {
    let server = MockServer::start();
    let _api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/orders");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([]))
            .delay(Duration::from_millis(500));
    });

    let service = DashboardService::new(HttpOrderSource::new(server.url("/api/orders")));
    let err = service
        .build_with_deadline("2024-03-15", Granularity::Day, Duration::from_millis(50))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
}
