pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpOrderSource, JsonFileOrderSource, LocalStorage, MemoryOrderSource};
pub use config::TomlConfig;
pub use core::calendar::{Anchor, BucketKind, DateWindow, Granularity};
pub use core::dashboard::DashboardService;
pub use core::report::ReportWriter;
pub use domain::model::{Dashboard, DailyDashboard, MonthlyDashboard, Order, WeeklyDashboard};
pub use domain::ports::{ConfigProvider, OrderAnalytics, OrderSource, SalesAnalytics, Storage};
pub use domain::services::{OrderService, SalesService};
pub use utils::error::{DashboardError, ErrorKind, Result};
