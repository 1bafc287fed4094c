pub mod calendar;
pub mod dashboard;
pub mod report;

pub use crate::domain::model::{Dashboard, Order};
pub use crate::domain::ports::{ConfigProvider, OrderAnalytics, OrderSource, SalesAnalytics, Storage};
pub use crate::utils::error::Result;
