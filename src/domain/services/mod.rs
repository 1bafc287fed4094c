pub mod orders;
pub mod sales;

pub use orders::OrderService;
pub use sales::SalesService;
