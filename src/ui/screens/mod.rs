pub mod crops;
pub mod dashboard;
pub mod forecast;
pub mod week;

pub use crops::CropsScreen;
pub use dashboard::DashboardScreen;
pub use forecast::ForecastScreen;
pub use week::WeekScreen;
