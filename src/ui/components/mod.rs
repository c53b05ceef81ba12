pub mod chart;
pub mod gauge;
pub mod input;

pub use chart::HourlyChart;
pub use gauge::{humidity_gauge, rain_probability_gauge, temperature_gauge};
pub use input::InputWidget;
