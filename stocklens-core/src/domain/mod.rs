//! Domain types: bars, series, and metric outputs.

pub mod bar;
pub mod metric;
pub mod series;

pub use bar::PriceBar;
pub use metric::{MetricSeries, MetricValue};
pub use series::{PriceSeries, ReturnSeries};
