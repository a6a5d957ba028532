pub mod dto;

pub use dto::{PerformanceTrend, TrendPoint};
