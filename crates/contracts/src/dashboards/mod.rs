pub mod d400_review_summary;
pub mod d401_performance_trend;
