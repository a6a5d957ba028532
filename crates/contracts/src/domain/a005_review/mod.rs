pub mod aggregate;

pub use aggregate::{KraScore, Review, ReviewId, ReviewPeriod, ReviewStatus};
