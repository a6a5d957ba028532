pub mod dto;

pub use dto::{GoalSummary, ReviewSummary, StatusCount};
