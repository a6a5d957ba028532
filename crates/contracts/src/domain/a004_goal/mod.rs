pub mod aggregate;

pub use aggregate::{Goal, GoalId, GoalStatus};
