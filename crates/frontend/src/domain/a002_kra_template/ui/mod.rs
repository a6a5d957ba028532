pub mod builder;
pub mod list;
