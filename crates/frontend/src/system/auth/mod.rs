pub mod context;
pub mod guard;
pub mod storage;
