//! Shared contracts of the PMS console: domain aggregates, dashboards DTOs,
//! system types and the KRA weight allocator.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
