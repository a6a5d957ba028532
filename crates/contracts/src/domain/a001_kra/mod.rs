pub mod aggregate;

pub use aggregate::{Kra, KraCategory, KraDto, KraId};
