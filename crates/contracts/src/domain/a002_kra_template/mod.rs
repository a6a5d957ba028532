pub mod aggregate;
pub mod error;

pub use aggregate::{KraTemplate, KraTemplateDto, KraTemplateId, KraTemplateItem};
pub use error::TemplateError;
