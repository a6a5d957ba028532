//! KRA Template Builder UI Module
//!
//! MVVM:
//! - view_model.rs: состояние конструктора (выбор KRA, веса, форма) и команды
//! - view.rs: Leptos component (pure UI)

mod view;
mod view_model;

pub use view::KraTemplateBuilder;
pub use view_model::{parse_weight_input, KraTemplateBuilderViewModel};
