pub mod context;
pub mod ui;

pub use context::{use_settings, SettingsContext};
pub use ui::SettingsPage;
