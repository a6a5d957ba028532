use contracts::system::settings::PmsSettings;
use leptos::prelude::*;

use crate::shared::local_storage;

const SETTINGS_KEY: &str = "pms_settings";

/// Application settings shared through context
#[derive(Clone, Copy)]
pub struct SettingsContext {
    pub settings: RwSignal<PmsSettings>,
}

impl SettingsContext {
    /// Restore from localStorage, falling back to defaults
    pub fn load() -> Self {
        let settings = settings_or_default(local_storage::read_json(SETTINGS_KEY));
        Self {
            settings: RwSignal::new(settings),
        }
    }

    /// Validate, apply and persist
    pub fn save(&self, settings: PmsSettings) -> Result<(), String> {
        settings.validate()?;
        local_storage::write_json(SETTINGS_KEY, &settings);
        self.settings.set(settings);
        log::info!("Settings saved");
        Ok(())
    }

    pub fn reset(&self) {
        local_storage::remove(SETTINGS_KEY);
        self.settings.set(PmsSettings::default());
        log::info!("Settings reset to defaults");
    }
}

/// Сохранённые настройки, если они проходят проверку; иначе значения по умолчанию
pub fn settings_or_default(stored: Option<PmsSettings>) -> PmsSettings {
    match stored {
        Some(settings) => match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                log::warn!("Stored settings rejected ({}), using defaults", e);
                PmsSettings::default()
            }
        },
        None => {
            log::debug!("No stored settings, using defaults");
            PmsSettings::default()
        }
    }
}

pub fn use_settings() -> SettingsContext {
    use_context::<SettingsContext>().expect("SettingsContext not found in component tree")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::local_storage::decode_json;

    #[test]
    fn test_invalid_stored_settings_fall_back_to_defaults() {
        let zero_scale = decode_json(r#"{"rating_scale_max":0}"#);
        assert_eq!(settings_or_default(zero_scale), PmsSettings::default());

        let inverted = decode_json(r#"{"weight_input_min":80,"weight_input_max":20}"#);
        assert_eq!(settings_or_default(inverted), PmsSettings::default());

        assert_eq!(settings_or_default(None), PmsSettings::default());
    }

    #[test]
    fn test_valid_stored_settings_are_kept() {
        let stored: Option<PmsSettings> = decode_json(r#"{"company_name":"Globex","rating_scale_max":7}"#);
        let settings = settings_or_default(stored);
        assert_eq!(settings.company_name, "Globex");
        assert_eq!(settings.rating_scale_max, 7);
    }
}
