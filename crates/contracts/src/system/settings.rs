//! Настройки PMS, редактируемые на странице Settings
//!
//! Хранятся во фронтенде как JSON; отсутствующие поля берутся из `Default`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewCycle {
    #[default]
    Quarterly,
    HalfYearly,
    Annual,
}

impl ReviewCycle {
    pub const ALL: [ReviewCycle; 3] = [
        ReviewCycle::Quarterly,
        ReviewCycle::HalfYearly,
        ReviewCycle::Annual,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReviewCycle::Quarterly => "Quarterly",
            ReviewCycle::HalfYearly => "Half-yearly",
            ReviewCycle::Annual => "Annual",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewCycle::Quarterly => "quarterly",
            ReviewCycle::HalfYearly => "half_yearly",
            ReviewCycle::Annual => "annual",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PmsSettings {
    pub company_name: String,
    pub review_cycle: ReviewCycle,
    /// Верхняя граница шкалы оценок (от 0)
    pub rating_scale_max: u8,
    /// Границы поля ввода веса в конструкторе шаблонов.
    /// Сама логика распределения значения не ограничивает.
    pub weight_input_min: i32,
    pub weight_input_max: i32,
    /// За сколько дней до срока напоминать о цели
    pub goal_reminder_days: u32,
}

impl Default for PmsSettings {
    fn default() -> Self {
        Self {
            company_name: "Acme Corp".to_string(),
            review_cycle: ReviewCycle::Quarterly,
            rating_scale_max: 5,
            weight_input_min: 0,
            weight_input_max: 100,
            goal_reminder_days: 7,
        }
    }
}

impl PmsSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.company_name.trim().is_empty() {
            return Err("Company name is required".into());
        }
        if !(3..=10).contains(&self.rating_scale_max) {
            return Err("Rating scale must be between 3 and 10".into());
        }
        if self.weight_input_min > self.weight_input_max {
            return Err("Minimum weight is greater than maximum".into());
        }
        if self.goal_reminder_days > 90 {
            return Err("Reminder cannot be more than 90 days ahead".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = PmsSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.weight_input_min, 0);
        assert_eq!(settings.weight_input_max, 100);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: PmsSettings =
            serde_json::from_str(r#"{"company_name":"Globex","review_cycle":"annual"}"#).unwrap();
        assert_eq!(settings.company_name, "Globex");
        assert_eq!(settings.review_cycle, ReviewCycle::Annual);
        assert_eq!(settings.rating_scale_max, 5);
    }

    #[test]
    fn test_validation_errors() {
        let mut settings = PmsSettings::default();
        settings.rating_scale_max = 2;
        assert!(settings.validate().is_err());

        let mut settings = PmsSettings::default();
        settings.weight_input_min = 50;
        settings.weight_input_max = 10;
        assert!(settings.validate().is_err());

        let mut settings = PmsSettings::default();
        settings.company_name = " ".into();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_review_cycle_keys() {
        for cycle in ReviewCycle::ALL {
            assert_eq!(ReviewCycle::from_key(cycle.as_str()), Some(cycle));
        }
    }
}
