use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};

crate::uuid_aggregate_id!(
    /// Уникальный идентификатор цели
    GoalId
);

/// Статус цели
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Overdue,
}

impl GoalStatus {
    pub const ALL: [GoalStatus; 4] = [
        GoalStatus::NotStarted,
        GoalStatus::InProgress,
        GoalStatus::Completed,
        GoalStatus::Overdue,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GoalStatus::NotStarted => "Not started",
            GoalStatus::InProgress => "In progress",
            GoalStatus::Completed => "Completed",
            GoalStatus::Overdue => "Overdue",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::NotStarted => "not_started",
            GoalStatus::InProgress => "in_progress",
            GoalStatus::Completed => "completed",
            GoalStatus::Overdue => "overdue",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s)
    }
}

/// Цель сотрудника
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(flatten)]
    pub base: BaseAggregate<GoalId>,

    #[serde(rename = "ownerUserId")]
    pub owner_user_id: String,

    /// KRA, к которому привязана цель
    #[serde(rename = "kraId")]
    pub kra_id: Option<String>,

    pub status: GoalStatus,

    /// Выполнение в процентах (0-100)
    pub progress: u8,

    #[serde(rename = "dueDate")]
    pub due_date: NaiveDate,
}

impl Goal {
    pub fn new_for_insert(
        code: String,
        description: String,
        owner_user_id: String,
        kra_id: Option<String>,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            base: BaseAggregate::new(GoalId::new_v4(), code, description),
            owner_user_id,
            kra_id,
            status: GoalStatus::NotStarted,
            progress: 0,
            due_date,
        }
    }

    /// Статус с учётом срока: незавершённая цель после `due_date` просрочена
    pub fn effective_status(&self, today: NaiveDate) -> GoalStatus {
        match self.status {
            GoalStatus::Completed => GoalStatus::Completed,
            _ if today > self.due_date => GoalStatus::Overdue,
            other => other,
        }
    }

    /// Обновить прогресс; 100% завершает цель, >0 переводит в работу
    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
        self.status = match self.progress {
            100 => GoalStatus::Completed,
            0 if self.status == GoalStatus::NotStarted => GoalStatus::NotStarted,
            _ => GoalStatus::InProgress,
        };
        self.base.touch();
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn validate(&self) -> Result<(), String> {
        self.base.validate_base()?;
        if self.owner_user_id.trim().is_empty() {
            return Err("Goal owner is required".into());
        }
        if self.progress > 100 {
            return Err("Progress cannot exceed 100%".into());
        }
        Ok(())
    }
}

impl AggregateRoot for Goal {
    type Id = GoalId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "goal"
    }

    fn element_name() -> &'static str {
        "Goal"
    }

    fn list_name() -> &'static str {
        "Goals"
    }

    fn origin() -> Origin {
        Origin::Self_
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal() -> Goal {
        Goal::new_for_insert(
            "G-1".into(),
            "Ship onboarding v2".into(),
            "u-emp-1".into(),
            None,
            date(2026, 3, 31),
        )
    }

    #[test]
    fn test_value_equality() {
        let g = goal();
        let mut changed = g.clone();
        assert_eq!(changed, g);

        changed.set_progress(40);
        assert_ne!(changed, g);
    }

    #[test]
    fn test_effective_status_overdue() {
        let mut g = goal();
        g.set_progress(40);
        assert_eq!(g.effective_status(date(2026, 3, 31)), GoalStatus::InProgress);
        assert_eq!(g.effective_status(date(2026, 4, 1)), GoalStatus::Overdue);
    }

    #[test]
    fn test_completed_never_overdue() {
        let mut g = goal();
        g.set_progress(100);
        assert_eq!(g.status, GoalStatus::Completed);
        assert_eq!(g.effective_status(date(2027, 1, 1)), GoalStatus::Completed);
    }

    #[test]
    fn test_set_progress_caps_at_100() {
        let mut g = goal();
        g.set_progress(250);
        assert_eq!(g.progress, 100);
    }

    #[test]
    fn test_zero_progress_keeps_not_started() {
        let mut g = goal();
        g.set_progress(0);
        assert_eq!(g.status, GoalStatus::NotStarted);
    }

    #[test]
    fn test_status_str_round_trip() {
        for st in GoalStatus::ALL {
            assert_eq!(GoalStatus::from_key(st.as_str()), Some(st));
        }
        assert_eq!(GoalStatus::from_key("bogus"), None);
    }

    #[test]
    fn test_validate_requires_owner() {
        let mut g = goal();
        g.owner_user_id.clear();
        assert!(g.validate().is_err());
    }
}
