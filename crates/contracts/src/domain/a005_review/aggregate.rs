use serde::{Deserialize, Serialize};

use crate::domain::a002_kra_template::KraTemplate;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};

crate::uuid_aggregate_id!(
    /// Уникальный идентификатор оценки
    ReviewId
);

/// Отчётный период оценки (год + квартал)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReviewPeriod {
    pub year: i32,
    /// 1..=4
    pub quarter: u8,
}

impl ReviewPeriod {
    pub fn new(year: i32, quarter: u8) -> Self {
        Self { year, quarter }
    }

    pub fn label(&self) -> String {
        format!("{} Q{}", self.year, self.quarter)
    }
}

impl std::fmt::Display for ReviewPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    Draft,
    SelfAssessment,
    ManagerReview,
    Completed,
}

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 4] = [
        ReviewStatus::Draft,
        ReviewStatus::SelfAssessment,
        ReviewStatus::ManagerReview,
        ReviewStatus::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReviewStatus::Draft => "Draft",
            ReviewStatus::SelfAssessment => "Self assessment",
            ReviewStatus::ManagerReview => "Manager review",
            ReviewStatus::Completed => "Completed",
        }
    }

    /// Следующий этап; `Completed`: финальный
    pub fn next(&self) -> Option<ReviewStatus> {
        match self {
            ReviewStatus::Draft => Some(ReviewStatus::SelfAssessment),
            ReviewStatus::SelfAssessment => Some(ReviewStatus::ManagerReview),
            ReviewStatus::ManagerReview => Some(ReviewStatus::Completed),
            ReviewStatus::Completed => None,
        }
    }
}

/// Оценка по одному KRA: вес из шаблона и балл по шкале настроек
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KraScore {
    #[serde(rename = "kraId")]
    pub kra_id: String,
    pub weight: i32,
    pub score: Option<f64>,
}

/// Оценка эффективности сотрудника за период
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(flatten)]
    pub base: BaseAggregate<ReviewId>,

    #[serde(rename = "employeeUserId")]
    pub employee_user_id: String,

    #[serde(rename = "reviewerUserId")]
    pub reviewer_user_id: String,

    pub period: ReviewPeriod,

    pub status: ReviewStatus,

    pub scores: Vec<KraScore>,
}

impl Review {
    /// Новая оценка со строками из шаблона KRA (без баллов)
    pub fn from_template(
        code: String,
        employee_user_id: String,
        reviewer_user_id: String,
        period: ReviewPeriod,
        template: &KraTemplate,
    ) -> Self {
        let description = format!("{} / {}", template.base.description, period.label());
        let scores = template
            .items
            .iter()
            .map(|item| KraScore {
                kra_id: item.kra_id.clone(),
                weight: item.weight,
                score: None,
            })
            .collect();

        Self {
            base: BaseAggregate::new(ReviewId::new_v4(), code, description),
            employee_user_id,
            reviewer_user_id,
            period,
            status: ReviewStatus::Draft,
            scores,
        }
    }

    /// Средневзвешенный балл по выставленным оценкам.
    ///
    /// Строки без балла не участвуют; `None`, если суммарный вес оценённых строк 0.
    pub fn weighted_score(&self) -> Option<f64> {
        let (sum, weight) = self
            .scores
            .iter()
            .filter_map(|s| s.score.map(|score| (score, s.weight as f64)))
            .fold((0.0, 0.0), |(sum, total), (score, w)| (sum + score * w, total + w));

        if weight == 0.0 {
            None
        } else {
            Some(sum / weight)
        }
    }

    pub fn set_score(&mut self, kra_id: &str, score: f64) {
        if let Some(row) = self.scores.iter_mut().find(|s| s.kra_id == kra_id) {
            row.score = Some(score);
            self.base.touch();
        }
    }

    /// Перевести на следующий этап. Завершить можно только полностью оценённую форму.
    pub fn advance(&mut self) -> Result<ReviewStatus, String> {
        let next = self
            .status
            .next()
            .ok_or_else(|| "Review is already completed".to_string())?;
        if next == ReviewStatus::Completed && self.scores.iter().any(|s| s.score.is_none()) {
            return Err("Not every KRA is scored yet".into());
        }
        self.status = next;
        self.base.touch();
        Ok(next)
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn validate(&self, rating_scale_max: u8) -> Result<(), String> {
        self.base.validate_base()?;
        if !(1..=4).contains(&self.period.quarter) {
            return Err("Quarter must be between 1 and 4".into());
        }
        for row in &self.scores {
            if let Some(score) = row.score {
                if score < 0.0 || score > rating_scale_max as f64 {
                    return Err(format!(
                        "Score for {} must be between 0 and {}",
                        row.kra_id, rating_scale_max
                    ));
                }
            }
        }
        Ok(())
    }
}

impl AggregateRoot for Review {
    type Id = ReviewId;

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
        "a005"
    }

    fn collection_name() -> &'static str {
        "review"
    }

    fn element_name() -> &'static str {
        "Review"
    }

    fn list_name() -> &'static str {
        "Reviews"
    }

    fn origin() -> Origin {
        Origin::Self_
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_kra_template::KraTemplateDto;
    use crate::shared::weights::WeightAllocation;

    fn template() -> KraTemplate {
        let mut alloc = WeightAllocation::new();
        alloc.toggle("kra-a", 60);
        alloc.toggle("kra-b", 40);
        let dto = KraTemplateDto {
            code: "TPL".into(),
            description: "Sales".into(),
            ..Default::default()
        };
        KraTemplate::from_allocation(&dto, &alloc).unwrap()
    }

    fn review() -> Review {
        Review::from_template(
            "R-1".into(),
            "u-emp".into(),
            "u-mgr".into(),
            ReviewPeriod::new(2026, 2),
            &template(),
        )
    }

    #[test]
    fn test_from_template_copies_weights() {
        let r = review();
        assert_eq!(r.scores.len(), 2);
        assert_eq!(r.scores[0].weight, 60);
        assert_eq!(r.scores[1].score, None);
        assert_eq!(r.base.description, "Sales / 2026 Q2");
    }

    #[test]
    fn test_value_equality() {
        let r = review();
        let mut scored = r.clone();
        assert_eq!(scored, r);

        let kra_id = scored.scores[0].kra_id.clone();
        scored.set_score(&kra_id, 4.0);
        assert_ne!(scored, r);
    }

    #[test]
    fn test_weighted_score() {
        let mut r = review();
        assert_eq!(r.weighted_score(), None);
        r.set_score("kra-a", 5.0);
        assert_eq!(r.weighted_score(), Some(5.0));
        r.set_score("kra-b", 3.0);
        let score = r.weighted_score().unwrap();
        assert!((score - 4.2).abs() < 1e-9);
    }

    #[test]
    fn test_advance_requires_all_scores() {
        let mut r = review();
        assert_eq!(r.advance(), Ok(ReviewStatus::SelfAssessment));
        assert_eq!(r.advance(), Ok(ReviewStatus::ManagerReview));
        assert!(r.advance().is_err());
        r.set_score("kra-a", 4.0);
        r.set_score("kra-b", 4.0);
        assert_eq!(r.advance(), Ok(ReviewStatus::Completed));
        assert!(r.advance().is_err());
    }

    #[test]
    fn test_validate_score_range() {
        let mut r = review();
        r.set_score("kra-a", 7.0);
        assert!(r.validate(5).is_err());
        r.set_score("kra-a", 4.5);
        assert!(r.validate(5).is_ok());
    }

    #[test]
    fn test_period_ordering() {
        assert!(ReviewPeriod::new(2025, 4) < ReviewPeriod::new(2026, 1));
        assert!(ReviewPeriod::new(2026, 1) < ReviewPeriod::new(2026, 2));
    }
}
