use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a004_goal::{Goal, GoalStatus};
use crate::domain::a005_review::{Review, ReviewStatus};

/// Количество записей в одном статусе
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCount<S> {
    pub status: S,
    pub count: usize,
}

/// Сводка по оценкам для отчёта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub total: usize,
    /// Все статусы в порядке этапов, включая нулевые
    pub by_status: Vec<StatusCount<ReviewStatus>>,
    /// Доля завершённых оценок, 0-100
    pub completed_pct: f64,
    /// Средний взвешенный балл по оценкам, где он есть
    pub average_score: Option<f64>,
}

impl ReviewSummary {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let by_status: Vec<_> = ReviewStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: reviews.iter().filter(|r| r.status == status).count(),
            })
            .collect();

        let total = reviews.len();
        let completed = reviews
            .iter()
            .filter(|r| r.status == ReviewStatus::Completed)
            .count();
        let completed_pct = if total == 0 {
            0.0
        } else {
            completed as f64 * 100.0 / total as f64
        };

        let scores: Vec<f64> = reviews.iter().filter_map(|r| r.weighted_score()).collect();
        let average_score = if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        };

        Self {
            total,
            by_status,
            completed_pct,
            average_score,
        }
    }

    pub fn count(&self, status: ReviewStatus) -> usize {
        self.by_status
            .iter()
            .find(|c| c.status == status)
            .map(|c| c.count)
            .unwrap_or(0)
    }
}

/// Сводка по целям на дату
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSummary {
    pub total: usize,
    /// Разбивка по статусу с учётом просрочки на `today`
    pub by_status: Vec<StatusCount<GoalStatus>>,
    /// Средний прогресс, 0 для пустого списка
    pub average_progress: f64,
}

impl GoalSummary {
    pub fn from_goals(goals: &[Goal], today: NaiveDate) -> Self {
        let by_status = GoalStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: goals
                    .iter()
                    .filter(|g| g.effective_status(today) == status)
                    .count(),
            })
            .collect();

        let total = goals.len();
        let average_progress = if total == 0 {
            0.0
        } else {
            goals.iter().map(|g| g.progress as f64).sum::<f64>() / total as f64
        };

        Self {
            total,
            by_status,
            average_progress,
        }
    }

    pub fn count(&self, status: GoalStatus) -> usize {
        self.by_status
            .iter()
            .find(|c| c.status == status)
            .map(|c| c.count)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a005_review::{KraScore, ReviewPeriod};
    use crate::domain::common::BaseAggregate;
    use crate::domain::a005_review::ReviewId;

    fn review(status: ReviewStatus, score: Option<f64>) -> Review {
        Review {
            base: BaseAggregate::new(ReviewId::new_v4(), "R".into(), "Review".into()),
            employee_user_id: "u".into(),
            reviewer_user_id: "m".into(),
            period: ReviewPeriod::new(2026, 1),
            status,
            scores: vec![KraScore {
                kra_id: "k".into(),
                weight: 100,
                score,
            }],
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_review_summary_empty() {
        let summary = ReviewSummary::from_reviews(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.completed_pct, 0.0);
        assert_eq!(summary.average_score, None);
        assert_eq!(summary.by_status.len(), 4);
    }

    #[test]
    fn test_review_summary_counts_and_average() {
        let reviews = vec![
            review(ReviewStatus::Completed, Some(4.0)),
            review(ReviewStatus::Completed, Some(3.0)),
            review(ReviewStatus::Draft, None),
            review(ReviewStatus::ManagerReview, Some(5.0)),
        ];
        let summary = ReviewSummary::from_reviews(&reviews);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.count(ReviewStatus::Completed), 2);
        assert_eq!(summary.count(ReviewStatus::SelfAssessment), 0);
        assert_eq!(summary.completed_pct, 50.0);
        assert_eq!(summary.average_score, Some(4.0));
    }

    #[test]
    fn test_goal_summary_uses_effective_status() {
        let mut late = Goal::new_for_insert("G1".into(), "Late".into(), "u".into(), None, date(2026, 1, 31));
        late.set_progress(50);
        let mut done = Goal::new_for_insert("G2".into(), "Done".into(), "u".into(), None, date(2026, 1, 31));
        done.set_progress(100);
        let fresh = Goal::new_for_insert("G3".into(), "Fresh".into(), "u".into(), None, date(2026, 12, 31));

        let summary = GoalSummary::from_goals(&[late, done, fresh], date(2026, 2, 15));
        assert_eq!(summary.total, 3);
        assert_eq!(summary.count(GoalStatus::Overdue), 1);
        assert_eq!(summary.count(GoalStatus::Completed), 1);
        assert_eq!(summary.count(GoalStatus::NotStarted), 1);
        assert_eq!(summary.average_progress, 50.0);
    }
}
