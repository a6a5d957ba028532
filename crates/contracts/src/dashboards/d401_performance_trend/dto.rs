use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::a005_review::{Review, ReviewPeriod};

/// Точка тренда: средний балл за период
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: ReviewPeriod,
    pub average_score: f64,
    pub review_count: usize,
    /// Изменение относительно предыдущей точки; у первой точки нет
    pub delta: Option<f64>,
}

/// Динамика среднего взвешенного балла по периодам
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PerformanceTrend {
    pub points: Vec<TrendPoint>,
}

impl PerformanceTrend {
    /// Оценки без балла пропускаются; точки упорядочены по периоду
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut buckets: BTreeMap<ReviewPeriod, Vec<f64>> = BTreeMap::new();
        for review in reviews {
            if let Some(score) = review.weighted_score() {
                buckets.entry(review.period).or_default().push(score);
            }
        }

        let mut points = Vec::with_capacity(buckets.len());
        let mut previous: Option<f64> = None;
        for (period, scores) in buckets {
            let average_score = scores.iter().sum::<f64>() / scores.len() as f64;
            points.push(TrendPoint {
                period,
                average_score,
                review_count: scores.len(),
                delta: previous.map(|p| average_score - p),
            });
            previous = Some(average_score);
        }

        Self { points }
    }

    pub fn latest(&self) -> Option<&TrendPoint> {
        self.points.last()
    }

    /// Изменение между первой и последней точкой
    pub fn overall_change(&self) -> Option<f64> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() > 1 => {
                Some(last.average_score - first.average_score)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a005_review::{KraScore, ReviewId, ReviewStatus};
    use crate::domain::common::BaseAggregate;

    fn review(year: i32, quarter: u8, score: Option<f64>) -> Review {
        Review {
            base: BaseAggregate::new(ReviewId::new_v4(), "R".into(), "Review".into()),
            employee_user_id: "u".into(),
            reviewer_user_id: "m".into(),
            period: ReviewPeriod::new(year, quarter),
            status: ReviewStatus::Completed,
            scores: vec![KraScore {
                kra_id: "k".into(),
                weight: 100,
                score,
            }],
        }
    }

    #[test]
    fn test_empty_trend() {
        let trend = PerformanceTrend::from_reviews(&[]);
        assert!(trend.points.is_empty());
        assert!(trend.latest().is_none());
        assert_eq!(trend.overall_change(), None);
    }

    #[test]
    fn test_points_sorted_with_deltas() {
        let reviews = vec![
            review(2026, 2, Some(4.0)),
            review(2025, 4, Some(3.0)),
            review(2026, 2, Some(5.0)),
            review(2026, 1, Some(3.5)),
            review(2026, 1, None),
        ];
        let trend = PerformanceTrend::from_reviews(&reviews);
        let periods: Vec<String> = trend.points.iter().map(|p| p.period.label()).collect();
        assert_eq!(periods, vec!["2025 Q4", "2026 Q1", "2026 Q2"]);

        assert_eq!(trend.points[0].delta, None);
        assert_eq!(trend.points[1].delta, Some(0.5));
        assert_eq!(trend.points[2].average_score, 4.5);
        assert_eq!(trend.points[2].review_count, 2);
        assert_eq!(trend.points[2].delta, Some(1.0));
        assert_eq!(trend.overall_change(), Some(1.5));
    }
}
