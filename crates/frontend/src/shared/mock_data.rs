//! Демонстрационные данные PMS
//!
//! Идентификаторы фиксированы (`Uuid::from_u128`), чтобы ссылки между
//! наборами (KRA → подразделение, цель → KRA) были стабильны.

use chrono::NaiveDate;
use contracts::domain::a001_kra::{Kra, KraCategory, KraId};
use contracts::domain::a002_kra_template::{KraTemplate, KraTemplateDto};
use contracts::domain::a003_department::{Department, DepartmentId};
use contracts::domain::a004_goal::Goal;
use contracts::domain::a005_review::{Review, ReviewPeriod, ReviewStatus};
use contracts::domain::common::AggregateId;
use contracts::shared::weights::WeightAllocation;
use contracts::system::auth::Role;
use contracts::system::users::User;
use uuid::Uuid;

pub const DEPT_ENGINEERING: u128 = 0x0d00_0001;
pub const DEPT_SALES: u128 = 0x0d00_0002;
pub const DEPT_PEOPLE: u128 = 0x0d00_0003;

pub fn dept_id(raw: u128) -> DepartmentId {
    DepartmentId::new(Uuid::from_u128(raw))
}

pub fn kra_id(n: u128) -> KraId {
    KraId::new(Uuid::from_u128(0x0a00_0000 + n))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn departments() -> Vec<Department> {
    [
        (DEPT_ENGINEERING, "ENG", "Engineering", "u-manager"),
        (DEPT_SALES, "SAL", "Sales", "u-sales-lead"),
        (DEPT_PEOPLE, "HR", "People & Culture", "u-admin"),
    ]
    .into_iter()
    .map(|(raw, code, name, head)| {
        let mut d = Department::new_for_insert(code.into(), name.into(), Some(head.into()));
        d.base.id = dept_id(raw);
        d
    })
    .collect()
}

pub fn users() -> Vec<User> {
    let user = |id: &str, username: &str, full_name: &str, role: Role, dept: Option<u128>, active: bool| User {
        id: id.to_string(),
        username: username.to_string(),
        email: Some(format!("{}@acme.example", username)),
        full_name: Some(full_name.to_string()),
        role,
        department_id: dept.map(|raw| dept_id(raw).as_string()),
        is_active: active,
        created_at: "2025-09-01T09:00:00Z".to_string(),
        last_login_at: None,
    };

    vec![
        user("u-admin", "admin", "Alex Admin", Role::Admin, Some(DEPT_PEOPLE), true),
        user("u-manager", "mgarcia", "Maria Garcia", Role::Manager, Some(DEPT_ENGINEERING), true),
        user("u-sales-lead", "tchen", "Tom Chen", Role::Manager, Some(DEPT_SALES), true),
        user("u-dev-1", "pnovak", "Petra Novak", Role::Employee, Some(DEPT_ENGINEERING), true),
        user("u-dev-2", "ksingh", "Kiran Singh", Role::Employee, Some(DEPT_ENGINEERING), true),
        user("u-sales-1", "lmoreau", "Louis Moreau", Role::Employee, Some(DEPT_SALES), true),
        user("u-former", "jblack", "Jordan Black", Role::Employee, Some(DEPT_SALES), false),
    ]
}

pub fn kras() -> Vec<Kra> {
    [
        (1, "KRA-001", "Delivery predictability", Some(DEPT_ENGINEERING), KraCategory::Delivery, 30),
        (2, "KRA-002", "Code quality & reviews", Some(DEPT_ENGINEERING), KraCategory::Quality, 25),
        (3, "KRA-003", "Incident response", Some(DEPT_ENGINEERING), KraCategory::Quality, 15),
        (4, "KRA-004", "Mentoring & knowledge sharing", None, KraCategory::People, 25),
        (5, "KRA-005", "Revenue target attainment", Some(DEPT_SALES), KraCategory::Growth, 40),
        (6, "KRA-006", "Pipeline growth", Some(DEPT_SALES), KraCategory::Growth, 30),
        (7, "KRA-007", "Customer satisfaction (NPS)", None, KraCategory::Customer, 20),
        (8, "KRA-008", "Learning & certification", None, KraCategory::Growth, 10),
        (9, "KRA-009", "Hiring & onboarding", Some(DEPT_PEOPLE), KraCategory::People, 35),
    ]
    .into_iter()
    .map(|(n, code, title, dept, category, weight)| {
        let mut k = Kra::new_for_insert(code.into(), title.into(), dept.map(dept_id), category, weight);
        k.base.id = kra_id(n);
        k
    })
    .collect()
}

pub fn templates() -> Vec<KraTemplate> {
    let build = |code: &str, title: &str, dept: u128, items: &[(u128, i32)]| {
        let mut alloc = WeightAllocation::new();
        for (n, weight) in items {
            alloc.toggle(&kra_id(*n).as_string(), *weight);
        }
        let dto = KraTemplateDto {
            code: code.to_string(),
            description: title.to_string(),
            comment: None,
            department_id: Some(dept_id(dept)),
        };
        KraTemplate::from_allocation(&dto, &alloc).ok()
    };

    [
        build("TPL-ENG-IC", "Engineer (IC)", DEPT_ENGINEERING, &[(1, 30), (2, 30), (3, 15), (4, 15), (8, 10)]),
        build("TPL-SAL-AE", "Account Executive", DEPT_SALES, &[(5, 50), (6, 30), (7, 20)]),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn goals() -> Vec<Goal> {
    let goal = |code: &str, title: &str, owner: &str, kra: u128, due: NaiveDate, progress: u8| {
        let mut g = Goal::new_for_insert(
            code.into(),
            title.into(),
            owner.into(),
            Some(kra_id(kra).as_string()),
            due,
        );
        if progress > 0 {
            g.set_progress(progress);
        }
        g
    };

    vec![
        goal("G-101", "Ship billing service v2", "u-dev-1", 1, date(2026, 12, 15), 60),
        goal("G-102", "Reduce flaky tests below 1%", "u-dev-1", 2, date(2026, 11, 30), 100),
        goal("G-103", "On-call runbook for payments", "u-dev-2", 3, date(2026, 6, 30), 40),
        goal("G-104", "Mentor two new hires", "u-manager", 4, date(2026, 12, 31), 0),
        goal("G-201", "Close $1.2M in new ARR", "u-sales-1", 5, date(2026, 12, 31), 35),
        goal("G-202", "Grow qualified pipeline 25%", "u-sales-lead", 6, date(2026, 9, 30), 80),
        goal("G-301", "Cloud practitioner certification", "u-dev-2", 8, date(2026, 3, 31), 20),
    ]
}

pub fn reviews() -> Vec<Review> {
    let templates = templates();
    let Some(eng) = templates.iter().find(|t| t.base.code == "TPL-ENG-IC") else {
        return Vec::new();
    };
    let Some(sales) = templates.iter().find(|t| t.base.code == "TPL-SAL-AE") else {
        return Vec::new();
    };

    // (code, employee, reviewer, template, year, quarter, scores, status)
    let rows: Vec<(&str, &str, &str, &KraTemplate, i32, u8, Vec<f64>, ReviewStatus)> = vec![
        ("R-2025Q3-01", "u-dev-1", "u-manager", eng, 2025, 3, vec![3.0, 3.5, 4.0, 3.0, 3.0], ReviewStatus::Completed),
        ("R-2025Q3-02", "u-sales-1", "u-sales-lead", sales, 2025, 3, vec![2.5, 3.0, 3.5], ReviewStatus::Completed),
        ("R-2025Q4-01", "u-dev-1", "u-manager", eng, 2025, 4, vec![3.5, 4.0, 4.0, 3.5, 3.0], ReviewStatus::Completed),
        ("R-2025Q4-02", "u-dev-2", "u-manager", eng, 2025, 4, vec![3.0, 3.0, 3.5, 2.5, 4.0], ReviewStatus::Completed),
        ("R-2025Q4-03", "u-sales-1", "u-sales-lead", sales, 2025, 4, vec![3.0, 3.5, 4.0], ReviewStatus::Completed),
        ("R-2026Q1-01", "u-dev-1", "u-manager", eng, 2026, 1, vec![4.0, 4.5, 4.0, 4.0, 3.5], ReviewStatus::Completed),
        ("R-2026Q1-02", "u-dev-2", "u-manager", eng, 2026, 1, vec![3.5, 3.0], ReviewStatus::ManagerReview),
        ("R-2026Q1-03", "u-sales-1", "u-sales-lead", sales, 2026, 1, vec![], ReviewStatus::SelfAssessment),
        ("R-2026Q2-01", "u-dev-1", "u-manager", eng, 2026, 2, vec![], ReviewStatus::Draft),
    ];

    rows.into_iter()
        .map(|(code, employee, reviewer, template, year, quarter, scores, status)| {
            let mut review = Review::from_template(
                code.into(),
                employee.into(),
                reviewer.into(),
                ReviewPeriod::new(year, quarter),
                template,
            );
            for (row, score) in review.scores.iter_mut().zip(scores) {
                row.score = Some(score);
            }
            review.status = status;
            review
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_templates_are_balanced() {
        let list = templates();
        assert_eq!(list.len(), 2);
        for t in &list {
            assert!(t.validate().is_ok(), "{}", t.base.code);
        }
    }

    #[test]
    fn test_mock_kras_valid() {
        for k in kras() {
            assert!(k.validate().is_ok(), "{}", k.base.code);
        }
    }

    #[test]
    fn test_mock_reviews_reference_templates() {
        let list = reviews();
        assert_eq!(list.len(), 9);
        assert!(list.iter().filter(|r| r.status == ReviewStatus::Completed).all(|r| r.weighted_score().is_some()));
    }

    #[test]
    fn test_mock_goals_reference_kras() {
        let kra_ids: Vec<String> = kras().iter().map(|k| k.to_string_id()).collect();
        for g in goals() {
            let linked = g.kra_id.clone().unwrap_or_default();
            assert!(kra_ids.contains(&linked), "{}", g.base.code);
        }
    }
}
