use chrono::{Duration, NaiveDate, Utc};
use contracts::dashboards::d400_review_summary::{GoalSummary, ReviewSummary};
use contracts::domain::a004_goal::{Goal, GoalStatus};
use contracts::domain::a005_review::ReviewStatus;
use leptos::prelude::*;

use crate::shared::components::stat_card::{StatCard, ValueFormat};
use crate::shared::data_store::{can_see_owner, use_data_store};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::system::auth::context::use_auth;
use crate::system::settings::use_settings;

/// Незавершённые цели со сроком в ближайшие `days` дней, по сроку
pub fn due_soon(goals: &[Goal], today: NaiveDate, days: u32) -> Vec<Goal> {
    let horizon = today + Duration::days(days as i64);
    let mut list: Vec<Goal> = goals
        .iter()
        .filter(|g| g.status != GoalStatus::Completed)
        .filter(|g| g.due_date >= today && g.due_date <= horizon)
        .cloned()
        .collect();
    list.sort_by_key(|g| g.due_date);
    list
}

/// Главный дашборд: оценки и цели в зоне видимости пользователя
#[component]
pub fn ReviewSummaryDashboard() -> impl IntoView {
    let store = use_data_store();
    let settings = use_settings();
    let (auth_state, _) = use_auth();
    let today = Utc::now().date_naive();

    let goals = Memo::new(move |_| {
        let Some(viewer) = auth_state.with(|s| s.user().cloned()) else {
            return Vec::new();
        };
        let users = store.users.get();
        store
            .goals
            .get()
            .into_iter()
            .filter(|g| can_see_owner(&viewer, &g.owner_user_id, &users))
            .collect::<Vec<_>>()
    });

    let review_summary = Memo::new(move |_| {
        let Some(viewer) = auth_state.with(|s| s.user().cloned()) else {
            return ReviewSummary::from_reviews(&[]);
        };
        let users = store.users.get();
        let reviews: Vec<_> = store
            .reviews
            .get()
            .into_iter()
            .filter(|r| {
                viewer.id == r.reviewer_user_id
                    || can_see_owner(&viewer, &r.employee_user_id, &users)
            })
            .collect();
        ReviewSummary::from_reviews(&reviews)
    });

    let goal_summary = Memo::new(move |_| goals.with(|g| GoalSummary::from_goals(g, today)));

    let reminders = Memo::new(move |_| {
        let days = settings.settings.with(|s| s.goal_reminder_days);
        goals.with(|g| due_soon(g, today, days))
    });

    view! {
        <PageFrame page_id="d400_review_summary--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Dashboard"</h1>
                </div>
                <div class="page__header-right">
                    <span class="page__subtitle">
                        {move || format!(
                            "{} · {} review cycle",
                            settings.settings.with(|s| s.company_name.clone()),
                            settings.settings.with(|s| s.review_cycle.label()),
                        )}
                    </span>
                </div>
            </div>

            <div class="page__content">
                <h3>"Reviews"</h3>
                <div class="stat-cards">
                    <StatCard
                        label="Open reviews"
                        icon_name="file-text"
                        value=Signal::derive(move || Some(review_summary.with(|s| {
                            (s.total - s.count(ReviewStatus::Completed)) as f64
                        })))
                        format=ValueFormat::Integer
                    />
                    <StatCard
                        label="Completion rate"
                        icon_name="activity"
                        value=Signal::derive(move || Some(review_summary.with(|s| s.completed_pct)))
                        format=ValueFormat::Percent { decimals: 0 }
                    />
                    <StatCard
                        label="Average score"
                        icon_name="bar-chart"
                        value=Signal::derive(move || review_summary.with(|s| s.average_score))
                        format=ValueFormat::Number { decimals: 2 }
                    />
                </div>

                <h3>"Goals"</h3>
                <div class="stat-cards">
                    {GoalStatus::ALL.into_iter().map(|status| view! {
                        <StatCard
                            label=status.label()
                            icon_name="target"
                            value=Signal::derive(move || Some(goal_summary.with(|s| s.count(status) as f64)))
                            format=ValueFormat::Integer
                        />
                    }).collect_view()}
                </div>

                <h3>
                    {move || format!(
                        "Due in the next {} days",
                        settings.settings.with(|s| s.goal_reminder_days)
                    )}
                </h3>
                <Show
                    when=move || reminders.with(|r| !r.is_empty())
                    fallback=|| view! { <div class="placeholder">"Nothing due soon."</div> }
                >
                    <ul class="dashboard__reminders">
                        {move || reminders.get().into_iter().map(|g| view! {
                            <li>
                                <strong>{g.base.code.clone()}</strong>
                                " "
                                {g.base.description.clone()}
                                " · "
                                {store.user_name(&g.owner_user_id)}
                                " · "
                                {g.due_date.format("%Y-%m-%d").to_string()}
                                " · "
                                {format!("{}%", g.progress)}
                            </li>
                        }).collect_view()}
                    </ul>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::mock_data;

    #[test]
    fn test_due_soon_window() {
        let goals = mock_data::goals();
        let today = NaiveDate::from_ymd_opt(2026, 11, 25).unwrap();

        let codes = |days| {
            due_soon(&goals, today, days)
                .into_iter()
                .map(|g| g.base.code)
                .collect::<Vec<_>>()
        };
        // G-102 завершена, просроченные не попадают
        assert_eq!(codes(30), vec!["G-101"]);
        assert_eq!(codes(40), vec!["G-101", "G-104", "G-201"]);
        assert!(codes(0).is_empty());
    }
}
