use contracts::dashboards::d401_performance_trend::{PerformanceTrend, TrendPoint};
use contracts::domain::a005_review::{Review, ReviewStatus};
use contracts::system::users::User;
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::stat_card::{format_value, StatCard, ValueFormat};
use crate::shared::data_store::{can_see_owner, use_data_store};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::system::auth::context::use_auth;
use crate::system::settings::use_settings;

/// Завершённые оценки сотрудников подразделения (`None`: все)
pub fn trend_reviews(reviews: &[Review], users: &[User], department_id: Option<&str>) -> Vec<Review> {
    reviews
        .iter()
        .filter(|r| r.status == ReviewStatus::Completed)
        .filter(|r| match department_id {
            None => true,
            Some(dept) => users
                .iter()
                .find(|u| u.id == r.employee_user_id)
                .and_then(|u| u.department_id.as_deref())
                == Some(dept),
        })
        .cloned()
        .collect()
}

/// Ширина столбца в процентах от шкалы оценок
pub fn bar_width_pct(score: f64, scale_max: u8) -> f64 {
    if scale_max == 0 {
        return 0.0;
    }
    (score / scale_max as f64 * 100.0).clamp(0.0, 100.0)
}

fn format_delta(delta: Option<f64>) -> (String, &'static str) {
    match delta {
        Some(d) if d > 0.0 => (format!("▲ {:.2}", d), "trend__delta trend__delta--up"),
        Some(d) if d < 0.0 => (format!("▼ {:.2}", d.abs()), "trend__delta trend__delta--down"),
        Some(_) => ("0.00".to_string(), "trend__delta"),
        None => ("—".to_string(), "trend__delta"),
    }
}

/// Динамика среднего взвешенного балла по периодам
#[component]
pub fn PerformanceTrendDashboard() -> impl IntoView {
    let store = use_data_store();
    let settings = use_settings();
    let (auth_state, _) = use_auth();
    let (department, set_department) = signal::<Option<String>>(None);

    let trend = Memo::new(move |_| {
        let Some(viewer) = auth_state.with(|s| s.user().cloned()) else {
            return PerformanceTrend::default();
        };
        let users = store.users.get();
        let visible: Vec<Review> = store
            .reviews
            .get()
            .into_iter()
            .filter(|r| {
                viewer.id == r.reviewer_user_id
                    || can_see_owner(&viewer, &r.employee_user_id, &users)
            })
            .collect();
        let reviews = department.with(|d| trend_reviews(&visible, &users, d.as_deref()));
        PerformanceTrend::from_reviews(&reviews)
    });

    let scale_max = move || settings.settings.with(|s| s.rating_scale_max);

    view! {
        <PageFrame page_id="d401_performance_trend--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Performance trend"</h1>
                </div>
                <div class="page__header-right">
                    <select
                        class="filter-panel__select"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            set_department.set(if value.is_empty() { None } else { Some(value) });
                        }
                    >
                        <option value="">"All departments"</option>
                        {move || store.departments.get().into_iter().map(|d| {
                            view! { <option value=d.to_string_id()>{d.base.description.clone()}</option> }
                        }).collect_view()}
                    </select>
                </div>
            </div>

            <div class="page__content">
                <div class="stat-cards">
                    <StatCard
                        label="Latest average"
                        icon_name="bar-chart"
                        value=Signal::derive(move || trend.with(|t| t.latest().map(|p| p.average_score)))
                        format=ValueFormat::Number { decimals: 2 }
                        change=Signal::derive(move || trend.with(|t| t.latest().and_then(|p| p.delta)))
                        subtitle=Signal::derive(move || trend.with(|t| t.latest().map(|p| p.period.label())))
                    />
                    <StatCard
                        label="Change over all periods"
                        icon_name="activity"
                        value=Signal::derive(move || trend.with(|t| t.overall_change()))
                        format=ValueFormat::Number { decimals: 2 }
                    />
                    <StatCard
                        label="Periods"
                        icon_name="layers"
                        value=Signal::derive(move || Some(trend.with(|t| t.points.len() as f64)))
                        format=ValueFormat::Integer
                    />
                </div>

                <Show
                    when=move || trend.with(|t| !t.points.is_empty())
                    fallback=|| view! { <div class="placeholder">"No completed reviews yet."</div> }
                >
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Period"</TableHeaderCell>
                                <TableHeaderCell>"Reviews"</TableHeaderCell>
                                <TableHeaderCell>"Average"</TableHeaderCell>
                                <TableHeaderCell>"Change"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || trend.get().points
                                key=|p: &TrendPoint| p.period
                                children=move |p: TrendPoint| {
                                    let (delta_text, delta_class) = format_delta(p.delta);
                                    let score = p.average_score;
                                    view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout>{p.period.label()}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{p.review_count}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {format_value(score, ValueFormat::Number { decimals: 2 })}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout><span class=delta_class>{delta_text}</span></TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <div class="trend__bar-track">
                                                    <div
                                                        class="trend__bar"
                                                        style:width=move || format!("{:.1}%", bar_width_pct(score, scale_max()))
                                                    ></div>
                                                </div>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::mock_data::{self, dept_id, DEPT_ENGINEERING, DEPT_SALES};
    use contracts::domain::common::AggregateId;

    fn trend_for(dept: Option<u128>) -> PerformanceTrend {
        let dept = dept.map(|raw| dept_id(raw).as_string());
        let reviews = trend_reviews(&mock_data::reviews(), &mock_data::users(), dept.as_deref());
        PerformanceTrend::from_reviews(&reviews)
    }

    #[test]
    fn test_sales_trend() {
        let trend = trend_for(Some(DEPT_SALES));
        assert_eq!(trend.points.len(), 2);
        assert!((trend.points[0].average_score - 2.85).abs() < 1e-9);
        assert!((trend.points[1].average_score - 3.35).abs() < 1e-9);
        assert!((trend.overall_change().unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_only_completed_reviews_count() {
        let trend = trend_for(Some(DEPT_ENGINEERING));
        // частично оценённая R-2026Q1-02 не учитывается
        let latest = trend.latest().unwrap();
        assert_eq!(latest.review_count, 1);
        assert!((latest.average_score - 4.1).abs() < 1e-9);
        assert_eq!(trend.points.len(), 3);
        assert_eq!(trend.points[1].review_count, 2);

        assert_eq!(trend_for(None).points.len(), 3);
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width_pct(2.5, 5), 50.0);
        assert_eq!(bar_width_pct(7.0, 5), 100.0);
        assert_eq!(bar_width_pct(3.0, 0), 0.0);
    }
}
