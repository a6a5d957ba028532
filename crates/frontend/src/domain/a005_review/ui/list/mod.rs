//! Отчёт по оценкам: сводка, фильтр по периоду, перевод по этапам и баллы по KRA

use contracts::dashboards::d400_review_summary::ReviewSummary;
use contracts::domain::a005_review::{Review, ReviewPeriod, ReviewStatus};
use contracts::system::auth::{Role, UserInfo};
use contracts::system::users::User;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use std::collections::BTreeSet;
use thaw::*;

use crate::shared::components::stat_card::{StatCard, ValueFormat};
use crate::shared::data_store::{can_see_owner, use_data_store};
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_ignore_case, sort_list, Sortable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_auth;
use crate::system::settings::use_settings;

impl Sortable for Review {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "code" => cmp_ignore_case(&self.base.code, &other.base.code),
            "score" => self
                .weighted_score()
                .partial_cmp(&other.weighted_score())
                .unwrap_or(std::cmp::Ordering::Equal),
            _ => self
                .period
                .cmp(&other.period)
                .then_with(|| self.base.code.cmp(&other.base.code)),
        }
    }
}

pub fn visible_reviews(
    reviews: Vec<Review>,
    viewer: &UserInfo,
    users: &[User],
    period: Option<ReviewPeriod>,
) -> Vec<Review> {
    reviews
        .into_iter()
        .filter(|r| {
            viewer.id == r.reviewer_user_id || can_see_owner(viewer, &r.employee_user_id, users)
        })
        .filter(|r| period.map_or(true, |p| r.period == p))
        .collect()
}

/// Периоды, по которым есть оценки, от новых к старым
pub fn periods_of(reviews: &[Review]) -> Vec<ReviewPeriod> {
    let set: BTreeSet<ReviewPeriod> = reviews.iter().map(|r| r.period).collect();
    set.into_iter().rev().collect()
}

/// Двигать этапы и ставить баллы может проверяющий или админ
pub fn can_manage(viewer: &UserInfo, review: &Review) -> bool {
    viewer.role == Role::Admin || viewer.id == review.reviewer_user_id
}

fn period_key(period: &ReviewPeriod) -> String {
    format!("{}-{}", period.year, period.quarter)
}

fn parse_period_key(key: &str) -> Option<ReviewPeriod> {
    let (year, quarter) = key.split_once('-')?;
    Some(ReviewPeriod::new(year.parse().ok()?, quarter.parse().ok()?))
}

fn status_badge(status: ReviewStatus) -> &'static str {
    match status {
        ReviewStatus::Draft => "badge badge--neutral",
        ReviewStatus::SelfAssessment | ReviewStatus::ManagerReview => "badge badge--warning",
        ReviewStatus::Completed => "badge badge--success",
    }
}

fn format_score(score: Option<f64>) -> String {
    score.map(|s| format!("{:.2}", s)).unwrap_or_else(|| "-".to_string())
}

#[component]
#[allow(non_snake_case)]
pub fn ReviewReport() -> impl IntoView {
    let store = use_data_store();
    let settings = use_settings();
    let (auth_state, _) = use_auth();

    let period_filter = RwSignal::new(None::<ReviewPeriod>);
    let expanded = RwSignal::new(None::<String>);
    let error = RwSignal::new(None::<String>);

    let viewer = move || auth_state.with(|s| s.user().cloned());

    let scoped = Memo::new(move |_| {
        let Some(viewer) = viewer() else {
            return Vec::new();
        };
        let users = store.users.get();
        visible_reviews(store.reviews.get(), &viewer, &users, None)
    });

    let rows = Memo::new(move |_| {
        let period = period_filter.get();
        let mut rows: Vec<Review> = scoped
            .get()
            .into_iter()
            .filter(|r| period.map_or(true, |p| r.period == p))
            .collect();
        sort_list(&mut rows, "period", false);
        rows
    });

    let summary = Memo::new(move |_| rows.with(|r| ReviewSummary::from_reviews(r)));

    let advance = move |review_id: String| {
        error.set(None);
        store.reviews.update(|reviews| {
            let Some(review) = reviews.iter_mut().find(|r| r.to_string_id() == review_id) else {
                return;
            };
            match review.advance() {
                Ok(status) => log::info!("Review {} moved to {}", review.base.code, status.label()),
                Err(e) => {
                    log::warn!("Review {} not advanced: {}", review.base.code, e);
                    error.set(Some(format!("{}: {}", review.base.code, e)));
                }
            }
        });
    };

    let set_score = move |review_id: String, kra_id: String, raw: String| {
        error.set(None);
        let Ok(score) = raw.trim().parse::<f64>() else {
            error.set(Some(format!("'{}' is not a number", raw.trim())));
            return;
        };
        let scale = settings.settings.with_untracked(|s| s.rating_scale_max);
        store.reviews.update(|reviews| {
            let Some(review) = reviews.iter_mut().find(|r| r.to_string_id() == review_id) else {
                return;
            };
            let mut candidate = review.clone();
            candidate.set_score(&kra_id, score);
            match candidate.validate(scale) {
                Ok(()) => *review = candidate,
                Err(e) => error.set(Some(e)),
            }
        });
    };

    view! {
        <PageFrame page_id="a005_review--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Review::list_name()}</h1>
                    <Badge>{move || rows.with(|r| r.len().to_string())}</Badge>
                </div>
                <div class="page__header-right">
                    <select
                        class="filter-panel__select"
                        on:change=move |ev| period_filter.set(parse_period_key(&event_target_value(&ev)))
                    >
                        <option value="">"All periods"</option>
                        {move || scoped.with(|r| periods_of(r)).into_iter().map(|p| view! {
                            <option value=period_key(&p)>{p.label()}</option>
                        }).collect_view()}
                    </select>
                </div>
            </div>

            <div class="page__content">
                <div class="stat-cards">
                    <StatCard
                        label="Reviews"
                        icon_name="file-text"
                        value=Signal::derive(move || Some(summary.with(|s| s.total as f64)))
                        format=ValueFormat::Integer
                    />
                    <StatCard
                        label="Completed"
                        icon_name="activity"
                        value=Signal::derive(move || Some(summary.with(|s| s.completed_pct)))
                        format=ValueFormat::Percent { decimals: 0 }
                    />
                    <StatCard
                        label="Average score"
                        icon_name="bar-chart"
                        value=Signal::derive(move || summary.with(|s| s.average_score))
                        format=ValueFormat::Number { decimals: 2 }
                        subtitle=Signal::derive(move || {
                            Some(format!("of {}", settings.settings.with(|s| s.rating_scale_max)))
                        })
                    />
                </div>

                <div class="review-report__statuses">
                    {move || summary.with(|s| s.by_status.clone()).into_iter().map(|c| view! {
                        <span class=status_badge(c.status)>{format!("{}: {}", c.status.label(), c.count)}</span>
                    }).collect_view()}
                </div>

                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Code"</TableHeaderCell>
                                <TableHeaderCell>"Employee"</TableHeaderCell>
                                <TableHeaderCell>"Reviewer"</TableHeaderCell>
                                <TableHeaderCell>"Period"</TableHeaderCell>
                                <TableHeaderCell>"Status"</TableHeaderCell>
                                <TableHeaderCell>"Score"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || rows.get()
                                key=|r| (r.to_string_id(), r.status, format_score(r.weighted_score()))
                                children=move |review: Review| {
                                    let id = review.to_string_id();
                                    let manageable = viewer().map(|v| can_manage(&v, &review)).unwrap_or(false);
                                    let can_advance = manageable && review.status.next().is_some();
                                    let id_for_toggle = id.clone();
                                    let id_for_advance = id.clone();
                                    let id_for_score = id.clone();
                                    let editable = manageable && review.status != ReviewStatus::Completed;
                                    let sheet = review.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell clone:review>
                                                <TableCellLayout>
                                                    <a href="#" on:click=move |ev| {
                                                        ev.prevent_default();
                                                        let id = id_for_toggle.clone();
                                                        expanded.update(|e| {
                                                            *e = if e.as_deref() == Some(id.as_str()) { None } else { Some(id) };
                                                        });
                                                    }>
                                                        {review.base.code.clone()}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell clone:review><TableCellLayout>{store.user_name(&review.employee_user_id)}</TableCellLayout></TableCell>
                                            <TableCell clone:review><TableCellLayout>{store.user_name(&review.reviewer_user_id)}</TableCellLayout></TableCell>
                                            <TableCell clone:review><TableCellLayout>{review.period.label()}</TableCellLayout></TableCell>
                                            <TableCell clone:review>
                                                <TableCellLayout>
                                                    <span class=status_badge(review.status)>{review.status.label()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell clone:review><TableCellLayout>{format_score(review.weighted_score())}</TableCellLayout></TableCell>
                                            <TableCell>
                                                {can_advance.then(|| view! {
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| advance(id_for_advance.clone())
                                                        attr:title="Move to next stage"
                                                    >
                                                        {icon("activity")}
                                                    </Button>
                                                })}
                                            </TableCell>
                                        </TableRow>
                                        <Show when=move || expanded.get().as_deref() == Some(id.as_str())>
                                            <TableRow clone:sheet clone:id_for_score>
                                                <TableCell attr:colspan="7">
                                                    <ScoreSheet
                                                        review=sheet.clone()
                                                        editable=editable
                                                        on_score=Callback::new({
                                                            let id = id_for_score.clone();
                                                            move |(kra_id, raw): (String, String)| set_score(id.clone(), kra_id, raw)
                                                        })
                                                    />
                                                </TableCell>
                                            </TableRow>
                                        </Show>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>
        </PageFrame>
    }
}

/// Баллы по KRA одной оценки
#[component]
fn ScoreSheet(review: Review, editable: bool, on_score: Callback<(String, String)>) -> impl IntoView {
    let store = use_data_store();

    view! {
        <table class="review-report__scores">
            <tbody>
                {review.scores.into_iter().map(|row| {
                    let kra_id = row.kra_id.clone();
                    let title = store.kra_title(&row.kra_id);
                    let score = row.score.map(|s| s.to_string()).unwrap_or_default();
                    view! {
                        <tr>
                            <td>{title}</td>
                            <td>{format!("{}%", row.weight)}</td>
                            <td>
                                {if editable {
                                    view! {
                                        <input
                                            type="number"
                                            step="0.5"
                                            prop:value=score
                                            on:change=move |ev| on_score.run((kra_id.clone(), event_target_value(&ev)))
                                        />
                                    }.into_any()
                                } else {
                                    view! { <span>{format_score(row.score)}</span> }.into_any()
                                }}
                            </td>
                        </tr>
                    }
                }).collect_view()}
            </tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::mock_data;

    fn viewer(id: &str) -> UserInfo {
        mock_data::users()
            .into_iter()
            .find(|u| u.id == id)
            .map(|u| u.to_user_info())
            .unwrap()
    }

    #[test]
    fn test_reviewer_sees_reviews_outside_own_department() {
        let users = mock_data::users();
        let rows = visible_reviews(mock_data::reviews(), &viewer("u-sales-lead"), &users, None);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.employee_user_id == "u-sales-1"));
    }

    #[test]
    fn test_period_filter_and_periods() {
        let users = mock_data::users();
        let reviews = mock_data::reviews();
        let periods = periods_of(&reviews);
        assert_eq!(periods.first(), Some(&ReviewPeriod::new(2026, 2)));
        assert_eq!(periods.len(), 4);

        let q4 = visible_reviews(reviews, &viewer("u-admin"), &users, Some(ReviewPeriod::new(2025, 4)));
        assert_eq!(q4.len(), 3);
    }

    #[test]
    fn test_parse_period_key() {
        let p = ReviewPeriod::new(2026, 1);
        assert_eq!(parse_period_key(&period_key(&p)), Some(p));
        assert_eq!(parse_period_key(""), None);
    }

    #[test]
    fn test_can_manage() {
        let reviews = mock_data::reviews();
        let r = &reviews[0];
        assert!(can_manage(&viewer("u-manager"), r));
        assert!(can_manage(&viewer("u-admin"), r));
        assert!(!can_manage(&viewer("u-dev-1"), r));
    }
}
