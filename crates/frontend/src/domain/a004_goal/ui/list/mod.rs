use chrono::{NaiveDate, Utc};
use contracts::dashboards::d400_review_summary::GoalSummary;
use contracts::domain::a004_goal::{Goal, GoalStatus};
use contracts::system::auth::{Role, UserInfo};
use contracts::system::users::User;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::stat_card::{StatCard, ValueFormat};
use crate::shared::data_store::{can_see_owner, use_data_store};
use crate::shared::list_utils::{
    any_field_contains, cmp_ignore_case, filter_list, get_sort_indicator, sort_list, SearchInput,
    Searchable, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_auth;

impl Searchable for Goal {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_contains(
            [self.base.code.as_str(), self.base.description.as_str()],
            filter,
        )
    }
}

impl Sortable for Goal {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "description" => cmp_ignore_case(&self.base.description, &other.base.description),
            "progress" => self.progress.cmp(&other.progress),
            "due_date" => self.due_date.cmp(&other.due_date),
            _ => cmp_ignore_case(&self.base.code, &other.base.code),
        }
    }
}

/// Цели, видимые пользователю, с фильтром по фактическому статусу
pub fn visible_goals(
    goals: Vec<Goal>,
    viewer: &UserInfo,
    users: &[User],
    status: Option<GoalStatus>,
    today: NaiveDate,
) -> Vec<Goal> {
    goals
        .into_iter()
        .filter(|g| can_see_owner(viewer, &g.owner_user_id, users))
        .filter(|g| status.map_or(true, |st| g.effective_status(today) == st))
        .collect()
}

/// Менять прогресс может владелец цели или руководитель/админ
pub fn can_edit_progress(viewer: &UserInfo, goal: &Goal) -> bool {
    viewer.role != Role::Employee || viewer.id == goal.owner_user_id
}

fn status_badge(status: GoalStatus) -> &'static str {
    match status {
        GoalStatus::NotStarted => "badge badge--neutral",
        GoalStatus::InProgress => "badge badge--warning",
        GoalStatus::Completed => "badge badge--success",
        GoalStatus::Overdue => "badge badge--error",
    }
}

#[component]
#[allow(non_snake_case)]
pub fn GoalList() -> impl IntoView {
    let store = use_data_store();
    let (auth_state, _) = use_auth();
    let today = Utc::now().date_naive();

    let search = RwSignal::new(String::new());
    let status_filter = RwSignal::new(None::<GoalStatus>);
    let sort_field = RwSignal::new("due_date".to_string());
    let sort_ascending = RwSignal::new(true);

    // видимые цели без фильтра статуса: для сводки
    let scoped = Memo::new(move |_| {
        let Some(viewer) = auth_state.with(|s| s.user().cloned()) else {
            return Vec::new();
        };
        let users = store.users.get();
        visible_goals(store.goals.get(), &viewer, &users, None, today)
    });

    let summary = Memo::new(move |_| scoped.with(|goals| GoalSummary::from_goals(goals, today)));

    let rows = Memo::new(move |_| {
        let status = status_filter.get();
        let mut rows: Vec<Goal> = filter_list(scoped.get(), &search.get())
            .into_iter()
            .filter(|g| status.map_or(true, |st| g.effective_status(today) == st))
            .collect();
        sort_list(&mut rows, &sort_field.get(), sort_ascending.get());
        rows
    });

    let toggle_sort = move |field: &'static str| {
        if sort_field.get_untracked() == field {
            sort_ascending.update(|asc| *asc = !*asc);
        } else {
            sort_field.set(field.to_string());
            sort_ascending.set(true);
        }
    };

    let sort_header = move |field: &'static str, title: &'static str| {
        view! {
            <TableHeaderCell>
                <div class="table__sortable-header" style="cursor:pointer;" on:click=move |_| toggle_sort(field)>
                    {title}
                    <span>{move || get_sort_indicator(&sort_field.get(), field, sort_ascending.get())}</span>
                </div>
            </TableHeaderCell>
        }
    };

    let update_progress = move |goal_id: String, raw: String| {
        let progress = raw.trim().parse::<u8>().unwrap_or(0);
        store.goals.update(|goals| {
            if let Some(goal) = goals.iter_mut().find(|g| g.to_string_id() == goal_id) {
                goal.set_progress(progress);
                log::info!("Goal {} progress set to {}%", goal.base.code, goal.progress);
            }
        });
    };

    view! {
        <PageFrame page_id="a004_goal--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Goal::list_name()}</h1>
                    <Badge>{move || rows.with(|r| r.len().to_string())}</Badge>
                </div>
            </div>

            <div class="page__content">
                <div class="stat-cards">
                    <StatCard
                        label="Goals"
                        icon_name="target"
                        value=Signal::derive(move || Some(summary.with(|s| s.total as f64)))
                        format=ValueFormat::Integer
                    />
                    <StatCard
                        label="Completed"
                        icon_name="activity"
                        value=Signal::derive(move || Some(summary.with(|s| s.count(GoalStatus::Completed) as f64)))
                        format=ValueFormat::Integer
                    />
                    <StatCard
                        label="Overdue"
                        icon_name="activity"
                        value=Signal::derive(move || Some(summary.with(|s| s.count(GoalStatus::Overdue) as f64)))
                        format=ValueFormat::Integer
                    />
                    <StatCard
                        label="Average progress"
                        icon_name="bar-chart"
                        value=Signal::derive(move || Some(summary.with(|s| s.average_progress)))
                        format=ValueFormat::Percent { decimals: 0 }
                    />
                </div>

                <div class="filter-panel">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <SearchInput
                            value=search
                            on_change=Callback::new(move |q: String| search.set(q))
                            placeholder="Code or title..."
                        />
                        <select
                            class="filter-panel__select"
                            on:change=move |ev| status_filter.set(GoalStatus::from_key(&event_target_value(&ev)))
                        >
                            <option value="">"All statuses"</option>
                            {GoalStatus::ALL.iter().map(|st| view! {
                                <option value=st.as_str()>{st.label()}</option>
                            }).collect_view()}
                        </select>
                    </Flex>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {sort_header("code", "Code")}
                                {sort_header("description", "Goal")}
                                <TableHeaderCell>"Owner"</TableHeaderCell>
                                <TableHeaderCell>"KRA"</TableHeaderCell>
                                <TableHeaderCell>"Status"</TableHeaderCell>
                                {sort_header("progress", "Progress")}
                                {sort_header("due_date", "Due")}
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || rows.get()
                                key=|g| (g.to_string_id(), g.progress)
                                children=move |goal: Goal| {
                                    let status = goal.effective_status(today);
                                    let owner = store.user_name(&goal.owner_user_id);
                                    let kra = goal
                                        .kra_id
                                        .as_deref()
                                        .map(|id| store.kra_title(id))
                                        .unwrap_or_else(|| "-".to_string());
                                    let editable = auth_state
                                        .with_untracked(|s| s.user().map(|v| can_edit_progress(v, &goal)))
                                        .unwrap_or(false);
                                    let goal_id = goal.to_string_id();
                                    let progress = goal.progress;
                                    view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout>{goal.base.code.clone()}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{goal.base.description.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout>{owner}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{kra}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class=status_badge(status)>{status.label()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if editable {
                                                        view! {
                                                            <input
                                                                type="number"
                                                                class="goal-progress__input"
                                                                min="0"
                                                                max="100"
                                                                prop:value=progress.to_string()
                                                                on:change=move |ev| update_progress(goal_id.clone(), event_target_value(&ev))
                                                            />
                                                            "%"
                                                        }.into_any()
                                                    } else {
                                                        view! { <span>{format!("{}%", progress)}</span> }.into_any()
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{goal.due_date.format("%Y-%m-%d").to_string()}</TableCellLayout>
                                            </TableCell>
                                        </TableRow>
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

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_employee_sees_own_goals() {
        let users = mock_data::users();
        let goals = visible_goals(mock_data::goals(), &viewer("u-dev-2"), &users, None, today());
        let codes: Vec<_> = goals.iter().map(|g| g.base.code.as_str()).collect();
        assert_eq!(codes, vec!["G-103", "G-301"]);
    }

    #[test]
    fn test_status_filter_uses_effective_status() {
        let users = mock_data::users();
        let overdue = visible_goals(
            mock_data::goals(),
            &viewer("u-admin"),
            &users,
            Some(GoalStatus::Overdue),
            today(),
        );
        let codes: Vec<_> = overdue.iter().map(|g| g.base.code.as_str()).collect();
        assert_eq!(codes, vec!["G-103", "G-202", "G-301"]);
    }

    #[test]
    fn test_can_edit_progress() {
        let goals = mock_data::goals();
        let g101 = goals.iter().find(|g| g.base.code == "G-101").unwrap();
        assert!(can_edit_progress(&viewer("u-dev-1"), g101));
        assert!(!can_edit_progress(&viewer("u-dev-2"), g101));
        assert!(can_edit_progress(&viewer("u-manager"), g101));
    }
}
