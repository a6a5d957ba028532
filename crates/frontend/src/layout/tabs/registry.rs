//! Tab content registry - маппинг tab.key → View
//!
//! Все ключи табов собраны здесь. Контент оборачивается в `RequireAccess`,
//! поэтому открыть раздел чужой роли через `?active=` нельзя.

use super::tab_labels::TEMPLATE_BUILDER_KEY;
use crate::dashboards::d400_review_summary::ui::ReviewSummaryDashboard;
use crate::dashboards::d401_performance_trend::ui::PerformanceTrendDashboard;
use crate::domain::a001_kra::ui::list::KraList;
use crate::domain::a002_kra_template::ui::builder::KraTemplateBuilder;
use crate::domain::a002_kra_template::ui::list::KraTemplateList;
use crate::domain::a003_department::ui::list::DepartmentList;
use crate::domain::a004_goal::ui::list::GoalList;
use crate::domain::a005_review::ui::list::ReviewReport;
use crate::layout::global_context::AppGlobalContext;
use crate::system::auth::guard::RequireAccess;
use crate::system::settings::SettingsPage;
use crate::system::users::ui::list::UsersListPage;
use leptos::prelude::*;

/// Рендерит контент таба по его ключу.
///
/// `tabs_store` нужен табам, которые закрывают сами себя (конструктор шаблона).
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();

    match key {
        // ── Dashboards (d4xx) ────────────────────────────────────────────
        "d400_review_summary" => guarded("d400_review_summary", || {
            view! { <ReviewSummaryDashboard /> }.into_any()
        }),
        "d401_performance_trend" => guarded("d401_performance_trend", || {
            view! { <PerformanceTrendDashboard /> }.into_any()
        }),

        // ── Aggregates (a0xx) ────────────────────────────────────────────
        "a001_kra" => guarded("a001_kra", || view! { <KraList /> }.into_any()),
        "a002_kra_template" => guarded("a002_kra_template", || {
            view! { <KraTemplateList /> }.into_any()
        }),
        // конструктор доступен тем же ролям, что и список шаблонов
        TEMPLATE_BUILDER_KEY => guarded("a002_kra_template", move || {
            let key = key_for_close.clone();
            view! {
                <KraTemplateBuilder on_close=Callback::new(move |_| tabs_store.close_tab(&key)) />
            }
            .into_any()
        }),
        "a003_department" => guarded("a003_department", || {
            view! { <DepartmentList /> }.into_any()
        }),
        "a004_goal" => guarded("a004_goal", || view! { <GoalList /> }.into_any()),
        "a005_review" => guarded("a005_review", || view! { <ReviewReport /> }.into_any()),

        // ── System ───────────────────────────────────────────────────────
        "sys_users" => guarded("sys_users", || view! { <UsersListPage /> }.into_any()),
        "sys_settings" => guarded("sys_settings", || view! { <SettingsPage /> }.into_any()),

        _ => {
            log::warn!("Unknown tab type: {}", key);
            view! { <div class="placeholder">"Not implemented yet"</div> }.into_any()
        }
    }
}

fn guarded<F>(menu_key: &'static str, render: F) -> AnyView
where
    F: Fn() -> AnyView + Send + Sync + 'static,
{
    view! {
        <RequireAccess menu_key=menu_key>
            {render()}
        </RequireAccess>
    }
    .into_any()
}
