//! Sidebar: пункты меню текущей роли

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use contracts::system::auth::{menu_for_role, MenuItem};
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();

    let items = move || -> &'static [MenuItem] {
        auth_state
            .get()
            .role()
            .map(menu_for_role)
            .unwrap_or(&[])
    };

    view! {
        <div class="app-sidebar__content">
            {move || items().iter().map(|item| {
                let MenuItem { key, label, icon: icon_name } = *item;
                view! {
                    <div
                        class="app-sidebar__item"
                        class:app-sidebar__item--active=move || {
                            ctx.active.get().as_deref() == Some(key)
                        }
                        on:click=move |_| ctx.open_tab(key, label)
                    >
                        <div class="app-sidebar__item-content">
                            {icon(icon_name)}
                            <span>{label}</span>
                        </div>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
