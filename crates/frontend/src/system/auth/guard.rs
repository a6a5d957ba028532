use contracts::system::auth::Role;
use leptos::prelude::*;

use super::context::use_auth;

/// Component that requires the menu section to be available for the current role.
/// Shows fallback otherwise.
#[component]
pub fn RequireAccess(menu_key: &'static str, children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || {
                auth_state
                    .get()
                    .role()
                    .map(|role| role.can_access(menu_key))
                    .unwrap_or(false)
            }
            fallback=|| view! { <div class="access-denied">"Access denied for your role."</div> }
        >
            {children()}
        </Show>
    }
}

/// Component that requires admin privileges
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    view! {
        <RequireRole roles=&[Role::Admin]>
            {children()}
        </RequireRole>
    }
}

/// Component that requires one of the given roles
#[component]
pub fn RequireRole(roles: &'static [Role], children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().role().map(|r| roles.contains(&r)).unwrap_or(false)
            fallback=|| view! { <div class="access-denied">"Access denied for your role."</div> }
        >
            {children()}
        </Show>
    }
}
