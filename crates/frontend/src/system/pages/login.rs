use leptos::prelude::*;

use crate::shared::data_store::use_data_store;
use crate::system::auth::context::{do_login, use_auth};

/// Mock sign-in: pick a known username, no password
#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);

    let (_, set_auth_state) = use_auth();
    let store = use_data_store();

    let login_as = move |name: String| {
        set_error_message.set(None);
        let result = store
            .users
            .with_untracked(|users| do_login(&name, users, set_auth_state));
        if let Err(e) = result {
            log::warn!("Login rejected: {}", e);
            set_error_message.set(Some(e));
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        login_as(username.get_untracked());
    };

    let demo_users = move || {
        store.users.with(|users| {
            users
                .iter()
                .filter(|u| u.is_active)
                .map(|u| (u.username.clone(), u.role.label()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Performance Management"</h1>
                <h2>"Sign in"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"Username"</label>
                        <input
                            type="text"
                            id="username"
                            placeholder="admin"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    <button type="submit" class="btn-primary">"Sign in"</button>
                </form>

                <div class="login-info">
                    <p>"Demo accounts:"</p>
                    <ul>
                        {move || demo_users().into_iter().map(|(name, role)| {
                            let name_for_click = name.clone();
                            view! {
                                <li>
                                    <a href="#" on:click=move |ev| {
                                        ev.prevent_default();
                                        login_as(name_for_click.clone());
                                    }>
                                        <strong>{name}</strong>
                                    </a>
                                    " (" {role} ")"
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                </div>
            </div>
        </div>
    }
}
