use contracts::system::auth::{Role, SessionData, UserInfo};
use contracts::system::users::User;
use leptos::prelude::*;

use super::storage;

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub session: Option<SessionData>,
}

impl AuthState {
    pub fn user(&self) -> Option<&UserInfo> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    // Restore session from localStorage before the first render
    let restored = storage::load_session();
    if let Some(session) = &restored {
        log::info!("Session restored for '{}'", session.user.username);
    }
    let (auth_state, set_auth_state) = signal(AuthState { session: restored });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Find an active user by username (case-insensitive).
///
/// Mock login: there is no password check.
pub fn find_login_user<'a>(username: &str, users: &'a [User]) -> Result<&'a User, String> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Enter a username".to_string());
    }
    let user = users
        .iter()
        .find(|u| u.username.eq_ignore_ascii_case(username))
        .ok_or_else(|| format!("User '{}' not found", username))?;
    if !user.is_active {
        return Err(format!("User '{}' is deactivated", user.username));
    }
    Ok(user)
}

/// Helper: Perform login against the in-memory user list
pub fn do_login(
    username: &str,
    users: &[User],
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), String> {
    let user = find_login_user(username, users)?;
    let session = SessionData::new(user.to_user_info());

    storage::save_session(&session);
    log::info!("User '{}' logged in as {}", user.username, user.role.as_str());

    set_auth_state.set(AuthState {
        session: Some(session),
    });
    Ok(())
}

/// Helper: Perform logout
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_session();
    set_auth_state.set(AuthState::default());
    log::info!("User logged out");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, active: bool) -> User {
        User {
            id: format!("u-{username}"),
            username: username.to_string(),
            email: None,
            full_name: None,
            role: Role::Employee,
            department_id: None,
            is_active: active,
            created_at: "2026-01-01T00:00:00Z".into(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_find_login_user() {
        let users = vec![user("alice", true), user("bob", false)];
        assert_eq!(find_login_user("ALICE", &users).unwrap().username, "alice");
        assert!(find_login_user("bob", &users).is_err());
        assert!(find_login_user("carol", &users).is_err());
        assert!(find_login_user("  ", &users).is_err());
    }

    #[test]
    fn test_auth_state_role() {
        let state = AuthState::default();
        assert_eq!(state.role(), None);
        let state = AuthState {
            session: Some(SessionData::new(user("alice", true).to_user_info())),
        };
        assert_eq!(state.role(), Some(Role::Employee));
    }
}
