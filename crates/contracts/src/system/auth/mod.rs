pub mod menu;

pub use menu::{menu_for_role, MenuItem};

use serde::{Deserialize, Serialize};

/// Роль пользователя; определяет доступные разделы меню
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Employee,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Employee];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Manager => "Manager",
            Role::Employee => "Employee",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Employee => "employee",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }

    /// Есть ли раздел `menu_key` в меню роли
    pub fn can_access(&self, menu_key: &str) -> bool {
        menu_for_role(*self).iter().any(|item| item.key == menu_key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
}

impl UserInfo {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

/// Сессия, которую фронтенд хранит в localStorage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub user: UserInfo,
    pub issued_at: chrono::DateTime<chrono::Utc>,
}

impl SessionData {
    pub fn new(user: UserInfo) -> Self {
        Self {
            user,
            issued_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> UserInfo {
        UserInfo {
            id: "u-1".into(),
            username: "jdoe".into(),
            full_name: None,
            email: None,
            role,
        }
    }

    #[test]
    fn test_role_keys_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_key(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_key("root"), None);
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut u = user(Role::Employee);
        assert_eq!(u.display_name(), "jdoe");
        u.full_name = Some("Jane Doe".into());
        assert_eq!(u.display_name(), "Jane Doe");
    }

    #[test]
    fn test_session_json_round_trip() {
        let session = SessionData::new(user(Role::Manager));
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"role\":\"manager\""));
        let restored: SessionData = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
