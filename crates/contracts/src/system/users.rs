use serde::{Deserialize, Serialize};

use super::auth::{Role, UserInfo};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Role,
    pub department_id: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

impl User {
    pub fn to_user_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreateUserDto {
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Role,
    pub department_id: Option<String>,
}

impl CreateUserDto {
    pub fn validate(&self) -> Result<(), String> {
        let username = self.username.trim();
        if username.len() < 3 {
            return Err("Username must be at least 3 characters".into());
        }
        if username.contains(char::is_whitespace) {
            return Err("Username must not contain spaces".into());
        }
        if let Some(email) = self.email.as_deref() {
            if !email.is_empty() && !email.contains('@') {
                return Err("Invalid email".into());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserDto {
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Role,
    pub department_id: Option<String>,
    pub is_active: bool,
}

impl UpdateUserDto {
    pub fn apply(&self, user: &mut User) {
        user.email = self.email.clone();
        user.full_name = self.full_name.clone();
        user.role = self.role;
        user.department_id = self.department_id.clone();
        user.is_active = self.is_active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_validation() {
        let mut dto = CreateUserDto {
            username: "jd".into(),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
        dto.username = "j doe".into();
        assert!(dto.validate().is_err());
        dto.username = "jdoe".into();
        dto.email = Some("not-an-email".into());
        assert!(dto.validate().is_err());
        dto.email = Some("jdoe@example.com".into());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_update_applies_role() {
        let mut user = User {
            id: "u-1".into(),
            username: "jdoe".into(),
            email: None,
            full_name: None,
            role: Role::Employee,
            department_id: None,
            is_active: true,
            created_at: "2026-01-01T00:00:00Z".into(),
            last_login_at: None,
        };
        UpdateUserDto {
            id: "u-1".into(),
            email: None,
            full_name: Some("Jane".into()),
            role: Role::Manager,
            department_id: Some("d-1".into()),
            is_active: false,
        }
        .apply(&mut user);
        assert_eq!(user.role, Role::Manager);
        assert!(!user.is_active);
        assert_eq!(user.to_user_info().display_name(), "Jane");
    }
}
