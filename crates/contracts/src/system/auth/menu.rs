//! Статическое меню по ролям
//!
//! Ключ пункта совпадает с ключом таба в `layout::tabs::registry` фронтенда.

use super::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

const fn item(key: &'static str, label: &'static str, icon: &'static str) -> MenuItem {
    MenuItem { key, label, icon }
}

pub const DASHBOARD: MenuItem = item("d400_review_summary", "Dashboard", "bar-chart");
pub const GOALS: MenuItem = item("a004_goal", "Goals", "target");
pub const KRAS: MenuItem = item("a001_kra", "Key Result Areas", "list");
pub const TEMPLATES: MenuItem = item("a002_kra_template", "KRA Templates", "layers");
pub const DEPARTMENTS: MenuItem = item("a003_department", "Departments", "building");
pub const REVIEWS: MenuItem = item("a005_review", "Reviews", "file-text");
pub const TRENDS: MenuItem = item("d401_performance_trend", "Trends", "activity");
pub const USERS: MenuItem = item("sys_users", "Users", "users");
pub const SETTINGS: MenuItem = item("sys_settings", "Settings", "settings");

const ADMIN_MENU: &[MenuItem] = &[
    DASHBOARD,
    GOALS,
    KRAS,
    TEMPLATES,
    DEPARTMENTS,
    REVIEWS,
    TRENDS,
    USERS,
    SETTINGS,
];

const MANAGER_MENU: &[MenuItem] = &[DASHBOARD, GOALS, KRAS, TEMPLATES, REVIEWS, TRENDS];

const EMPLOYEE_MENU: &[MenuItem] = &[DASHBOARD, GOALS, REVIEWS];

/// Пункты меню, доступные роли, в порядке отображения
pub fn menu_for_role(role: Role) -> &'static [MenuItem] {
    match role {
        Role::Admin => ADMIN_MENU,
        Role::Manager => MANAGER_MENU,
        Role::Employee => EMPLOYEE_MENU,
    }
}

/// Заголовок раздела по ключу меню
pub fn label_for_key(key: &str) -> Option<&'static str> {
    ADMIN_MENU.iter().find(|m| m.key == key).map(|m| m.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(role: Role) -> Vec<&'static str> {
        menu_for_role(role).iter().map(|m| m.key).collect()
    }

    #[test]
    fn test_admin_sees_everything() {
        assert_eq!(menu_for_role(Role::Admin).len(), 9);
        assert!(Role::Admin.can_access("sys_settings"));
        assert!(Role::Admin.can_access("sys_users"));
    }

    #[test]
    fn test_manager_menu() {
        assert_eq!(
            keys(Role::Manager),
            vec![
                "d400_review_summary",
                "a004_goal",
                "a001_kra",
                "a002_kra_template",
                "a005_review",
                "d401_performance_trend",
            ]
        );
        assert!(!Role::Manager.can_access("sys_users"));
    }

    #[test]
    fn test_employee_menu() {
        assert_eq!(
            keys(Role::Employee),
            vec!["d400_review_summary", "a004_goal", "a005_review"]
        );
        assert!(!Role::Employee.can_access("a002_kra_template"));
    }

    #[test]
    fn test_every_role_menu_is_subset_of_admin() {
        for role in Role::ALL {
            for item in menu_for_role(role) {
                assert!(Role::Admin.can_access(item.key));
            }
        }
    }

    #[test]
    fn test_label_for_key() {
        assert_eq!(label_for_key("a004_goal"), Some("Goals"));
        assert_eq!(label_for_key("unknown"), None);
    }
}
