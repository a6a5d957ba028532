//! In-memory data layer of the console
//!
//! Every collection is a signal seeded from `mock_data`; pages read and
//! mutate it through context, nothing is persisted.

use contracts::domain::a001_kra::Kra;
use contracts::domain::a002_kra_template::KraTemplate;
use contracts::domain::a003_department::{Department, DepartmentId};
use contracts::domain::a004_goal::Goal;
use contracts::domain::a005_review::Review;
use contracts::system::auth::{Role, UserInfo};
use contracts::system::users::User;
use leptos::prelude::*;

use super::mock_data;

#[derive(Clone, Copy)]
pub struct PmsDataStore {
    pub departments: RwSignal<Vec<Department>>,
    pub users: RwSignal<Vec<User>>,
    pub kras: RwSignal<Vec<Kra>>,
    pub templates: RwSignal<Vec<KraTemplate>>,
    pub goals: RwSignal<Vec<Goal>>,
    pub reviews: RwSignal<Vec<Review>>,
}

impl PmsDataStore {
    pub fn seeded() -> Self {
        Self {
            departments: RwSignal::new(mock_data::departments()),
            users: RwSignal::new(mock_data::users()),
            kras: RwSignal::new(mock_data::kras()),
            templates: RwSignal::new(mock_data::templates()),
            goals: RwSignal::new(mock_data::goals()),
            reviews: RwSignal::new(mock_data::reviews()),
        }
    }

    pub fn add_template(&self, template: KraTemplate) {
        log::info!(
            "Template '{}' stored ({} KRA)",
            template.base.code,
            template.items.len()
        );
        self.templates.update(|list| list.push(template));
    }

    pub fn department_name(&self, id: Option<DepartmentId>) -> String {
        self.departments.with(|list| department_name(list, id))
    }

    pub fn user_name(&self, id: &str) -> String {
        self.users.with(|list| user_name(list, id))
    }

    pub fn kra_title(&self, id: &str) -> String {
        self.kras.with(|list| kra_title(list, id))
    }
}

pub fn use_data_store() -> PmsDataStore {
    use_context::<PmsDataStore>().expect("PmsDataStore not found in component tree")
}

/// Название подразделения; пустой id: "All departments"
pub fn department_name(departments: &[Department], id: Option<DepartmentId>) -> String {
    match id {
        None => "All departments".to_string(),
        Some(id) => departments
            .iter()
            .find(|d| d.base.id == id)
            .map(|d| d.base.description.clone())
            .unwrap_or_else(|| "Unknown department".to_string()),
    }
}

pub fn user_name(users: &[User], id: &str) -> String {
    users
        .iter()
        .find(|u| u.id == id)
        .map(|u| u.full_name.clone().unwrap_or_else(|| u.username.clone()))
        .unwrap_or_else(|| id.to_string())
}

pub fn kra_title(kras: &[Kra], id: &str) -> String {
    kras.iter()
        .find(|k| k.to_string_id() == id)
        .map(|k| format!("{} {}", k.base.code, k.base.description))
        .unwrap_or_else(|| id.to_string())
}

/// Чьи записи видит пользователь: админ все, руководитель своё подразделение,
/// сотрудник только свои
pub fn can_see_owner(viewer: &UserInfo, owner_id: &str, users: &[User]) -> bool {
    match viewer.role {
        Role::Admin => true,
        Role::Employee => viewer.id == owner_id,
        Role::Manager => {
            if viewer.id == owner_id {
                return true;
            }
            let department_of = |id: &str| {
                users
                    .iter()
                    .find(|u| u.id == id)
                    .and_then(|u| u.department_id.clone())
            };
            match department_of(&viewer.id) {
                Some(own) => department_of(owner_id).as_deref() == Some(own.as_str()),
                None => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups() {
        let departments = mock_data::departments();
        let users = mock_data::users();
        let kras = mock_data::kras();

        assert_eq!(department_name(&departments, None), "All departments");
        assert_eq!(
            department_name(&departments, Some(departments[1].base.id)),
            "Sales"
        );
        assert_eq!(user_name(&users, "u-manager"), "Maria Garcia");
        assert_eq!(user_name(&users, "u-ghost"), "u-ghost");
        assert_eq!(
            kra_title(&kras, &kras[0].to_string_id()),
            "KRA-001 Delivery predictability"
        );
    }

    #[test]
    fn test_can_see_owner() {
        let users = mock_data::users();
        let info = |id: &str| {
            users
                .iter()
                .find(|u| u.id == id)
                .map(|u| u.to_user_info())
                .unwrap()
        };

        let admin = info("u-admin");
        let manager = info("u-manager");
        let employee = info("u-dev-1");

        assert!(can_see_owner(&admin, "u-sales-1", &users));
        assert!(can_see_owner(&manager, "u-dev-2", &users));
        assert!(!can_see_owner(&manager, "u-sales-1", &users));
        assert!(can_see_owner(&employee, "u-dev-1", &users));
        assert!(!can_see_owner(&employee, "u-dev-2", &users));
    }
}
