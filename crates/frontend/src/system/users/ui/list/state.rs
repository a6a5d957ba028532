use contracts::system::auth::Role;
use contracts::system::users::User;
use leptos::prelude::*;

use crate::shared::list_utils::{filter_list, sort_list};

#[derive(Clone, Debug)]
pub struct UsersListState {
    pub search_query: String,
    pub role_filter: Option<Role>,
    pub sort_field: String,
    pub sort_ascending: bool,
}

impl Default for UsersListState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            role_filter: None,
            sort_field: "username".to_string(),
            sort_ascending: true,
        }
    }
}

impl UsersListState {
    /// Поиск, фильтр по роли и сортировка
    pub fn apply(&self, users: Vec<User>) -> Vec<User> {
        let mut rows: Vec<User> = filter_list(users, &self.search_query)
            .into_iter()
            .filter(|u| self.role_filter.map_or(true, |role| u.role == role))
            .collect();
        sort_list(&mut rows, &self.sort_field, self.sort_ascending);
        rows
    }

    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_field = field.to_string();
            self.sort_ascending = true;
        }
    }
}

pub fn create_state() -> RwSignal<UsersListState> {
    RwSignal::new(UsersListState::default())
}
