mod state;

use chrono::Utc;
use contracts::system::auth::Role;
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};
use leptos::prelude::*;
use thaw::*;

use crate::shared::data_store::use_data_store;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    any_field_contains, cmp_ignore_case, get_sort_indicator, SearchInput, Searchable, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::auth::guard::RequireAdmin;
use state::{create_state, UsersListState};

impl Searchable for User {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_contains(
            [
                self.username.as_str(),
                self.full_name.as_deref().unwrap_or(""),
                self.email.as_deref().unwrap_or(""),
            ],
            filter,
        )
    }
}

impl Sortable for User {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "full_name" => cmp_ignore_case(
                self.full_name.as_deref().unwrap_or(""),
                other.full_name.as_deref().unwrap_or(""),
            ),
            "email" => cmp_ignore_case(
                self.email.as_deref().unwrap_or(""),
                other.email.as_deref().unwrap_or(""),
            ),
            "role" => self.role.label().cmp(other.role.label()),
            "is_active" => self.is_active.cmp(&other.is_active),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => cmp_ignore_case(&self.username, &other.username),
        }
    }
}

/// Новый пользователь из формы создания
fn user_from_dto(dto: &CreateUserDto, existing: &[User]) -> Result<User, String> {
    dto.validate()?;
    let username = dto.username.trim().to_string();
    if existing
        .iter()
        .any(|u| u.username.eq_ignore_ascii_case(&username))
    {
        return Err(format!("User '{}' already exists", username));
    }
    Ok(User {
        id: format!("u-{}", username.to_lowercase()),
        username,
        email: dto.email.clone().filter(|e| !e.trim().is_empty()),
        full_name: dto.full_name.clone().filter(|n| !n.trim().is_empty()),
        role: dto.role,
        department_id: dto.department_id.clone(),
        is_active: true,
        created_at: Utc::now().to_rfc3339(),
        last_login_at: None,
    })
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[component]
pub fn UsersListPage() -> impl IntoView {
    view! {
        <RequireAdmin>
            <UsersList />
        </RequireAdmin>
    }
}

#[component]
fn UsersList() -> impl IntoView {
    let store = use_data_store();
    let state = create_state();
    let show_create_form = RwSignal::new(false);
    let editing_user: RwSignal<Option<User>> = RwSignal::new(None);

    let rows = Memo::new(move |_| {
        let users = store.users.get();
        state.with(|s| s.apply(users))
    });

    let sort_header = move |field: &'static str, title: &'static str| {
        view! {
            <TableHeaderCell>
                <div
                    class="table__sortable-header"
                    style="cursor:pointer;"
                    on:click=move |_| state.update(|s| s.toggle_sort(field))
                >
                    {title}
                    <span>
                        {move || state.with(|s| get_sort_indicator(&s.sort_field, field, s.sort_ascending))}
                    </span>
                </div>
            </TableHeaderCell>
        }
    };

    view! {
        <PageFrame page_id="sys_users--list" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Users"</h1>
                    <Badge>{move || rows.with(|r| r.len().to_string())}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| show_create_form.set(true)
                    >
                        {icon("plus")}
                        " New"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <SearchInput
                            value=Signal::derive(move || state.with(|s| s.search_query.clone()))
                            on_change=Callback::new(move |q: String| state.update(|s| s.search_query = q))
                            placeholder="Username, name or email..."
                        />
                        <select
                            class="filter-panel__select"
                            on:change=move |ev| {
                                let role = Role::from_key(&event_target_value(&ev));
                                state.update(|s: &mut UsersListState| s.role_filter = role);
                            }
                        >
                            <option value="">"All roles"</option>
                            {Role::ALL.iter().map(|role| view! {
                                <option value=role.as_str()>{role.label()}</option>
                            }).collect_view()}
                        </select>
                    </Flex>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {sort_header("username", "Username")}
                                {sort_header("full_name", "Full name")}
                                {sort_header("email", "Email")}
                                {sort_header("role", "Role")}
                                {sort_header("is_active", "Status")}
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || rows.get()
                                key=|u| (u.id.clone(), u.role, u.is_active, u.full_name.clone(), u.email.clone())
                                children=move |user| {
                                    let user_for_edit = user.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{user.username.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {user.full_name.clone().unwrap_or_default()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {user.email.clone().unwrap_or_default()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class="badge badge--neutral">{user.role.label()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if user.is_active {
                                                        view! { <span class="badge badge--success">"Active"</span> }.into_any()
                                                    } else {
                                                        view! { <span class="badge badge--error">"Inactive"</span> }.into_any()
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| editing_user.set(Some(user_for_edit.clone()))
                                                    attr:title="Edit"
                                                >
                                                    {icon("settings")}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                <Show when=move || show_create_form.get()>
                    <CreateUserForm on_close=move || show_create_form.set(false) />
                </Show>

                {move || editing_user.get().map(|user| view! {
                    <EditUserForm user=user on_close=move || editing_user.set(None) />
                })}
            </div>
        </PageFrame>
    }
}

#[component]
fn CreateUserForm<F>(on_close: F) -> impl IntoView
where
    F: Fn() + 'static + Copy + Send + Sync,
{
    let store = use_data_store();
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Employee);
    let (error, set_error) = signal::<Option<String>>(None);

    let on_save = move |_| {
        let dto = CreateUserDto {
            username: username.get_untracked(),
            email: non_empty(email.get_untracked()),
            full_name: non_empty(full_name.get_untracked()),
            role: role.get_untracked(),
            department_id: None,
        };
        match store.users.with_untracked(|users| user_from_dto(&dto, users)) {
            Ok(user) => {
                log::info!("User '{}' created", user.username);
                store.users.update(|users| users.push(user));
                on_close();
            }
            Err(e) => set_error.set(Some(e)),
        }
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">"New user"</h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close()>
                        {icon("x")}
                    </Button>
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    <div class="form__group">
                        <Label>"Username"</Label>
                        <Input value=username />
                    </div>
                    <div class="form__group">
                        <Label>"Full name"</Label>
                        <Input value=full_name />
                    </div>
                    <div class="form__group">
                        <Label>"Email"</Label>
                        <Input value=email input_type=InputType::Email />
                    </div>
                    <div class="form__group">
                        <Label>"Role"</Label>
                        <RoleSelect role=role />
                    </div>
                </div>

                <div class="modal-footer">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close()>
                        "Cancel"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=on_save>
                        "Create"
                    </Button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn EditUserForm<F>(user: User, on_close: F) -> impl IntoView
where
    F: Fn() + 'static + Copy + Send + Sync,
{
    let store = use_data_store();
    let email = RwSignal::new(user.email.clone().unwrap_or_default());
    let full_name = RwSignal::new(user.full_name.clone().unwrap_or_default());
    let role = RwSignal::new(user.role);
    let is_active = RwSignal::new(user.is_active);

    let username_display = user.username.clone();
    let department_id = user.department_id.clone();
    let user_id = user.id.clone();

    let on_save = move |_| {
        let dto = UpdateUserDto {
            id: user_id.clone(),
            email: non_empty(email.get_untracked()),
            full_name: non_empty(full_name.get_untracked()),
            role: role.get_untracked(),
            department_id: department_id.clone(),
            is_active: is_active.get_untracked(),
        };
        store.users.update(|users| {
            if let Some(u) = users.iter_mut().find(|u| u.id == dto.id) {
                dto.apply(u);
                log::info!("User '{}' updated", u.username);
            }
        });
        on_close();
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{format!("Edit: {}", username_display)}</h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close()>
                        {icon("x")}
                    </Button>
                </div>

                <div class="modal-body">
                    <div class="form__group">
                        <Label>"Email"</Label>
                        <Input value=email input_type=InputType::Email />
                    </div>
                    <div class="form__group">
                        <Label>"Full name"</Label>
                        <Input value=full_name />
                    </div>
                    <div class="form__group">
                        <Label>"Role"</Label>
                        <RoleSelect role=role />
                    </div>
                    <div class="form__group">
                        <Checkbox checked=is_active label="Active" />
                    </div>
                </div>

                <div class="modal-footer">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close()>
                        "Cancel"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=on_save>
                        "Save"
                    </Button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn RoleSelect(role: RwSignal<Role>) -> impl IntoView {
    view! {
        <select
            class="form__select"
            on:change=move |ev| {
                if let Some(r) = Role::from_key(&event_target_value(&ev)) {
                    role.set(r);
                }
            }
        >
            {Role::ALL.iter().map(|r| {
                let r = *r;
                view! {
                    <option value=r.as_str() selected=move || role.get() == r>{r.label()}</option>
                }
            }).collect_view()}
        </select>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::mock_data;

    #[test]
    fn test_search_and_role_filter() {
        let users = mock_data::users();

        let mut state = UsersListState::default();
        state.search_query = "garcia".into();
        let rows = state.apply(users.clone());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].username, "mgarcia");

        // короче трёх символов фильтр не применяется
        state.search_query = "mg".into();
        assert_eq!(state.apply(users.clone()).len(), users.len());

        state.search_query.clear();
        state.role_filter = Some(Role::Manager);
        let managers: Vec<_> = state.apply(users).into_iter().map(|u| u.username).collect();
        assert_eq!(managers, vec!["mgarcia", "tchen"]);
    }

    #[test]
    fn test_toggle_sort() {
        let mut state = UsersListState::default();
        state.toggle_sort("username");
        assert!(!state.sort_ascending);
        state.toggle_sort("role");
        assert_eq!(state.sort_field, "role");
        assert!(state.sort_ascending);
    }

    #[test]
    fn test_user_from_dto() {
        let users = mock_data::users();
        let dto = CreateUserDto {
            username: "newbie".into(),
            email: Some(String::new()),
            full_name: Some("New Person".into()),
            role: Role::Employee,
            department_id: None,
        };
        let user = user_from_dto(&dto, &users).unwrap();
        assert_eq!(user.id, "u-newbie");
        assert_eq!(user.email, None);
        assert!(user.is_active);

        let duplicate = CreateUserDto {
            username: "ADMIN".into(),
            ..dto
        };
        assert!(user_from_dto(&duplicate, &users).is_err());
    }
}
