use contracts::domain::a001_kra::Kra;
use contracts::domain::a003_department::Department;
use contracts::system::users::User;
use contracts::domain::common::{AggregateId, AggregateRoot};
use leptos::prelude::*;
use thaw::*;

use crate::shared::data_store::use_data_store;
use crate::shared::list_utils::{
    any_field_contains, cmp_ignore_case, filter_list, sort_list, SearchInput, Searchable, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

impl Searchable for Department {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_contains(
            [self.base.code.as_str(), self.base.description.as_str()],
            filter,
        )
    }
}

impl Sortable for Department {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "description" => cmp_ignore_case(&self.base.description, &other.base.description),
            _ => cmp_ignore_case(&self.base.code, &other.base.code),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DepartmentRow {
    pub id: String,
    pub code: String,
    pub name: String,
    pub head: String,
    pub kra_count: usize,
    pub member_count: usize,
    pub is_active: bool,
}

impl DepartmentRow {
    pub fn build(department: &Department, kras: &[Kra], users: &[User]) -> Self {
        let id = department.base.id;
        let id_str = id.as_string();
        let head = department
            .head_user_id
            .as_deref()
            .map(|head_id| crate::shared::data_store::user_name(users, head_id))
            .unwrap_or_else(|| "-".to_string());
        Self {
            id: id_str.clone(),
            code: department.base.code.clone(),
            name: department.base.description.clone(),
            head,
            kra_count: kras.iter().filter(|k| k.department_id == Some(id)).count(),
            member_count: users
                .iter()
                .filter(|u| u.is_active && u.department_id.as_deref() == Some(id_str.as_str()))
                .count(),
            is_active: department.is_active,
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn DepartmentList() -> impl IntoView {
    let store = use_data_store();
    let search = RwSignal::new(String::new());

    let rows = Memo::new(move |_| {
        let mut departments = filter_list(store.departments.get(), &search.get());
        sort_list(&mut departments, "code", true);
        let kras = store.kras.get();
        let users = store.users.get();
        departments
            .iter()
            .map(|d| DepartmentRow::build(d, &kras, &users))
            .collect::<Vec<_>>()
    });

    view! {
        <PageFrame page_id="a003_department--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Department::list_name()}</h1>
                    <Badge>{move || rows.with(|r| r.len().to_string())}</Badge>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |q: String| search.set(q))
                        placeholder="Code or name..."
                    />
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Code"</TableHeaderCell>
                                <TableHeaderCell>"Name"</TableHeaderCell>
                                <TableHeaderCell>"Head"</TableHeaderCell>
                                <TableHeaderCell>"KRA"</TableHeaderCell>
                                <TableHeaderCell>"Members"</TableHeaderCell>
                                <TableHeaderCell>"Status"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || rows.get()
                                key=|row| row.id.clone()
                                children=move |row: DepartmentRow| view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout>{row.code}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{row.name}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{row.head}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{row.kra_count}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{row.member_count}</TableCellLayout></TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {if row.is_active {
                                                    view! { <span class="badge badge--success">"Active"</span> }.into_any()
                                                } else {
                                                    view! { <span class="badge badge--error">"Closed"</span> }.into_any()
                                                }}
                                            </TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::mock_data;

    #[test]
    fn test_department_row_counts() {
        let departments = mock_data::departments();
        let kras = mock_data::kras();
        let users = mock_data::users();

        let sales = departments.iter().find(|d| d.base.code == "SAL").unwrap();
        let row = DepartmentRow::build(sales, &kras, &users);
        assert_eq!(row.head, "Tom Chen");
        assert_eq!(row.kra_count, 2);
        // деактивированный пользователь не считается
        assert_eq!(row.member_count, 2);
    }
}
