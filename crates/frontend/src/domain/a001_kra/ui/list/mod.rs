use contracts::domain::a001_kra::{Kra, KraCategory};
use contracts::domain::a003_department::DepartmentId;
use contracts::domain::common::{AggregateId, AggregateRoot};
use leptos::prelude::*;
use thaw::*;

use crate::shared::data_store::use_data_store;
use crate::shared::list_utils::{
    any_field_contains, cmp_ignore_case, filter_list, get_sort_indicator, sort_list, SearchInput,
    Searchable, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

impl Searchable for Kra {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_contains(
            [
                self.base.code.as_str(),
                self.base.description.as_str(),
                self.base.comment.as_deref().unwrap_or(""),
                self.category.label(),
            ],
            filter,
        )
    }
}

impl Sortable for Kra {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "description" => cmp_ignore_case(&self.base.description, &other.base.description),
            "category" => self.category.label().cmp(other.category.label()),
            "default_weight" => self.default_weight.cmp(&other.default_weight),
            _ => cmp_ignore_case(&self.base.code, &other.base.code),
        }
    }
}

/// Фильтр по подразделению для списков KRA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepartmentFilter {
    #[default]
    All,
    /// KRA без подразделения (общие для компании)
    CompanyWide,
    Department(DepartmentId),
}

impl DepartmentFilter {
    /// Значение `<select>`: "" | "company" | uuid
    pub fn from_key(key: &str) -> Self {
        match key {
            "" => Self::All,
            "company" => Self::CompanyWide,
            other => DepartmentId::from_string(other)
                .map(Self::Department)
                .unwrap_or_default(),
        }
    }

    pub fn matches(&self, department_id: Option<DepartmentId>) -> bool {
        match self {
            Self::All => true,
            Self::CompanyWide => department_id.is_none(),
            Self::Department(id) => department_id == Some(*id),
        }
    }
}

pub fn filter_kras(kras: Vec<Kra>, search: &str, department: DepartmentFilter) -> Vec<Kra> {
    filter_list(kras, search)
        .into_iter()
        .filter(|k| department.matches(k.department_id))
        .collect()
}

#[component]
#[allow(non_snake_case)]
pub fn KraList() -> impl IntoView {
    let store = use_data_store();
    let search = RwSignal::new(String::new());
    let department = RwSignal::new(DepartmentFilter::All);
    let sort_field = RwSignal::new("code".to_string());
    let sort_ascending = RwSignal::new(true);

    let rows = Memo::new(move |_| {
        let mut rows = filter_kras(store.kras.get(), &search.get(), department.get());
        sort_list(&mut rows, &sort_field.get(), sort_ascending.get());
        rows
    });

    let toggle_sort = move |field: &'static str| {
        if sort_field.get_untracked() == field {
            sort_ascending.update(|asc| *asc = !*asc);
        } else {
            sort_field.set(field.to_string());
            sort_ascending.set(true);
        }
    };

    let sort_header = move |field: &'static str, title: &'static str| {
        view! {
            <TableHeaderCell>
                <div class="table__sortable-header" style="cursor:pointer;" on:click=move |_| toggle_sort(field)>
                    {title}
                    <span>{move || get_sort_indicator(&sort_field.get(), field, sort_ascending.get())}</span>
                </div>
            </TableHeaderCell>
        }
    };

    view! {
        <PageFrame page_id="a001_kra--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Kra::list_name()}</h1>
                    <Badge>{move || rows.with(|r| r.len().to_string())}</Badge>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <SearchInput
                            value=search
                            on_change=Callback::new(move |q: String| search.set(q))
                            placeholder="Code, title or category..."
                        />
                        <DepartmentFilterSelect filter=department />
                    </Flex>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {sort_header("code", "Code")}
                                {sort_header("description", "Title")}
                                {sort_header("category", "Category")}
                                <TableHeaderCell>"Department"</TableHeaderCell>
                                {sort_header("default_weight", "Default weight")}
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || rows.get()
                                key=|k| k.to_string_id()
                                children=move |kra: Kra| {
                                    let department = store.department_name(kra.department_id);
                                    view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout>{kra.base.code.clone()}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{kra.base.description.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class="badge badge--neutral">{kra.category.label()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout>{department}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format!("{}%", kra.default_weight)}</TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>
        </PageFrame>
    }
}

/// `<select>` подразделений: все, общие для компании, конкретное
#[component]
pub fn DepartmentFilterSelect(filter: RwSignal<DepartmentFilter>) -> impl IntoView {
    let store = use_data_store();

    view! {
        <select
            class="filter-panel__select"
            on:change=move |ev| filter.set(DepartmentFilter::from_key(&event_target_value(&ev)))
        >
            <option value="">"All departments"</option>
            <option value="company">"Company-wide"</option>
            {move || store.departments.get().into_iter().map(|d| {
                view! { <option value=d.to_string_id()>{d.base.description.clone()}</option> }
            }).collect_view()}
        </select>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::mock_data::{self, dept_id, DEPT_SALES};

    fn codes(kras: &[Kra]) -> Vec<&str> {
        kras.iter().map(|k| k.base.code.as_str()).collect()
    }

    #[test]
    fn test_filtered_rows_compare_by_value() {
        let kras = mock_data::kras();
        let first = filter_kras(kras.clone(), "", DepartmentFilter::All);
        assert_eq!(first, filter_kras(kras.clone(), "", DepartmentFilter::All));
        assert_ne!(first, filter_kras(kras, "", DepartmentFilter::CompanyWide));
    }

    #[test]
    fn test_department_filter() {
        let sales = dept_id(DEPT_SALES);
        let rows = filter_kras(mock_data::kras(), "", DepartmentFilter::Department(sales));
        assert_eq!(codes(&rows), vec!["KRA-005", "KRA-006"]);

        let rows = filter_kras(mock_data::kras(), "", DepartmentFilter::CompanyWide);
        assert_eq!(codes(&rows), vec!["KRA-004", "KRA-007", "KRA-008"]);
    }

    #[test]
    fn test_search_matches_category_label() {
        let rows = filter_kras(mock_data::kras(), "customer", DepartmentFilter::All);
        assert_eq!(codes(&rows), vec!["KRA-007"]);
    }

    #[test]
    fn test_department_filter_from_key() {
        assert_eq!(DepartmentFilter::from_key(""), DepartmentFilter::All);
        assert_eq!(DepartmentFilter::from_key("company"), DepartmentFilter::CompanyWide);
        assert_eq!(DepartmentFilter::from_key("garbage"), DepartmentFilter::All);
        let id = dept_id(DEPT_SALES);
        assert_eq!(
            DepartmentFilter::from_key(&id.as_string()),
            DepartmentFilter::Department(id)
        );
    }

    #[test]
    fn test_sort_by_default_weight() {
        let mut rows = mock_data::kras();
        sort_list(&mut rows, "default_weight", false);
        assert_eq!(rows[0].base.code, "KRA-005");
    }
}
