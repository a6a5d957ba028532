use contracts::domain::a002_kra_template::KraTemplate;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{tab_label_for_key, TEMPLATE_BUILDER_KEY};
use crate::shared::data_store::use_data_store;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    any_field_contains, cmp_ignore_case, filter_list, get_sort_indicator, sort_list, SearchInput,
    Searchable, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

impl Searchable for KraTemplate {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_contains(
            [self.base.code.as_str(), self.base.description.as_str()],
            filter,
        )
    }
}

impl Sortable for KraTemplate {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "description" => cmp_ignore_case(&self.base.description, &other.base.description),
            "items" => self.items.len().cmp(&other.items.len()),
            "created_at" => self
                .base
                .metadata
                .created_at
                .cmp(&other.base.metadata.created_at),
            _ => cmp_ignore_case(&self.base.code, &other.base.code),
        }
    }
}

/// Состав шаблона одной строкой: "KRA-001 30%, KRA-002 30%"
fn composition(template: &KraTemplate, kra_code: impl Fn(&str) -> String) -> String {
    template
        .items
        .iter()
        .map(|item| format!("{} {}%", kra_code(&item.kra_id), item.weight))
        .collect::<Vec<_>>()
        .join(", ")
}

#[component]
#[allow(non_snake_case)]
pub fn KraTemplateList() -> impl IntoView {
    let store = use_data_store();
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let search = RwSignal::new(String::new());
    let sort_field = RwSignal::new("code".to_string());
    let sort_ascending = RwSignal::new(true);

    let rows = Memo::new(move |_| {
        let mut rows = filter_list(store.templates.get(), &search.get());
        sort_list(&mut rows, &sort_field.get(), sort_ascending.get());
        rows
    });

    let open_builder = move |_| {
        tabs_store.open_tab(TEMPLATE_BUILDER_KEY, tab_label_for_key(TEMPLATE_BUILDER_KEY));
    };

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
        <PageFrame page_id="a002_kra_template--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{KraTemplate::list_name()}</h1>
                    <Badge>{move || rows.with(|r| r.len().to_string())}</Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=open_builder>
                        {icon("plus")}
                        " New template"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |q: String| search.set(q))
                        placeholder="Code or title..."
                    />
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {sort_header("code", "Code")}
                                {sort_header("description", "Title")}
                                <TableHeaderCell>"Department"</TableHeaderCell>
                                {sort_header("items", "KRA")}
                                <TableHeaderCell>"Weights"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || rows.get()
                                key=|t| t.to_string_id()
                                children=move |template: KraTemplate| {
                                    let department = store.department_name(template.department_id);
                                    let weights = store.kras.with_untracked(|kras| {
                                        composition(&template, |id| {
                                            kras.iter()
                                                .find(|k| k.to_string_id() == id)
                                                .map(|k| k.base.code.clone())
                                                .unwrap_or_else(|| id.to_string())
                                        })
                                    });
                                    view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout>{template.base.code.clone()}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{template.base.description.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout>{department}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{template.items.len()}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{weights}</TableCellLayout>
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::mock_data;

    #[test]
    fn test_composition_keeps_selection_order() {
        let templates = mock_data::templates();
        let kras = mock_data::kras();
        let sales = templates
            .iter()
            .find(|t| t.base.code == "TPL-SAL-AE")
            .unwrap();
        let text = composition(sales, |id| {
            kras.iter()
                .find(|k| k.to_string_id() == id)
                .map(|k| k.base.code.clone())
                .unwrap()
        });
        assert_eq!(text, "KRA-005 50%, KRA-006 30%, KRA-007 20%");
    }

    #[test]
    fn test_search_and_sort() {
        let rows = filter_list(mock_data::templates(), "account");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].base.code, "TPL-SAL-AE");

        let mut rows = mock_data::templates();
        sort_list(&mut rows, "items", false);
        assert_eq!(rows[0].base.code, "TPL-ENG-IC");
    }
}
