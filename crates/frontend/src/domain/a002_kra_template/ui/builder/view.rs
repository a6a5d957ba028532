use super::view_model::KraTemplateBuilderViewModel;
use crate::shared::data_store::use_data_store;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::system::settings::use_settings;
use contracts::domain::a001_kra::Kra;
use contracts::domain::a003_department::DepartmentId;
use contracts::domain::a002_kra_template::KraTemplate;
use contracts::domain::common::{AggregateId, AggregateRoot};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn KraTemplateBuilder(on_close: Callback<()>) -> impl IntoView {
    let store = use_data_store();
    let settings = use_settings();
    let vm = KraTemplateBuilderViewModel::new(store);

    let weight_min = move || settings.settings.with(|s| s.weight_input_min.to_string());
    let weight_max = move || settings.settings.with(|s| s.weight_input_max.to_string());

    let total_label = move || {
        let total = vm.total_weight();
        let remaining = vm.allocation.with(|a| a.remaining());
        if remaining == 0 {
            format!("Total: {}%", total)
        } else if remaining > 0 {
            format!("Total: {}% ({}% remaining)", total, remaining)
        } else {
            format!("Total: {}% ({}% over)", total, -remaining)
        }
    };

    let on_save = move |_| {
        if vm.save_command() {
            on_close.run(());
        }
    };

    let on_cancel = move |_| {
        vm.cancel_command();
        on_close.run(());
    };

    view! {
        <PageFrame page_id="a002_kra_template--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{format!("New {}", KraTemplate::element_name())}</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_save
                        disabled=Signal::derive(move || !vm.is_balanced())
                    >
                        {icon("save")}
                        " Save"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=on_cancel>
                        {icon("x")}
                        " Cancel"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || vm.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="details-form">
                    <div class="form-group">
                        <label for="tpl-code">"Code"</label>
                        <input
                            type="text"
                            id="tpl-code"
                            placeholder="TPL-ENG-SR"
                            prop:value=move || vm.form.with(|f| f.code.clone())
                            on:input=move |ev| vm.form.update(|f| f.code = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="tpl-title">"Title"</label>
                        <input
                            type="text"
                            id="tpl-title"
                            placeholder="Senior engineer"
                            prop:value=move || vm.form.with(|f| f.description.clone())
                            on:input=move |ev| vm.form.update(|f| f.description = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="tpl-department">"Department"</label>
                        <select
                            id="tpl-department"
                            on:change=move |ev| {
                                let department_id = DepartmentId::from_string(&event_target_value(&ev)).ok();
                                vm.form.update(|f| f.department_id = department_id);
                            }
                        >
                            <option value="">"All departments"</option>
                            {move || store.departments.get().into_iter().map(|d| {
                                let id = d.base.id;
                                view! {
                                    <option
                                        value=id.as_string()
                                        selected=move || vm.form.with(|f| f.department_id == Some(id))
                                    >
                                        {d.base.description.clone()}
                                    </option>
                                }
                            }).collect_view()}
                        </select>
                    </div>
                </div>

                <div class="template-builder">
                    <div class="template-builder__catalogue">
                        <h3>"KRA catalogue"</h3>
                        <SearchInput
                            value=vm.search
                            on_change=Callback::new(move |q: String| vm.search.set(q))
                        />
                        <ul class="template-builder__list">
                            <For
                                each=move || vm.catalogue()
                                key=|k| k.to_string_id()
                                children=move |kra: Kra| {
                                    let id = kra.to_string_id();
                                    let label = format!("{} {}", kra.base.code, kra.base.description);
                                    let hint = format!("default {}%", kra.default_weight);
                                    view! {
                                        <li class="template-builder__item">
                                            <label>
                                                <input
                                                    type="checkbox"
                                                    prop:checked=move || vm.allocation.with(|a| a.is_selected(&id))
                                                    on:change=move |_| vm.toggle_kra(&kra)
                                                />
                                                <span>{label}</span>
                                                <span class="template-builder__hint">{hint}</span>
                                            </label>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </div>

                    <div class="template-builder__selection">
                        <div class="template-builder__selection-header">
                            <h3>"Selected KRA"</h3>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| vm.auto_balance()
                                disabled=Signal::derive(move || vm.allocation.with(|a| a.is_empty()))
                            >
                                {icon("scale")}
                                " Auto-balance"
                            </Button>
                        </div>

                        <Show
                            when=move || !vm.allocation.with(|a| a.is_empty())
                            fallback=|| view! { <div class="placeholder">"Pick KRA from the catalogue."</div> }
                        >
                            <table class="template-builder__weights">
                                <tbody>
                                    {move || vm.selected_rows().into_iter().map(|(kra, weight)| {
                                        let id = kra.to_string_id();
                                        view! {
                                            <tr>
                                                <td>{kra.base.code.clone()}</td>
                                                <td>{kra.base.description.clone()}</td>
                                                <td>
                                                    <input
                                                        type="number"
                                                        class="template-builder__weight-input"
                                                        min=weight_min
                                                        max=weight_max
                                                        prop:value=weight.to_string()
                                                        on:change=move |ev| vm.set_weight(&id, &event_target_value(&ev))
                                                    />
                                                    "%"
                                                </td>
                                            </tr>
                                        }
                                    }).collect_view()}
                                </tbody>
                            </table>
                        </Show>

                        <div
                            class="template-builder__total"
                            class:template-builder__total--balanced=move || vm.is_balanced()
                        >
                            {total_label}
                        </div>
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}
