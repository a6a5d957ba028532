use contracts::system::settings::{PmsSettings, ReviewCycle};
use leptos::prelude::*;
use thaw::*;

use super::context::use_settings;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::auth::guard::RequireAdmin;

#[component]
pub fn SettingsPage() -> impl IntoView {
    view! {
        <RequireAdmin>
            <SettingsForm />
        </RequireAdmin>
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, fallback: T) -> T {
    raw.trim().parse().unwrap_or(fallback)
}

#[component]
fn SettingsForm() -> impl IntoView {
    let ctx = use_settings();
    let form: RwSignal<PmsSettings> = RwSignal::new(ctx.settings.get_untracked());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saved, set_saved) = signal(false);

    let on_save = move |_| {
        set_saved.set(false);
        match ctx.save(form.get_untracked()) {
            Ok(()) => {
                set_error.set(None);
                set_saved.set(true);
            }
            Err(e) => set_error.set(Some(e)),
        }
    };

    let on_reset = move |_| {
        ctx.reset();
        form.set(ctx.settings.get_untracked());
        set_error.set(None);
        set_saved.set(false);
    };

    view! {
        <PageFrame page_id="sys_settings--system" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <h1 class="page__title">"Settings"</h1>
            </div>
            <div class="page__content details-form">
                {move || error.get().map(|e| view! { <div class="error">{e}</div> })}
                {move || saved.get().then(|| view! { <div class="success">"Settings saved"</div> })}

                <div class="form-group">
                    <label for="company_name">"Company name"</label>
                    <input
                        type="text"
                        id="company_name"
                        prop:value=move || form.get().company_name
                        on:input=move |ev| form.update(|f| f.company_name = event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="review_cycle">"Review cycle"</label>
                    <select
                        id="review_cycle"
                        prop:value=move || form.get().review_cycle.as_str()
                        on:change=move |ev| {
                            if let Some(cycle) = ReviewCycle::from_key(&event_target_value(&ev)) {
                                form.update(|f| f.review_cycle = cycle);
                            }
                        }
                    >
                        {ReviewCycle::ALL
                            .into_iter()
                            .map(|c| view! { <option value=c.as_str()>{c.label()}</option> })
                            .collect_view()}
                    </select>
                </div>

                <div class="form-group">
                    <label for="rating_scale_max">"Rating scale (max)"</label>
                    <input
                        type="number"
                        id="rating_scale_max"
                        min="3"
                        max="10"
                        prop:value=move || form.get().rating_scale_max.to_string()
                        on:input=move |ev| {
                            let raw = event_target_value(&ev);
                            form.update(|f| f.rating_scale_max = parse_number(&raw, f.rating_scale_max));
                        }
                    />
                </div>

                <div class="form-group">
                    <label>"KRA weight input range"</label>
                    <div class="form-row">
                        <input
                            type="number"
                            prop:value=move || form.get().weight_input_min.to_string()
                            on:input=move |ev| {
                                let raw = event_target_value(&ev);
                                form.update(|f| f.weight_input_min = parse_number(&raw, f.weight_input_min));
                            }
                        />
                        <span>"to"</span>
                        <input
                            type="number"
                            prop:value=move || form.get().weight_input_max.to_string()
                            on:input=move |ev| {
                                let raw = event_target_value(&ev);
                                form.update(|f| f.weight_input_max = parse_number(&raw, f.weight_input_max));
                            }
                        />
                    </div>
                </div>

                <div class="form-group">
                    <label for="goal_reminder_days">"Goal reminder (days before due date)"</label>
                    <input
                        type="number"
                        id="goal_reminder_days"
                        min="0"
                        prop:value=move || form.get().goal_reminder_days.to_string()
                        on:input=move |ev| {
                            let raw = event_target_value(&ev);
                            form.update(|f| f.goal_reminder_days = parse_number(&raw, f.goal_reminder_days));
                        }
                    />
                </div>

                <Flex gap=FlexGap::Small>
                    <Button appearance=ButtonAppearance::Primary on_click=on_save>
                        "Save"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=on_reset>
                        "Reset to defaults"
                    </Button>
                </Flex>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_falls_back() {
        assert_eq!(parse_number("12", 5u8), 12);
        assert_eq!(parse_number("abc", 5u8), 5);
        assert_eq!(parse_number(" 300 ", 5u8), 5);
    }
}
