use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::data_store::PmsDataStore;
use crate::system::auth::context::AuthProvider;
use crate::system::settings::context::SettingsContext;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Tabs / panels state for the whole app
    provide_context(AppGlobalContext::new());

    // In-memory PMS data seeded from mock datasets
    provide_context(PmsDataStore::seeded());

    // Settings restored from localStorage (or defaults)
    provide_context(SettingsContext::load());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
