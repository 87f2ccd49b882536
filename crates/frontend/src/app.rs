use crate::routes::routes::AppRoutes;
use crate::shared::api_utils::ApiClient;
use crate::shared::config::load_config;
use crate::shared::notifications::{NotificationService, Toasts};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid configuration: {}", e);
            return view! {
                <div class="app-error">
                    <h1>"Configuration error"</h1>
                    <pre>{e.to_string()}</pre>
                </div>
            }
            .into_any();
        }
    };

    // Shared services for every screen
    provide_context(ApiClient::new(config.api.base_url.clone()));
    provide_context(NotificationService::new(config.ui.toast_timeout_ms));
    provide_context(config);

    view! {
        <AppRoutes />
        <Toasts />
    }
    .into_any()
}
