use crate::routes::routes::AppRoutes;
use crate::shared::config::ClientConfig;
use crate::system::session::SessionProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the client config to the whole app via context.
    provide_context(ClientConfig::from_env());

    view! {
        <SessionProvider>
            <AppRoutes />
        </SessionProvider>
    }
}
