use crate::system::users::ui::details::UserDetailsPage;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
fn NotFound() -> impl IntoView {
    view! { <div class="page-not-found">"Страница не найдена"</div> }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <main class="app-main">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/user") view=UserDetailsPage />
                </Routes>
            </main>
        </Router>
    }
}
