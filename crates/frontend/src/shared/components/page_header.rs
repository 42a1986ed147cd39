use leptos::prelude::*;
use leptos_router::components::A;

use crate::shared::icons::icon;

/// Header of a details page with a link back to its list
#[component]
pub fn PageHeader(
    #[prop(into)]
    title: String,
    /// Target of the back link
    back_href: &'static str,
    #[prop(into)]
    back_label: String,
    #[prop(into)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <div class="page-header__back">
                <A href=back_href>
                    {icon("back")}
                    {back_label}
                </A>
            </div>
            <div class="page-header__text">
                <h1 class="page-header__title">{title}</h1>
                {move || subtitle.get().map(|s| view! {
                    <div class="page-header__subtitle">{s}</div>
                })}
            </div>
        </div>
    }
}
