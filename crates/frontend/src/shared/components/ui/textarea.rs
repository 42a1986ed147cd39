use leptos::prelude::*;

/// Labelled multi-line input
#[component]
pub fn Textarea(
    #[prop(optional, into)]
    label: Option<String>,
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional)]
    on_input: Option<Callback<String>>,
    #[prop(optional, into)]
    placeholder: Option<String>,
    #[prop(into)]
    name: String,
    #[prop(into)]
    disabled: Signal<bool>,
    /// Rows attribute, 3 by default
    #[prop(optional)]
    rows: Option<u32>,
) -> impl IntoView {
    let label_for = name.clone();
    let element_id = name.clone();
    let textarea_placeholder = placeholder.unwrap_or_default();
    let textarea_rows = rows.unwrap_or(3);

    view! {
        <div class="form__group">
            {label.map(|l| view! {
                <label class="form__label" for=label_for>
                    {l}
                </label>
            })}
            <textarea
                id=element_id
                name=name
                class="form__textarea"
                placeholder=textarea_placeholder
                disabled=move || disabled.get()
                rows=textarea_rows
                prop:value=move || value.get()
                on:input=move |ev| {
                    if let Some(handler) = on_input {
                        handler.run(event_target_value(&ev));
                    }
                }
            />
        </div>
    }
}
