use leptos::prelude::*;

/// Labelled text input bound to a string signal
#[component]
pub fn Input(
    /// Label text (optional)
    #[prop(optional, into)]
    label: Option<String>,
    /// Input value
    #[prop(into)]
    value: Signal<String>,
    /// Receives the new value on every keystroke
    #[prop(optional)]
    on_input: Option<Callback<String>>,
    /// Placeholder text
    #[prop(optional, into)]
    placeholder: Option<String>,
    /// Input type: "text" (default), "password", "email", etc.
    #[prop(optional, into)]
    input_type: Option<String>,
    /// `name` and `id` of the element
    #[prop(into)]
    name: String,
    /// Disabled state (reactive)
    #[prop(into)]
    disabled: Signal<bool>,
    /// Autocomplete attribute, "off" by default
    #[prop(optional, into)]
    autocomplete: Option<String>,
) -> impl IntoView {
    let label_for = name.clone();
    let element_id = name.clone();
    let input_placeholder = placeholder.unwrap_or_default();
    let input_t = input_type.unwrap_or_else(|| "text".to_string());
    let input_autocomplete = autocomplete.unwrap_or_else(|| "off".to_string());

    view! {
        <div class="form__group">
            {label.map(|l| view! {
                <label class="form__label" for=label_for>
                    {l}
                </label>
            })}
            <input
                id=element_id
                name=name
                class="form__input"
                type=input_t
                prop:value=move || value.get()
                placeholder=input_placeholder
                disabled=move || disabled.get()
                autocomplete=input_autocomplete
                on:input=move |ev| {
                    if let Some(handler) = on_input {
                        handler.run(event_target_value(&ev));
                    }
                }
            />
        </div>
    }
}
