use leptos::html;
use leptos::prelude::*;
use web_sys::{File, HtmlInputElement, Url};

use crate::shared::icons::icon;

/// Image picker behind a regular button.
///
/// Hands the picked file to `on_file` and an object-URL preview of it to
/// `on_preview`. The previous preview URL is revoked on every new pick.
#[component]
pub fn UploadButton(
    #[prop(into)]
    label: String,
    /// `name` of the hidden file input
    #[prop(into)]
    name: String,
    on_file: Callback<File>,
    on_preview: Callback<String>,
    #[prop(into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    let input_ref = NodeRef::<html::Input>::new();
    let last_preview = StoredValue::new(None::<String>);

    let on_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        match Url::create_object_url_with_blob(&file) {
            Ok(url) => {
                if let Some(previous) = last_preview.get_value() {
                    let _ = Url::revoke_object_url(&previous);
                }
                last_preview.set_value(Some(url.clone()));
                on_preview.run(url);
            }
            Err(e) => log::warn!("Failed to build photo preview: {:?}", e),
        }
        log::debug!("Photo picked: {} ({} bytes)", file.name(), file.size());
        on_file.run(file);
        // Reset so picking the same file again still fires `change`
        input.set_value("");
    };

    view! {
        <div class="upload-button">
            <input
                node_ref=input_ref
                type="file"
                accept="image/*"
                name=name
                class="upload-button__input"
                style="display: none;"
                on:change=on_change
            />
            <button
                type="button"
                class="btn btn-secondary"
                disabled=move || disabled.get()
                on:click=move |_| {
                    if let Some(input) = input_ref.get() {
                        input.click();
                    }
                }
            >
                {icon("photo")}
                {label}
            </button>
        </div>
    }
}
