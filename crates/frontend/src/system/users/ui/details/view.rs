use contracts::system::users::{Right, UserPatch};
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};
use leptos_router::params::ParamsMap;
use thaw::{Flex, FlexGap, Spinner};
use web_sys::File;

use super::editor::{PhotoSource, USER_ID_PARAM};
use super::view_model::UserDetailsViewModel;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::ui::{Checkbox, Input, Textarea};
use crate::shared::components::upload_button::UploadButton;
use crate::shared::config::ClientConfig;
use crate::shared::icons::icon;
use crate::system::session::use_session;

/// `userId` from the query string; other parameters never trigger a reload.
fn user_id_memo(query: Memo<ParamsMap>) -> Memo<Option<String>> {
    Memo::new(move |_| query.with(|q| q.get(USER_ID_PARAM)))
}

#[component]
pub fn UserDetailsPage() -> impl IntoView {
    let config = use_context::<ClientConfig>().unwrap_or_else(ClientConfig::from_env);
    let vm = UserDetailsViewModel::new(&config, use_session());
    let query = use_query_map();
    let navigate = StoredValue::new_local(use_navigate());

    let raw_user_id = user_id_memo(query);

    // Re-runs only when `userId` changes, including the redirect after create
    Effect::new(move |_| {
        vm.load(raw_user_id.get());
    });

    let on_text = move |patch: fn(String) -> UserPatch| {
        Callback::new(move |value: String| vm.edit(patch(value)))
    };
    let on_right = move |right: Right| {
        Callback::new(move |granted: bool| vm.edit(UserPatch::Right { right, granted }))
    };
    let busy = Signal::derive(move || vm.is_saving());

    view! {
        <div id="user" class="details-container user-details">
            <PageHeader
                title="Карточка пользователя"
                back_href="/users"
                back_label="Пользователи"
                subtitle=Signal::derive(move || {
                    if vm.is_create_mode() { Some("Новый пользователь".to_string()) } else { None }
                })
            />

            <Show when=move || vm.is_loading()>
                <Flex gap=FlexGap::Small>
                    <Spinner />
                    <span>"Загрузка..."</span>
                </Flex>
            </Show>

            // Enter must not submit; saving goes through the button below
            <form class="details-form" on:submit=|ev| ev.prevent_default()>
                <div class="row user-form">
                    <div class="col-2">
                        <span class="image fit">
                            {move || match vm.photo_source() {
                                PhotoSource::Preview(src) | PhotoSource::Stored(src) => {
                                    view! { <img src=src alt="" class="user-photo" /> }.into_any()
                                }
                                PhotoSource::Placeholder => {
                                    view! { <span class="user-photo user-photo--placeholder">{icon("user-circle")}</span> }.into_any()
                                }
                            }}
                        </span>
                    </div>
                    <div class="col-10">
                        <div class="row user-form">
                            <div class="col-5">
                                <label>"ФИО: " {move || vm.confirmed_text(|u| u.fio.as_ref())}</label>
                            </div>
                            <div class="col-5">
                                <label>"Идентификатор: " {move || vm.editor.with(|e| e.confirmed().map(|u| u.id.clone()).unwrap_or_default())}</label>
                            </div>
                        </div>
                        <div class="row user-form">
                            <Show when=move || vm.shows_old_password()>
                                <div class="col-5">
                                    <Input
                                        label="Текущий пароль"
                                        name="user-oldPassword"
                                        input_type="password"
                                        autocomplete="current-password"
                                        placeholder="Текущий пароль"
                                        value=Signal::derive(move || vm.text(|u| u.old_password.as_ref()))
                                        on_input=on_text(UserPatch::OldPassword)
                                        disabled=busy
                                    />
                                </div>
                            </Show>
                            <div class="col-5">
                                <Input
                                    label="Новый пароль"
                                    name="user-newPassword"
                                    input_type="password"
                                    autocomplete="new-password"
                                    placeholder="Новый пароль"
                                    value=Signal::derive(move || vm.text(|u| u.new_password.as_ref()))
                                    on_input=on_text(UserPatch::NewPassword)
                                    disabled=busy
                                />
                            </div>
                        </div>
                    </div>
                </div>

                <div class="row user-form">
                    <div class="col-12">
                        <UploadButton
                            label="Загрузить фото"
                            name="photo"
                            on_file=Callback::new(move |file: File| vm.attach_photo(file))
                            on_preview=Callback::new(move |src: String| vm.preview_photo(src))
                            disabled=busy
                        />
                    </div>
                </div>

                <div class="row user-form">
                    <div class="col-6">
                        <Input
                            label="Логин"
                            name="user-login"
                            placeholder="Логин"
                            value=Signal::derive(move || vm.text(|u| u.login.as_ref()))
                            on_input=on_text(UserPatch::Login)
                            disabled=busy
                        />
                    </div>
                    <div class="col-6">
                        <Input
                            label="Адрес электронной почты"
                            name="user-email"
                            input_type="email"
                            placeholder="Адрес электронной почты"
                            value=Signal::derive(move || vm.text(|u| u.email.as_ref()))
                            on_input=on_text(UserPatch::Email)
                            disabled=busy
                        />
                    </div>
                </div>

                <div class="row user-form">
                    <div class="col-4">
                        <Input
                            label="Имя"
                            name="user-firstname"
                            placeholder="Имя"
                            value=Signal::derive(move || vm.text(|u| u.firstname.as_ref()))
                            on_input=on_text(UserPatch::Firstname)
                            disabled=busy
                        />
                    </div>
                    <div class="col-4">
                        <Input
                            label="Фамилия"
                            name="user-lastname"
                            placeholder="Фамилия"
                            value=Signal::derive(move || vm.text(|u| u.lastname.as_ref()))
                            on_input=on_text(UserPatch::Lastname)
                            disabled=busy
                        />
                    </div>
                    <div class="col-4">
                        <Input
                            label="Отчество"
                            name="user-middlename"
                            placeholder="Отчество"
                            value=Signal::derive(move || vm.text(|u| u.middlename.as_ref()))
                            on_input=on_text(UserPatch::Middlename)
                            disabled=busy
                        />
                    </div>
                </div>

                <div class="row user-form">
                    <div class="col-12">
                        <Textarea
                            label="Описание"
                            name="user-description"
                            placeholder="Описание"
                            value=Signal::derive(move || vm.text(|u| u.description.as_ref()))
                            on_input=on_text(UserPatch::Description)
                            disabled=busy
                        />
                    </div>
                </div>

                <div class="row user-form">
                    <div class="col-3">
                        <Checkbox
                            name="user-admin"
                            label=Right::Admin.label()
                            checked=Signal::derive(move || vm.has_right(Right::Admin))
                            on_change=on_right(Right::Admin)
                            disabled=busy
                        />
                    </div>
                    <div class="col-3">
                        <Checkbox
                            name="user-guest"
                            label=Right::Guest.label()
                            checked=Signal::derive(move || vm.has_right(Right::Guest))
                            on_change=on_right(Right::Guest)
                            disabled=busy
                        />
                    </div>
                </div>

                <div class="row user-form">
                    <div class="col-3">
                        <Checkbox
                            name="user-active"
                            label="Активен"
                            checked=Signal::derive(move || vm.is_active())
                            on_change=Callback::new(move |checked: bool| vm.edit(UserPatch::Active(checked)))
                            disabled=busy
                        />
                    </div>
                </div>

                {move || vm.error().filter(|e| !e.is_empty()).map(|e| view! {
                    <div class="row user-form">
                        <div class="col-12">
                            <span class="label-info error">{e}</span>
                        </div>
                    </div>
                })}
            </form>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    disabled=move || vm.is_saving()
                    on:click=move |_| {
                        vm.save_command(move |url| {
                            navigate.with_value(|nav| nav(url, Default::default()));
                        })
                    }
                >
                    {icon("save")}
                    {move || if vm.is_saving() { "Сохранение..." } else { "Сохранить" }}
                </button>
            </div>
        </div>
    }
}
