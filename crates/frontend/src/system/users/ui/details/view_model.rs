use contracts::system::users::{Right, User, UserPatch};
use leptos::prelude::*;
use web_sys::File;

use super::editor::{perform_load, perform_save, PhotoSource, SaveOutcome, UserEditor};
use crate::shared::config::ClientConfig;
use crate::system::session::SessionContext;
use crate::system::users::api::HttpUserService;

/// Persists a refreshed session after the operator saved their own record.
///
/// Returns the edit URL to move to when a new record was created.
pub(crate) fn settle_save(session: &SessionContext, outcome: SaveOutcome) -> Option<String> {
    match outcome {
        SaveOutcome::Created { redirect } => Some(redirect),
        SaveOutcome::Updated {
            session: Some(refreshed),
        } => {
            log::info!("Own profile saved, refreshing session");
            session.replace(refreshed);
            None
        }
        SaveOutcome::Updated { session: None } | SaveOutcome::Failed | SaveOutcome::Stale => None,
    }
}

/// ViewModel for the user details form
#[derive(Clone, Copy)]
pub struct UserDetailsViewModel {
    pub editor: RwSignal<UserEditor, LocalStorage>,
    session: SessionContext,
    service: StoredValue<HttpUserService>,
    photo_base: StoredValue<String>,
}

impl UserDetailsViewModel {
    pub fn new(config: &ClientConfig, session: SessionContext) -> Self {
        Self {
            editor: RwSignal::new_local(UserEditor::new()),
            session,
            service: StoredValue::new(HttpUserService::new(config.api_base.clone())),
            photo_base: StoredValue::new(config.photo_base.clone()),
        }
    }

    /// Load the record named by the `userId` query value, or reset to create mode
    pub fn load(&self, raw_user_id: Option<String>) {
        let Some(ticket) = self
            .editor
            .try_update(|e| e.begin_load(raw_user_id.as_deref()))
            .flatten()
        else {
            return;
        };

        let editor = self.editor;
        let service = self.service.get_value();
        let token = self.session.token();
        log::debug!("Loading user {}", ticket.id);
        wasm_bindgen_futures::spawn_local(async move {
            let result = perform_load(&service, &token, ticket).await;
            editor.update(|e| {
                e.apply_loaded(ticket, result);
            });
        });
    }

    /// Save the working copy; `navigate` receives the edit URL of a newly created record
    pub fn save_command(&self, navigate: impl Fn(&str) + 'static) {
        let request = match self.editor.try_update(|e| e.begin_save()) {
            Some(Ok(request)) => request,
            Some(Err(blocked)) => {
                log::debug!("Save ignored: {}", blocked);
                return;
            }
            None => return,
        };

        let editor = self.editor;
        let session = self.session;
        let service = self.service.get_value();
        let token = session.token();
        log::debug!("Saving user #{} ({:?})", request.seq, request.mode);
        wasm_bindgen_futures::spawn_local(async move {
            let result = perform_save(&service, &token, &request).await;
            let current = session.current();
            let outcome = editor.try_update(|e| e.complete_save(request.seq, result, &current));
            if let Some(redirect) = outcome.and_then(|o| settle_save(&session, o)) {
                navigate(&redirect);
            }
        });
    }

    pub fn edit(&self, patch: UserPatch) {
        self.editor.update(|e| e.edit(patch));
    }

    pub fn attach_photo(&self, file: File) {
        self.editor.update(|e| e.set_photo_file(file));
    }

    pub fn preview_photo(&self, preview: String) {
        self.editor.update(|e| e.set_photo_preview(preview));
    }

    /// Text of a working-copy field, empty when absent
    pub fn text(&self, field: fn(&User) -> Option<&String>) -> String {
        self.editor
            .with(|e| e.working().and_then(field).cloned())
            .unwrap_or_default()
    }

    /// Text of a confirmed-copy field, empty when absent
    pub fn confirmed_text(&self, field: fn(&User) -> Option<&String>) -> String {
        self.editor
            .with(|e| e.confirmed().and_then(field).cloned())
            .unwrap_or_default()
    }

    pub fn has_right(&self, right: Right) -> bool {
        self.editor
            .with(|e| e.working().is_some_and(|u| u.has_right(right)))
    }

    pub fn is_active(&self) -> bool {
        self.editor
            .with(|e| e.working().is_some_and(User::is_active))
    }

    pub fn photo_source(&self) -> PhotoSource {
        let base = self.photo_base.get_value();
        self.editor.with(|e| e.photo_source(&base))
    }

    pub fn shows_old_password(&self) -> bool {
        let session = self.session.session.get();
        self.editor.with(|e| e.shows_old_password(&session))
    }

    pub fn error(&self) -> Option<String> {
        self.editor.with(|e| e.error().map(str::to_string))
    }

    pub fn is_saving(&self) -> bool {
        self.editor.with(UserEditor::is_saving)
    }

    pub fn is_loading(&self) -> bool {
        self.editor.with(UserEditor::is_loading)
    }

    pub fn is_create_mode(&self) -> bool {
        self.editor.with(UserEditor::is_create_mode)
    }
}
