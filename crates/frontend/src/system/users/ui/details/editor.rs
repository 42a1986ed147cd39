//! Load/edit/save state of the user form, free of any rendering or I/O.
//!
//! The view model owns one `UserEditor` in a signal and drives it with the
//! results of `perform_load` / `perform_save`. Every request carries a
//! sequence number so a late response can never overwrite newer state.

use std::collections::HashMap;

use contracts::system::session::SessionUser;
use contracts::system::users::{User, UserPatch};
use web_sys::File;

use crate::shared::api_utils::join_url;
use crate::system::users::api::{UserApiError, UserService};

/// Query parameter carrying the record id on the user page
pub const USER_ID_PARAM: &str = "userId";

pub const NOT_FOUND_MESSAGE: &str = "Пользователь не найден";
pub const MISSING_ID_MESSAGE: &str = "Сервер не вернул идентификатор пользователя";

/// Parses the `userId` query value; `None` means create mode.
pub fn parse_user_id(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// Canonical edit URL for a record
pub fn user_url(id: &str) -> String {
    let query = serde_qs::to_string(&HashMap::from([(USER_ID_PARAM, id)])).unwrap_or_default();
    format!("/user?{}", query)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub seq: u64,
    pub id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update,
}

/// Snapshot submitted by one save
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub seq: u64,
    pub mode: SaveMode,
    pub user: User,
    pub photo: Option<File>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SaveBlocked {
    #[error("Сохранение уже выполняется")]
    InFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// New record persisted; the page should move to its edit URL.
    Created { redirect: String },
    /// `session` is set when the operator saved their own record.
    Updated { session: Option<SessionUser> },
    Failed,
    /// Response to a request that is no longer current.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    Preview(String),
    Stored(String),
    Placeholder,
}

#[derive(Debug, Clone, Default)]
pub struct UserEditor {
    confirmed: Option<User>,
    working: Option<User>,
    photo_file: Option<File>,
    photo_preview: Option<String>,
    error: Option<String>,
    loading: bool,
    load_seq: u64,
    save_seq: u64,
    saving: Option<(u64, SaveMode)>,
}

impl UserEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last state acknowledged by the backend
    pub fn confirmed(&self) -> Option<&User> {
        self.confirmed.as_ref()
    }

    /// State being edited
    pub fn working(&self) -> Option<&User> {
        self.working.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving.is_some()
    }

    pub fn is_create_mode(&self) -> bool {
        !self.loading && self.working.as_ref().map_or(true, User::is_new)
    }

    /// Old password is only asked for when operators edit their own record.
    pub fn shows_old_password(&self, session: &SessionUser) -> bool {
        self.confirmed
            .as_ref()
            .is_some_and(|user| session.is_same_user(user))
    }

    /// Starts a load for the `userId` query value.
    ///
    /// Returns `None` and switches to create mode when the value is absent or
    /// not a positive integer. Moving to another record drops the previous one
    /// and abandons its pending save; its late response is stale.
    pub fn begin_load(&mut self, raw_user_id: Option<&str>) -> Option<LoadTicket> {
        self.load_seq += 1;
        match parse_user_id(raw_user_id) {
            Some(id) => {
                let same_record = self
                    .confirmed
                    .as_ref()
                    .is_some_and(|user| user.id == id.to_string());
                if !same_record {
                    self.reset();
                }
                self.loading = true;
                self.error = None;
                Some(LoadTicket {
                    seq: self.load_seq,
                    id,
                })
            }
            None => {
                if let Some(raw) = raw_user_id {
                    log::warn!("Ignoring invalid {}='{}', opening empty form", USER_ID_PARAM, raw);
                }
                self.reset();
                self.loading = false;
                None
            }
        }
    }

    fn reset(&mut self) {
        if let Some((seq, _)) = self.saving.take() {
            log::debug!("Abandoning save #{} of the previous record", seq);
        }
        self.confirmed = None;
        self.working = None;
        self.photo_file = None;
        self.photo_preview = None;
        self.error = None;
    }

    /// Applies a load result; returns `false` for a superseded ticket.
    pub fn apply_loaded(
        &mut self,
        ticket: LoadTicket,
        result: Result<Option<User>, UserApiError>,
    ) -> bool {
        if ticket.seq != self.load_seq {
            log::debug!("Dropping stale load of user {}", ticket.id);
            return false;
        }
        self.loading = false;
        match result {
            Ok(Some(user)) => self.accept(user),
            Ok(None) => {
                log::warn!("User {} not found", ticket.id);
                self.error = Some(NOT_FOUND_MESSAGE.to_string());
            }
            Err(e) => {
                log::error!("Failed to load user {}: {}", ticket.id, e);
                self.error = Some(e.to_string());
            }
        }
        true
    }

    pub fn edit(&mut self, patch: UserPatch) {
        let base = self.working.take().unwrap_or_default();
        self.working = Some(base.patched(patch));
    }

    pub fn set_photo_file(&mut self, file: File) {
        self.photo_file = Some(file);
    }

    pub fn set_photo_preview(&mut self, preview: String) {
        self.photo_preview = Some(preview);
    }

    pub fn has_photo_file(&self) -> bool {
        self.photo_file.is_some()
    }

    /// Image to render: fresh preview, stored photo, or placeholder icon.
    pub fn photo_source(&self, photo_base: &str) -> PhotoSource {
        if let Some(preview) = self.photo_preview.as_ref().filter(|p| !p.is_empty()) {
            return PhotoSource::Preview(preview.clone());
        }
        match self
            .confirmed
            .as_ref()
            .and_then(|u| u.photo.as_deref())
            .filter(|p| !p.trim().is_empty())
        {
            Some(path) => PhotoSource::Stored(join_url(photo_base, path)),
            None => PhotoSource::Placeholder,
        }
    }

    /// Snapshots the working copy for submission.
    ///
    /// Only one save may be outstanding at a time.
    pub fn begin_save(&mut self) -> Result<SaveRequest, SaveBlocked> {
        if self.saving.is_some() {
            return Err(SaveBlocked::InFlight);
        }
        let user = self.working.clone().unwrap_or_default();
        let mode = if user.is_new() {
            SaveMode::Create
        } else {
            SaveMode::Update
        };
        self.save_seq += 1;
        self.saving = Some((self.save_seq, mode));
        Ok(SaveRequest {
            seq: self.save_seq,
            mode,
            user,
            photo: self.photo_file.clone(),
        })
    }

    /// Applies the response of the save started with `seq`.
    pub fn complete_save(
        &mut self,
        seq: u64,
        result: Result<User, UserApiError>,
        session: &SessionUser,
    ) -> SaveOutcome {
        let mode = match self.saving {
            Some((current, mode)) if current == seq => mode,
            _ => {
                log::debug!("Dropping stale save response #{}", seq);
                return SaveOutcome::Stale;
            }
        };
        self.saving = None;

        let user = match result {
            Ok(user) => user,
            Err(e) => {
                log::warn!("Saving user failed: {}", e);
                self.error = Some(e.to_string());
                return SaveOutcome::Failed;
            }
        };

        match mode {
            SaveMode::Create => {
                if user.is_new() {
                    self.error = Some(MISSING_ID_MESSAGE.to_string());
                    return SaveOutcome::Failed;
                }
                log::info!("User {} created", user.id);
                let redirect = user_url(&user.id);
                self.accept(user);
                SaveOutcome::Created { redirect }
            }
            SaveMode::Update => {
                log::info!("User {} updated", user.id);
                let session = session
                    .is_same_user(&user)
                    .then(|| session.refreshed_from(&user));
                self.accept(user);
                SaveOutcome::Updated { session }
            }
        }
    }

    fn accept(&mut self, user: User) {
        self.confirmed = Some(user.clone());
        self.working = Some(user);
        self.photo_file = None;
        self.photo_preview = None;
        self.error = None;
    }
}

pub async fn perform_load<S: UserService>(
    service: &S,
    token: &str,
    ticket: LoadTicket,
) -> Result<Option<User>, UserApiError> {
    service.read(ticket.id, token).await
}

pub async fn perform_save<S: UserService>(
    service: &S,
    token: &str,
    request: &SaveRequest,
) -> Result<User, UserApiError> {
    match request.mode {
        SaveMode::Create => {
            service
                .create(token, &request.user, request.photo.as_ref())
                .await
        }
        SaveMode::Update => {
            service
                .update(token, &request.user, request.photo.as_ref())
                .await
        }
    }
}
