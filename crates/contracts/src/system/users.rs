use serde::{Deserialize, Serialize};

/// Role codes as the backend stores them in `rights`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Right {
    Admin,
    Guest,
}

impl Right {
    pub const ALL: [Right; 2] = [Right::Admin, Right::Guest];

    pub fn code(self) -> &'static str {
        match self {
            Right::Admin => "1",
            Right::Guest => "2",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Right::Admin => "Администратор",
            Right::Guest => "Гость",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.code() == code)
    }
}

/// User record as returned by `/users/read`, `/users/create` and `/users/update`.
///
/// `old_password` / `new_password` are write-only and never come back from the
/// server. `fio` is computed server-side and is never submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middlename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Relative path of the stored photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default)]
    pub rights: Vec<String>,
}

/// Single-field change applied to a working copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserPatch {
    Login(String),
    Email(String),
    Firstname(String),
    Lastname(String),
    Middlename(String),
    Description(String),
    OldPassword(String),
    NewPassword(String),
    Active(bool),
    Right { right: Right, granted: bool },
}

impl User {
    /// A record without an id has not been created on the server yet.
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(false)
    }

    pub fn has_right(&self, right: Right) -> bool {
        self.rights.iter().any(|code| code == right.code())
    }

    /// Returns a copy with one field replaced; `self` is left as is.
    pub fn patched(&self, patch: UserPatch) -> User {
        let mut next = self.clone();
        match patch {
            UserPatch::Login(v) => next.login = Some(v),
            UserPatch::Email(v) => next.email = Some(v),
            UserPatch::Firstname(v) => next.firstname = Some(v),
            UserPatch::Lastname(v) => next.lastname = Some(v),
            UserPatch::Middlename(v) => next.middlename = Some(v),
            UserPatch::Description(v) => next.description = Some(v),
            UserPatch::OldPassword(v) => next.old_password = non_empty(v),
            UserPatch::NewPassword(v) => next.new_password = non_empty(v),
            UserPatch::Active(v) => next.active = Some(v),
            UserPatch::Right { right, granted } => {
                next.rights = toggle_right(&self.rights, right, granted)
            }
        }
        next
    }

    /// Text parts of the multipart body for create/update, in submission order.
    ///
    /// The replacement photo file is appended separately by the caller.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if !self.id.is_empty() {
            fields.push(("id", self.id.clone()));
        }
        fields.push(("active", self.is_active().to_string()));

        let text = [
            ("login", &self.login),
            ("email", &self.email),
            ("firstname", &self.firstname),
            ("lastname", &self.lastname),
            ("middlename", &self.middlename),
            ("description", &self.description),
        ];
        for (name, value) in text {
            if let Some(value) = value {
                fields.push((name, value.clone()));
            }
        }

        let passwords = [
            ("oldPassword", &self.old_password),
            ("newPassword", &self.new_password),
        ];
        for (name, value) in passwords {
            if let Some(value) = value.as_ref().filter(|v| !v.is_empty()) {
                fields.push((name, value.clone()));
            }
        }

        for code in &self.rights {
            fields.push(("rights", code.clone()));
        }
        fields
    }
}

/// Grants or revokes a single code, leaving other codes and their order intact.
pub fn toggle_right(rights: &[String], right: Right, granted: bool) -> Vec<String> {
    let code = right.code();
    let mut next: Vec<String> = rights.iter().filter(|c| *c != code).cloned().collect();
    if granted {
        if rights.iter().any(|c| c == code) {
            return rights_dedup(rights);
        }
        next.push(code.to_string());
    }
    next
}

fn rights_dedup(rights: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(rights.len());
    for code in rights {
        if !seen.contains(code) {
            seen.push(code.clone());
        }
    }
    seen
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Query string of `/users/read`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadUserQuery {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guest() -> User {
        User {
            id: "42".into(),
            login: Some("a".into()),
            rights: vec!["2".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_deserialize_partial_record() {
        let user: User =
            serde_json::from_str(r#"{"id":"42","login":"a","rights":["2"]}"#).unwrap();
        assert_eq!(user, guest());
        assert!(!user.is_active());
        assert!(user.has_right(Right::Guest));
        assert!(!user.has_right(Right::Admin));
    }

    #[test]
    fn test_deserialize_camel_case_passwords() {
        let user: User =
            serde_json::from_str(r#"{"oldPassword":"x","newPassword":"y"}"#).unwrap();
        assert!(user.is_new());
        assert_eq!(user.old_password.as_deref(), Some("x"));
        assert_eq!(user.new_password.as_deref(), Some("y"));
        assert!(user.rights.is_empty());
    }

    #[test]
    fn test_patch_leaves_original_untouched() {
        let original = guest();
        let next = original.patched(UserPatch::Email("a@b.c".into()));
        assert_eq!(original.email, None);
        assert_eq!(next.email.as_deref(), Some("a@b.c"));
        assert_eq!(next.login, original.login);
        assert_eq!(next.rights, original.rights);
    }

    #[test]
    fn test_grant_admin_appends_code() {
        let next = guest().patched(UserPatch::Right {
            right: Right::Admin,
            granted: true,
        });
        assert_eq!(next.rights, vec!["2".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_grant_twice_keeps_single_code() {
        let once = guest().patched(UserPatch::Right {
            right: Right::Admin,
            granted: true,
        });
        let twice = once.patched(UserPatch::Right {
            right: Right::Admin,
            granted: true,
        });
        assert_eq!(twice.rights, once.rights);
    }

    #[test]
    fn test_toggle_on_then_off_restores_rights() {
        let original = guest();
        let on = original.patched(UserPatch::Right {
            right: Right::Admin,
            granted: true,
        });
        let off = on.patched(UserPatch::Right {
            right: Right::Admin,
            granted: false,
        });
        assert_eq!(off.rights, original.rights);
    }

    #[test]
    fn test_revoke_absent_code_is_noop() {
        let original = guest();
        let next = original.patched(UserPatch::Right {
            right: Right::Admin,
            granted: false,
        });
        assert_eq!(next.rights, original.rights);
    }

    #[test]
    fn test_revoke_removes_every_occurrence() {
        let rights = vec!["1".to_string(), "2".to_string(), "1".to_string()];
        assert_eq!(toggle_right(&rights, Right::Admin, false), vec!["2".to_string()]);
    }

    #[test]
    fn test_empty_password_means_no_change() {
        let typed = guest().patched(UserPatch::NewPassword("secret".into()));
        assert_eq!(typed.new_password.as_deref(), Some("secret"));
        let cleared = typed.patched(UserPatch::NewPassword(String::new()));
        assert_eq!(cleared.new_password, None);
    }

    #[test]
    fn test_form_fields_skip_read_only_and_absent_values() {
        let user = User {
            id: "7".into(),
            active: Some(true),
            login: Some("ivan".into()),
            fio: Some("Иванов И.".into()),
            token: Some("tok".into()),
            photo: Some("photos/7.png".into()),
            old_password: Some(String::new()),
            new_password: Some("pw".into()),
            rights: vec!["1".into(), "2".into()],
            ..Default::default()
        };
        let fields = user.form_fields();
        assert_eq!(
            fields,
            vec![
                ("id", "7".to_string()),
                ("active", "true".to_string()),
                ("login", "ivan".to_string()),
                ("newPassword", "pw".to_string()),
                ("rights", "1".to_string()),
                ("rights", "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_form_fields_for_new_user_has_no_id() {
        let fields = User::default().form_fields();
        assert_eq!(fields, vec![("active", "false".to_string())]);
    }

    #[test]
    fn test_right_codes() {
        assert_eq!(Right::from_code("1"), Some(Right::Admin));
        assert_eq!(Right::from_code("2"), Some(Right::Guest));
        assert_eq!(Right::from_code("3"), None);
    }
}
