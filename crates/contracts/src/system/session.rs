use serde::{Deserialize, Serialize};

use super::users::User;

/// Operator identity cached in the browser between page loads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub token: String,
}

impl SessionUser {
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// True when `user` is the operator's own record.
    pub fn is_same_user(&self, user: &User) -> bool {
        !self.id.is_empty() && self.id == user.id
    }

    /// Session copy after the operator saved their own profile.
    ///
    /// The update response normally carries no token, so the current one is kept.
    pub fn refreshed_from(&self, user: &User) -> SessionUser {
        SessionUser {
            id: user.id.clone(),
            login: user.login.clone().unwrap_or_default(),
            email: user.email.clone().unwrap_or_default(),
            photo: user.photo.clone().unwrap_or_default(),
            token: user
                .token
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| self.token.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operator() -> SessionUser {
        SessionUser {
            id: "42".into(),
            login: "old".into(),
            email: "old@example.com".into(),
            photo: String::new(),
            token: "tok".into(),
        }
    }

    #[test]
    fn test_refreshed_keeps_token() {
        let user = User {
            id: "42".into(),
            login: Some("new".into()),
            email: Some("new@example.com".into()),
            photo: Some("photos/42.png".into()),
            ..Default::default()
        };
        let next = operator().refreshed_from(&user);
        assert_eq!(next.id, "42");
        assert_eq!(next.login, "new");
        assert_eq!(next.email, "new@example.com");
        assert_eq!(next.photo, "photos/42.png");
        assert_eq!(next.token, "tok");
    }

    #[test]
    fn test_refreshed_takes_new_token() {
        let user = User {
            id: "42".into(),
            token: Some("fresh".into()),
            ..Default::default()
        };
        assert_eq!(operator().refreshed_from(&user).token, "fresh");
    }

    #[test]
    fn test_same_user_requires_id() {
        let anonymous = SessionUser::default();
        assert!(!anonymous.is_same_user(&User::default()));
        assert!(operator().is_same_user(&User {
            id: "42".into(),
            ..Default::default()
        }));
    }

    #[test]
    fn test_deserialize_stored_session() {
        let session: SessionUser =
            serde_json::from_str(r#"{"id":"1","login":"root","token":"t"}"#).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.email, "");
    }
}
