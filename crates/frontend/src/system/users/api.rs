use contracts::system::users::{ReadUserQuery, User};
use gloo_net::http::{Request, RequestBuilder, Response};
use web_sys::{File, FormData};

use crate::shared::api_utils::join_url;

/// Failure of a call to the user endpoints
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserApiError {
    #[error("Ошибка сети: {0}")]
    Network(String),
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Некорректный ответ сервера: {0}")]
    Decode(String),
    #[error("Не удалось подготовить данные формы: {0}")]
    Form(String),
}

/// Remote read/create/update of user records
#[allow(async_fn_in_trait)]
pub trait UserService {
    /// `Ok(None)` when the backend has no such record
    async fn read(&self, id: i64, token: &str) -> Result<Option<User>, UserApiError>;

    async fn create(
        &self,
        token: &str,
        user: &User,
        photo: Option<&File>,
    ) -> Result<User, UserApiError>;

    async fn update(
        &self,
        token: &str,
        user: &User,
        photo: Option<&File>,
    ) -> Result<User, UserApiError>;
}

/// `UserService` over the backend REST API
#[derive(Debug, Clone)]
pub struct HttpUserService {
    api_base: String,
}

impl HttpUserService {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.api_base, path)
    }
}

fn with_auth(builder: RequestBuilder, token: &str) -> RequestBuilder {
    if token.is_empty() {
        builder
    } else {
        builder.header("Authorization", &format!("Bearer {}", token))
    }
}

fn build_form_data(user: &User, photo: Option<&File>) -> Result<FormData, UserApiError> {
    let form = FormData::new().map_err(|e| UserApiError::Form(format!("{e:?}")))?;
    for (name, value) in user.form_fields() {
        form.append_with_str(name, &value)
            .map_err(|e| UserApiError::Form(format!("{e:?}")))?;
    }
    if let Some(file) = photo {
        form.append_with_blob_and_filename("photo", file, &file.name())
            .map_err(|e| UserApiError::Form(format!("{e:?}")))?;
    }
    Ok(form)
}

/// Human-readable message for a rejected request.
///
/// Prefers `message` / `error` from a JSON body, then the raw body text.
pub fn rejection_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                if !msg.trim().is_empty() {
                    return msg.trim().to_string();
                }
            }
        }
        if let Some(msg) = value.as_str().filter(|m| !m.trim().is_empty()) {
            return msg.trim().to_string();
        }
    } else if !body.is_empty() {
        return body.to_string();
    }
    format!("HTTP {}", status)
}

/// Body of a successful user response; empty or `null` means no record.
pub fn parse_user_body(body: &str) -> Result<Option<User>, UserApiError> {
    let body = body.trim();
    if body.is_empty() || body == "null" {
        return Ok(None);
    }
    serde_json::from_str::<User>(body)
        .map(Some)
        .map_err(|e| UserApiError::Decode(e.to_string()))
}

async fn read_body(response: &Response) -> Result<String, UserApiError> {
    response
        .text()
        .await
        .map_err(|e| UserApiError::Network(e.to_string()))
}

async fn expect_user(response: Response) -> Result<User, UserApiError> {
    let status = response.status();
    let body = read_body(&response).await?;
    if !response.ok() {
        return Err(UserApiError::Rejected {
            status,
            message: rejection_message(status, &body),
        });
    }
    parse_user_body(&body)?.ok_or_else(|| UserApiError::Decode("пустой ответ".to_string()))
}

impl UserService for HttpUserService {
    async fn read(&self, id: i64, token: &str) -> Result<Option<User>, UserApiError> {
        let query = serde_qs::to_string(&ReadUserQuery { id })
            .map_err(|e| UserApiError::Form(e.to_string()))?;
        let url = self.url(&format!("users/read?{}", query));

        let response = with_auth(Request::get(&url), token)
            .send()
            .await
            .map_err(|e| UserApiError::Network(e.to_string()))?;

        let status = response.status();
        if status == 404 {
            return Ok(None);
        }
        let body = read_body(&response).await?;
        if !response.ok() {
            return Err(UserApiError::Rejected {
                status,
                message: rejection_message(status, &body),
            });
        }
        parse_user_body(&body)
    }

    async fn create(
        &self,
        token: &str,
        user: &User,
        photo: Option<&File>,
    ) -> Result<User, UserApiError> {
        let form = build_form_data(user, photo)?;
        let response = with_auth(Request::put(&self.url("users/create")), token)
            .body(form)
            .map_err(|e| UserApiError::Form(e.to_string()))?
            .send()
            .await
            .map_err(|e| UserApiError::Network(e.to_string()))?;
        expect_user(response).await
    }

    async fn update(
        &self,
        token: &str,
        user: &User,
        photo: Option<&File>,
    ) -> Result<User, UserApiError> {
        let form = build_form_data(user, photo)?;
        let response = with_auth(Request::patch(&self.url("users/update")), token)
            .body(form)
            .map_err(|e| UserApiError::Form(e.to_string()))?
            .send()
            .await
            .map_err(|e| UserApiError::Network(e.to_string()))?;
        expect_user(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_from_json() {
        assert_eq!(
            rejection_message(400, r#"{"message":"Логин занят"}"#),
            "Логин занят"
        );
        assert_eq!(
            rejection_message(403, r#"{"error":"Недостаточно прав"}"#),
            "Недостаточно прав"
        );
        assert_eq!(rejection_message(400, r#""Неверный пароль""#), "Неверный пароль");
    }

    #[test]
    fn test_rejection_message_fallbacks() {
        assert_eq!(rejection_message(500, "  Internal error \n"), "Internal error");
        assert_eq!(rejection_message(502, ""), "HTTP 502");
        assert_eq!(rejection_message(400, r#"{"code":12}"#), "HTTP 400");
    }

    #[test]
    fn test_parse_user_body() {
        assert_eq!(parse_user_body("").unwrap(), None);
        assert_eq!(parse_user_body("null").unwrap(), None);

        let user = parse_user_body(r#"{"id":"42","login":"a","rights":["2"]}"#)
            .unwrap()
            .unwrap();
        assert_eq!(user.id, "42");
        assert_eq!(user.rights, vec!["2".to_string()]);

        assert!(matches!(parse_user_body("{oops"), Err(UserApiError::Decode(_))));
    }

    #[test]
    fn test_error_display() {
        let err = UserApiError::Rejected {
            status: 400,
            message: "Логин занят".into(),
        };
        assert_eq!(err.to_string(), "Логин занят");
        assert_eq!(
            UserApiError::Network("timeout".into()).to_string(),
            "Ошибка сети: timeout"
        );
    }

    #[test]
    fn test_read_query_string() {
        assert_eq!(serde_qs::to_string(&ReadUserQuery { id: 42 }).unwrap(), "id=42");
    }

    #[test]
    fn test_service_url() {
        let service = HttpUserService::new("http://h:3000/");
        assert_eq!(service.url("users/create"), "http://h:3000/users/create");
    }
}
