use crate::shared::api_utils::api_base;

/// Key of the cached operator session in `localStorage`
pub const DEFAULT_SESSION_KEY: &str = "user";

/// Prefix for stored photo paths returned by the backend
pub const DEFAULT_PHOTO_BASE: &str = "..";

/// Client-side settings, provided to the component tree via context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub photo_base: String,
    pub session_key: String,
}

impl ClientConfig {
    /// Build the config for the running page.
    ///
    /// `ADMIN_API_BASE` and `ADMIN_PHOTO_BASE` set at compile time take
    /// precedence; otherwise the backend is assumed on port 3000 of the
    /// current host.
    pub fn from_env() -> Self {
        Self::resolve(
            option_env!("ADMIN_API_BASE"),
            option_env!("ADMIN_PHOTO_BASE"),
            api_base,
        )
    }

    fn resolve(
        api_override: Option<&str>,
        photo_override: Option<&str>,
        fallback_api: impl FnOnce() -> String,
    ) -> Self {
        let api_base = match api_override.filter(|s| !s.trim().is_empty()) {
            Some(base) => base.trim().to_string(),
            None => fallback_api(),
        };
        let photo_base = photo_override
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_PHOTO_BASE)
            .trim()
            .to_string();

        log::debug!("client config: api_base={}, photo_base={}", api_base, photo_base);

        Self {
            api_base,
            photo_base,
            session_key: DEFAULT_SESSION_KEY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_fallback_api() {
        let config = ClientConfig::resolve(None, None, || "http://h:3000".to_string());
        assert_eq!(config.api_base, "http://h:3000");
        assert_eq!(config.photo_base, "..");
        assert_eq!(config.session_key, "user");
    }

    #[test]
    fn test_overrides_win() {
        let config = ClientConfig::resolve(Some(" https://api.example.com "), Some("/media"), || {
            panic!("fallback must not run when overridden")
        });
        assert_eq!(config.api_base, "https://api.example.com");
        assert_eq!(config.photo_base, "/media");
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let config = ClientConfig::resolve(Some("  "), Some(""), || "fallback".to_string());
        assert_eq!(config.api_base, "fallback");
        assert_eq!(config.photo_base, "..");
    }
}
