pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const ENV_API_BASE_URL: &str = "CAMPUS_API_BASE_URL";
pub const ENV_AUTH_TOKEN: &str = "CAMPUS_AUTH_TOKEN";
pub const AUTH_TOKEN_STORAGE_KEY: &str = "authToken";
pub const API_BASE_SOURCE_DEFAULT_LOCAL: &str = "default_local";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("base url must not be empty")]
    EmptyBaseUrl,
    #[error("base url must use http:// or https:// and include a host")]
    InvalidBaseUrl,
}

/// Where outbound requests go. Built once at load and handed to the
/// [`ApiClient`](crate::api::ApiClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn from_env() -> Result<(Self, &'static str), ConfigError> {
        let (base_url, source) = resolve_api_base_url()?;
        Ok((Self { base_url }, source))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

pub fn resolve_api_base_url() -> Result<(String, &'static str), ConfigError> {
    if let Some(base_url) = env_non_empty(ENV_API_BASE_URL) {
        return normalize_base_url(&base_url).map(|normalized| (normalized, ENV_API_BASE_URL));
    }
    normalize_base_url(DEFAULT_API_BASE_URL)
        .map(|normalized| (normalized, API_BASE_SOURCE_DEFAULT_LOCAL))
}

pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyBaseUrl);
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl);
    }
    let Some((_, remainder)) = trimmed.split_once("://") else {
        return Err(ConfigError::InvalidBaseUrl);
    };
    if remainder.trim().is_empty() || remainder.starts_with('/') {
        return Err(ConfigError::InvalidBaseUrl);
    }
    Ok(trimmed.to_string())
}

pub fn resolve_auth_token() -> Option<String> {
    std::env::var(ENV_AUTH_TOKEN)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn with_env<T>(base_url: Option<&str>, test: impl FnOnce() -> T) -> T {
        let lock = ENV_LOCK.get_or_init(|| Mutex::new(()));
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let previous = std::env::var(ENV_API_BASE_URL).ok();
        if let Some(value) = base_url {
            unsafe { std::env::set_var(ENV_API_BASE_URL, value) };
        } else {
            unsafe { std::env::remove_var(ENV_API_BASE_URL) };
        }

        let result = test();

        if let Some(value) = previous {
            unsafe { std::env::set_var(ENV_API_BASE_URL, value) };
        } else {
            unsafe { std::env::remove_var(ENV_API_BASE_URL) };
        }
        result
    }

    #[test]
    fn normalize_base_url_trims_and_drops_trailing_slash() {
        let normalized =
            normalize_base_url(" http://localhost:8080/api/ ").expect("valid base url");
        assert_eq!(normalized, "http://localhost:8080/api");
    }

    #[test]
    fn normalize_base_url_requires_http_scheme() {
        let error = normalize_base_url("localhost:8080/api").expect_err("expected invalid url");
        assert_eq!(error, ConfigError::InvalidBaseUrl);
    }

    #[test]
    fn normalize_base_url_rejects_missing_host() {
        assert_eq!(
            normalize_base_url("https:///api"),
            Err(ConfigError::InvalidBaseUrl)
        );
        assert_eq!(normalize_base_url("   "), Err(ConfigError::EmptyBaseUrl));
    }

    #[test]
    fn resolve_api_base_url_defaults_local() {
        with_env(None, || {
            let (resolved, source) = resolve_api_base_url().expect("default url");
            assert_eq!(resolved, DEFAULT_API_BASE_URL);
            assert_eq!(source, API_BASE_SOURCE_DEFAULT_LOCAL);
        });
    }

    #[test]
    fn resolve_api_base_url_prefers_env() {
        with_env(Some("https://campus.example.edu/api/"), || {
            let (config, source) = ClientConfig::from_env().expect("env url");
            assert_eq!(config.base_url, "https://campus.example.edu/api");
            assert_eq!(source, ENV_API_BASE_URL);
        });
    }

    #[test]
    fn resolve_api_base_url_surfaces_invalid_env() {
        with_env(Some("campus.example.edu"), || {
            assert_eq!(resolve_api_base_url(), Err(ConfigError::InvalidBaseUrl));
        });
    }
}
