//! Display-theme preference: the one value that outlives a session.
//!
//! Read once at startup into `AppState`, written back on every toggle.

pub mod handlers;

use async_trait::async_trait;
use axum::http::HeaderMap;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::warn;

use crate::errors::AppError;

pub const THEME_KEY: &str = "theme";
/// Client hint carrying the user agent's colour-scheme preference.
pub const PREFERS_COLOR_SCHEME_HINT: &str = "sec-ch-prefers-color-scheme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Stored theme first, then the client's colour-scheme hint, then light.
pub fn resolve_theme(stored: Option<Theme>, headers: &HeaderMap) -> Theme {
    if let Some(theme) = stored {
        return theme;
    }
    let prefers_dark = headers
        .get(PREFERS_COLOR_SCHEME_HINT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_matches('"').eq_ignore_ascii_case("dark"))
        .unwrap_or(false);
    if prefers_dark {
        Theme::Dark
    } else {
        Theme::Light
    }
}

/// Key-value store holding the theme preference.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn load_theme(&self) -> Result<Option<Theme>, AppError>;
    async fn save_theme(&self, theme: Theme) -> Result<(), AppError>;
}

/// Redis-backed store, used when `REDIS_URL` is configured.
pub struct RedisPreferenceStore {
    client: redis::Client,
}

impl RedisPreferenceStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PreferenceStore for RedisPreferenceStore {
    async fn load_theme(&self) -> Result<Option<Theme>, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(THEME_KEY).await?;
        Ok(raw.and_then(|value| {
            let theme = Theme::parse(&value);
            if theme.is_none() {
                warn!("Ignoring unrecognised stored theme '{value}'");
            }
            theme
        }))
    }

    async fn save_theme(&self, theme: Theme) -> Result<(), AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(THEME_KEY, theme.as_str()).await?;
        Ok(())
    }
}

/// In-process store. Used when no Redis is configured, and in tests.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    theme: Mutex<Option<Theme>>,
}

impl MemoryPreferenceStore {
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme: Mutex::new(Some(theme)),
        }
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn load_theme(&self) -> Result<Option<Theme>, AppError> {
        Ok(*self.theme.lock().await)
    }

    async fn save_theme(&self, theme: Theme) -> Result<(), AppError> {
        *self.theme.lock().await = Some(theme);
        Ok(())
    }
}
