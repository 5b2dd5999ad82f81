use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::preferences::{resolve_theme, Theme};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub theme: Theme,
    /// False while the theme is derived from the client hint or the default.
    pub stored: bool,
}

/// GET /api/v1/preferences/theme
pub async fn handle_get_theme(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<ThemeResponse> {
    let stored = *state.theme.read().await;
    Json(ThemeResponse {
        theme: resolve_theme(stored, &headers),
        stored: stored.is_some(),
    })
}

/// POST /api/v1/preferences/theme/toggle
///
/// Flips the effective theme and writes it back to the store.
pub async fn handle_toggle_theme(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ThemeResponse>, AppError> {
    let mut cached = state.theme.write().await;
    let next = resolve_theme(*cached, &headers).toggled();
    state.preferences.save_theme(next).await?;
    *cached = Some(next);
    info!("Theme set to {}", next.as_str());

    Ok(Json(ThemeResponse {
        theme: next,
        stored: true,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::http::HeaderValue;

    use crate::preferences::{MemoryPreferenceStore, PreferenceStore, PREFERS_COLOR_SCHEME_HINT};
    use crate::state::test_support::test_state;

    #[tokio::test]
    async fn test_toggle_writes_back_to_store() {
        let store = Arc::new(MemoryPreferenceStore::default());
        let mut state = test_state();
        let shared: Arc<dyn PreferenceStore> = store.clone();
        state.preferences = shared;

        let Json(first) = handle_toggle_theme(State(state.clone()), HeaderMap::new())
            .await
            .unwrap();
        assert_eq!(first.theme, Theme::Dark);
        assert_eq!(store.load_theme().await.unwrap(), Some(Theme::Dark));

        let Json(second) = handle_toggle_theme(State(state.clone()), HeaderMap::new())
            .await
            .unwrap();
        assert_eq!(second.theme, Theme::Light);
        assert_eq!(store.load_theme().await.unwrap(), Some(Theme::Light));
    }

    #[tokio::test]
    async fn test_toggle_starts_from_client_hint() {
        let state = test_state();
        let mut headers = HeaderMap::new();
        headers.insert(PREFERS_COLOR_SCHEME_HINT, HeaderValue::from_static("dark"));

        let Json(toggled) = handle_toggle_theme(State(state), headers).await.unwrap();
        assert_eq!(toggled.theme, Theme::Light);
    }

    #[tokio::test]
    async fn test_get_reports_stored_theme() {
        let mut state = test_state();
        let store: Arc<dyn PreferenceStore> =
            Arc::new(MemoryPreferenceStore::with_theme(Theme::Dark));
        state.preferences = store;
        *state.theme.write().await = Some(Theme::Dark);

        let Json(response) = handle_get_theme(State(state), HeaderMap::new()).await;
        assert_eq!(response.theme, Theme::Dark);
        assert!(response.stored);
    }
}
