use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::ResearcherProfile;
use crate::profile::completeness::{compute_completeness, CompletenessReport};
use crate::session::{ProfileUpdate, Session};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: ResearcherProfile,
    pub orcid_url: Option<String>,
    pub completeness: CompletenessReport,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BioResponse {
    pub bio: String,
}

fn profile_response(session: &Session) -> ProfileResponse {
    let profile = session.profile().clone();
    ProfileResponse {
        orcid_url: profile.orcid_url(),
        completeness: compute_completeness(&profile, session.publications()),
        profile,
    }
}

/// GET /api/v1/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Json<ProfileResponse> {
    let session = state.session.read().await;
    Json(profile_response(&session))
}

/// PUT /api/v1/profile
///
/// Saves the whole edit form at once.
pub async fn handle_replace_profile(
    State(state): State<AppState>,
    Json(profile): Json<ResearcherProfile>,
) -> Json<ProfileResponse> {
    let mut session = state.session.write().await;
    session.replace_profile(profile);
    Json(profile_response(&session))
}

/// PATCH /api/v1/profile
///
/// Applies field updates in order.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Json(updates): Json<Vec<ProfileUpdate>>,
) -> Result<Json<ProfileResponse>, AppError> {
    if updates.is_empty() {
        return Err(AppError::Validation("no profile updates supplied".to_string()));
    }
    let mut session = state.session.write().await;
    let count = updates.len();
    for update in updates {
        session.apply_profile_update(update);
    }
    info!("Applied {count} profile updates");
    Ok(Json(profile_response(&session)))
}

/// GET /api/v1/profile/completeness
pub async fn handle_get_completeness(State(state): State<AppState>) -> Json<CompletenessReport> {
    let session = state.session.read().await;
    Json(compute_completeness(session.profile(), session.publications()))
}

/// POST /api/v1/profile/bio
///
/// Generates a bio from the current profile and stores it. The session lock
/// is not held during the call; overlapping requests resolve last-write-wins.
pub async fn handle_generate_bio(State(state): State<AppState>) -> Json<BioResponse> {
    let snapshot = state.session.read().await.profile().clone();
    let bio = state.bio_generator.generate(&snapshot).await;
    state.session.write().await.set_bio(bio.clone());
    Json(BioResponse { bio })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::test_state;

    #[tokio::test]
    async fn test_get_profile_includes_completeness() {
        let Json(response) = handle_get_profile(State(test_state())).await;
        assert_eq!(response.profile.name, "Dr. Evelyn Reed");
        assert_eq!(response.completeness.score, 100);
        assert_eq!(
            response.orcid_url.as_deref(),
            Some("https://orcid.org/0000-0002-1825-0097")
        );
    }

    #[tokio::test]
    async fn test_patch_orcid_lowers_score() {
        let state = test_state();
        let Json(response) =
            handle_update_profile(State(state.clone()), Json(vec![ProfileUpdate::Orcid(None)]))
                .await
                .unwrap();
        assert_eq!(response.completeness.score, 80);
        assert_eq!(response.orcid_url, None);
    }

    #[tokio::test]
    async fn test_empty_patch_is_rejected() {
        let result = handle_update_profile(State(test_state()), Json(vec![])).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_replace_profile() {
        let state = test_state();
        let mut edited = state.session.read().await.profile().clone();
        edited.location.country = String::new();
        let Json(response) = handle_replace_profile(State(state.clone()), Json(edited)).await;
        assert_eq!(response.completeness.score, 80);
    }

    #[tokio::test]
    async fn test_generate_bio_stores_result() {
        let state = test_state();
        let Json(response) = handle_generate_bio(State(state.clone())).await;
        assert_eq!(response.bio, "Dr. Evelyn Reed is a researcher.");
        assert_eq!(
            state.session.read().await.profile().bio.as_deref(),
            Some("Dr. Evelyn Reed is a researcher.")
        );
    }
}
