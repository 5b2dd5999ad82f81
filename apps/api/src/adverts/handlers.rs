use axum::{extract::State, http::StatusCode, Json};

use crate::errors::AppError;
use crate::models::advert::{Advert, NewAdvert};
use crate::state::AppState;

/// GET /api/v1/adverts
pub async fn handle_list_adverts(State(state): State<AppState>) -> Json<Vec<Advert>> {
    let session = state.session.read().await;
    Json(session.adverts().to_vec())
}

/// POST /api/v1/adverts
///
/// Newest first. Type defaults to CFP and tier to Free.
pub async fn handle_create_advert(
    State(state): State<AppState>,
    Json(new): Json<NewAdvert>,
) -> Result<(StatusCode, Json<Advert>), AppError> {
    let mut session = state.session.write().await;
    let created = session.add_advert(new)?.clone();
    Ok((StatusCode::CREATED, Json(created)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::advert::{AdvertType, PromoLevel};
    use crate::state::test_support::test_state;

    #[tokio::test]
    async fn test_create_advert_goes_first() {
        let state = test_state();
        let (status, Json(created)) = handle_create_advert(
            State(state.clone()),
            Json(NewAdvert {
                creator: "Nature".to_string(),
                title: "Special Issue on Robotics".to_string(),
                content: "Submissions open.".to_string(),
                advert_type: AdvertType::Journal,
                promo_level: PromoLevel::Featured,
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert!(created.id.starts_with("ad-"));

        let Json(all) = handle_list_adverts(State(state)).await;
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], created);
    }

    #[tokio::test]
    async fn test_blank_content_is_rejected() {
        let state = test_state();
        let result = handle_create_advert(
            State(state.clone()),
            Json(NewAdvert {
                creator: "Press".to_string(),
                title: "Call".to_string(),
                content: "   ".to_string(),
                ..Default::default()
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(state.session.read().await.adverts().len(), 2);
    }
}
