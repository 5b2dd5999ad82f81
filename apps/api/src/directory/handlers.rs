use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::directory::filter::{country_options, filter_directory, state_options, DirectoryFilter};
use crate::models::profile::ResearcherProfile;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct DirectoryResponse {
    pub researchers: Vec<ResearcherProfile>,
    pub countries: Vec<String>,
    /// States available for the selected country; empty without one.
    pub states: Vec<String>,
    pub filter: DirectoryFilter,
}

/// GET /api/v1/directory?country=&state=&interest=
pub async fn handle_search_directory(
    State(state): State<AppState>,
    Query(mut filter): Query<DirectoryFilter>,
) -> Json<DirectoryResponse> {
    let session = state.session.read().await;
    let directory = session.directory();
    filter.reconcile_state(directory);

    Json(DirectoryResponse {
        researchers: filter_directory(directory, &filter)
            .into_iter()
            .cloned()
            .collect(),
        countries: country_options(directory),
        states: state_options(directory, filter.country.as_deref()),
        filter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::test_state;

    #[tokio::test]
    async fn test_search_by_country_lists_states() {
        let Json(response) = handle_search_directory(
            State(test_state()),
            Query(DirectoryFilter {
                country: Some("Spain".to_string()),
                ..Default::default()
            }),
        )
        .await;
        assert_eq!(response.researchers.len(), 1);
        assert_eq!(response.states, vec!["Madrid"]);
        assert_eq!(response.countries.len(), 3);
    }

    #[tokio::test]
    async fn test_switching_country_clears_stale_state() {
        let Json(response) = handle_search_directory(
            State(test_state()),
            Query(DirectoryFilter {
                country: Some("Japan".to_string()),
                state: Some("California".to_string()),
                ..Default::default()
            }),
        )
        .await;
        let names: Vec<&str> = response.researchers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Dr. Kenji Tanaka"]);
        assert_eq!(response.filter.state, None);
        assert_eq!(response.filter.country.as_deref(), Some("Japan"));
        assert_eq!(response.states, vec!["Tokyo"]);
    }
}
