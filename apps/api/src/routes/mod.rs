pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::adverts::handlers as adverts;
use crate::cv::handlers as cv;
use crate::directory::handlers as directory;
use crate::preferences::handlers as preferences;
use crate::profile::handlers as profile;
use crate::publications::handlers as publications;
use crate::state::AppState;

/// Attachments and bibliography files are buffered in memory.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile)
                .put(profile::handle_replace_profile)
                .patch(profile::handle_update_profile),
        )
        .route(
            "/api/v1/profile/completeness",
            get(profile::handle_get_completeness),
        )
        .route("/api/v1/profile/bio", post(profile::handle_generate_bio))
        // CV
        .route("/api/v1/cv", get(cv::handle_get_cv))
        .route("/api/v1/cv/preview", get(cv::handle_preview_cv))
        .route("/api/v1/cv/download", get(cv::handle_download_cv))
        // Publications
        .route(
            "/api/v1/publications",
            get(publications::handle_list_publications)
                .post(publications::handle_create_publication),
        )
        .route(
            "/api/v1/publications/import",
            post(publications::handle_import_publications),
        )
        .route(
            "/api/v1/publications/:id",
            put(publications::handle_update_publication),
        )
        .route(
            "/api/v1/publications/:id/visibility",
            patch(publications::handle_set_visibility),
        )
        .route(
            "/api/v1/publications/:id/files",
            post(publications::handle_upload_file),
        )
        .route(
            "/api/v1/publications/:id/files/:file_id",
            get(publications::handle_download_file),
        )
        .route(
            "/api/v1/publications/:id/share",
            get(publications::handle_share_links),
        )
        // Adverts
        .route(
            "/api/v1/adverts",
            get(adverts::handle_list_adverts).post(adverts::handle_create_advert),
        )
        // Directory
        .route("/api/v1/directory", get(directory::handle_search_directory))
        // Preferences
        .route(
            "/api/v1/preferences/theme",
            get(preferences::handle_get_theme),
        )
        .route(
            "/api/v1/preferences/theme/toggle",
            post(preferences::handle_toggle_theme),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::state::test_support::test_state;

    const BOUNDARY: &str = "scholar-test-boundary";

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(uri: &str, file_name: &str, content_type: &str, contents: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n\
             {contents}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state());
        let response = send(&app, get_request("/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "scholar-api");
    }

    #[tokio::test]
    async fn test_profile_patch_updates_completeness() {
        let app = build_router(test_state());
        let before = json_body(send(&app, get_request("/api/v1/profile")).await).await;
        assert_eq!(before["completeness"]["score"], 100);

        let response = send(
            &app,
            json_request(
                Method::PATCH,
                "/api/v1/profile",
                json!([{ "field": "orcid", "value": null }]),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let after = json_body(response).await;
        assert_eq!(after["completeness"]["score"], 80);
        assert_eq!(after["orcid_url"], Value::Null);
    }

    #[tokio::test]
    async fn test_empty_patch_is_bad_request() {
        let app = build_router(test_state());
        let response = send(&app, json_request(Method::PATCH, "/api/v1/profile", json!([]))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_publication_is_not_found() {
        let app = build_router(test_state());
        let response = send(&app, get_request("/api/v1/publications/pub-nope/share")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_generate_bio_is_stored() {
        let app = build_router(test_state());
        let response = send(
            &app,
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/profile/bio")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await["bio"],
            "Dr. Evelyn Reed is a researcher."
        );

        let profile = json_body(send(&app, get_request("/api/v1/profile")).await).await;
        assert_eq!(profile["profile"]["bio"], "Dr. Evelyn Reed is a researcher.");
    }

    #[tokio::test]
    async fn test_import_bibtex_upload() {
        let app = build_router(test_state());
        let bib = "@inproceedings{r25, author = {Reed, Evelyn}, title = {Edge {LLMs}}, booktitle = {ICML}, year = {2025}}";
        let response = send(
            &app,
            multipart_request(
                "/api/v1/publications/import",
                "refs.bib",
                "application/x-bibtex",
                bib,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["imported"][0]["title"], "Edge LLMs");
        assert_eq!(body["imported"][0]["pub_type"], "conference");

        let list = json_body(send(&app, get_request("/api/v1/publications")).await).await;
        assert_eq!(list.as_array().map(Vec::len), Some(4));
        assert_eq!(list[0]["title"], "Edge LLMs");
    }

    #[tokio::test]
    async fn test_import_unknown_format_is_rejected() {
        let app = build_router(test_state());
        let response = send(
            &app,
            multipart_request(
                "/api/v1/publications/import",
                "notes.txt",
                "text/plain",
                "just notes",
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_import_bib_without_entries_is_unprocessable() {
        let app = build_router(test_state());
        let response = send(
            &app,
            multipart_request(
                "/api/v1/publications/import",
                "empty.bib",
                "application/x-bibtex",
                "% exported with no entries",
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let list = json_body(send(&app, get_request("/api/v1/publications")).await).await;
        assert_eq!(list.as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_upload_then_download_attachment() {
        let state = test_state();
        let id = state.session.read().await.publications()[0].id.clone();
        let app = build_router(state);

        let response = send(
            &app,
            multipart_request(
                &format!("/api/v1/publications/{id}/files"),
                "data.csv",
                "text/csv",
                "a,b\n1,2",
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let attachment = json_body(response).await;
        assert_eq!(attachment["file_name"], "data.csv");
        assert_eq!(attachment["size"], 7);
        let file_id = attachment["id"].as_str().unwrap().to_string();

        let response = send(
            &app,
            get_request(&format!("/api/v1/publications/{id}/files/{file_id}")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"a,b\n1,2");
    }

    #[tokio::test]
    async fn test_directory_query() {
        let app = build_router(test_state());
        let body =
            json_body(send(&app, get_request("/api/v1/directory?country=Japan")).await).await;
        assert_eq!(body["researchers"][0]["name"], "Dr. Kenji Tanaka");
        assert_eq!(body["states"], json!(["Tokyo"]));
    }

    #[tokio::test]
    async fn test_theme_toggle_round_trip() {
        let app = build_router(test_state());
        let initial = json_body(send(&app, get_request("/api/v1/preferences/theme")).await).await;
        assert_eq!(initial["theme"], "light");
        assert_eq!(initial["stored"], false);

        let toggled = send(
            &app,
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/preferences/theme/toggle")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        let toggled = json_body(toggled).await;
        assert_eq!(toggled["theme"], "dark");

        let after = json_body(send(&app, get_request("/api/v1/preferences/theme")).await).await;
        assert_eq!(after["theme"], "dark");
        assert_eq!(after["stored"], true);
    }

    #[tokio::test]
    async fn test_cv_download_is_markdown_attachment() {
        let app = build_router(test_state());
        let response = send(&app, get_request("/api/v1/cv/download?template=ieee")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("cv.md"));
    }
}
