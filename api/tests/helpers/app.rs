use api::routes::routes;
use axum::{Router, body::Body, http::Request, response::Response};
use common::{attachments::AttachmentStore, config::AppConfig, state::AppState};
use serde_json::Value;
use std::convert::Infallible;
use tower::ServiceExt;
use tower::util::BoxCloneService;

pub type TestApp = BoxCloneService<Request<Body>, Response, Infallible>;

/// Installs a fixed test configuration so nothing reads the real environment.
pub fn init_test_config() {
    AppConfig::override_config(AppConfig {
        env: "test".into(),
        project_name: "helpdesk-api".into(),
        log_level: "api=debug".into(),
        log_file: "api.log".into(),
        log_to_stdout: false,
        database_path: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "test-secret".into(),
        jwt_duration_minutes: 60,
        attachment_store_url: String::new(),
    });
}

/// App over a fresh in-memory database with the attachment store disabled.
pub async fn make_test_app() -> (TestApp, AppState) {
    make_test_app_with_attachments(AttachmentStore::disabled()).await
}

/// Same, but with a caller-supplied attachment store so failure paths can be
/// exercised.
pub async fn make_test_app_with_attachments(attachments: AttachmentStore) -> (TestApp, AppState) {
    init_test_config();

    let db = db::test_utils::setup_test_db().await;
    let app_state = AppState::new(db, attachments);

    let router = Router::new().nest("/api", routes(app_state.clone()));

    (router.into_service().boxed_clone(), app_state)
}

pub async fn get_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
