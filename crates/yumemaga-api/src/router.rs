//! Router configuration and server setup.

use axum::{
    http::{HeaderValue, Uri},
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %o, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}

/// Creates the API router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        // Health
        .route("/api/health", get(handlers::health))
        // Scopes
        .route("/api/scopes", get(handlers::list_scopes))
        .route("/api/scopes/:scope", get(handlers::get_scope))
        .route("/api/scopes/:scope/progress", get(handlers::get_progress))
        // Units
        .route(
            "/api/scopes/:scope/units/:unit/checklist/:item",
            put(handlers::set_checklist_item),
        )
        .route(
            "/api/scopes/:scope/units/:unit/complete",
            post(handlers::complete_unit),
        )
        .fallback(route_not_found)
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state)
}

/// Starts the API server.
pub async fn serve(config: ApiConfig, state: AppState) -> Result<(), std::io::Error> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, data_dir = %config.data_dir.display(), "API server listening");
    axum::serve(listener, create_router(state)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use tempfile::{tempdir, TempDir};
    use yumemaga_models::{
        ChecklistItem, ScopeId, UnitOfWork, UnitStatus, Workflow, WorkflowKind,
    };

    fn make_server() -> (TestServer, AppState, TempDir) {
        let dir = tempdir().unwrap();
        let state = AppState::from_config(ApiConfig::default().with_data_dir(dir.path()));

        state
            .store
            .save(
                &Workflow::new("2025-11", WorkflowKind::Production)
                    .with_title("November issue")
                    .with_unit(UnitOfWork::new("A-1", "Plan").with_status(UnitStatus::Completed))
                    .with_unit(
                        UnitOfWork::new("A-2", "Interview")
                            .with_status(UnitStatus::Delayed)
                            .with_planned_date("2025-10-01")
                            .with_checklist_item(ChecklistItem::with_id("c1", "Book studio")),
                    ),
            )
            .unwrap();
        state
            .store
            .save(
                &Workflow::new("contract-8", WorkflowKind::Contract)
                    .with_unit(UnitOfWork::new("9", "Invoice").with_status(UnitStatus::Completed))
                    .with_unit(UnitOfWork::new("10", "Payment")),
            )
            .unwrap();

        let server = TestServer::new(create_router(state.clone())).unwrap();
        (server, state, dir)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (server, _state, _dir) = make_server();

        let response = server.get("/api/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "ok");
        assert!(!body["data"]["version"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_scopes() {
        let (server, _state, _dir) = make_server();

        let body: Value = server.get("/api/scopes").await.json();
        assert_eq!(body["data"]["total"], 2);
        assert_eq!(body["data"]["scopes"], json!(["2025-11", "contract-8"]));
    }

    #[tokio::test]
    async fn test_get_scope() {
        let (server, _state, _dir) = make_server();

        let response = server.get("/api/scopes/2025-11").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["scopeId"], "2025-11");
        assert_eq!(body["data"]["units"][1]["status"], "delayed");
        assert_eq!(body["data"]["units"][1]["plannedDate"], "2025-10-01");
    }

    #[tokio::test]
    async fn test_unknown_scope() {
        let (server, _state, _dir) = make_server();

        let response = server.get("/api/scopes/2030-01").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("not found"));
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_invalid_scope_id() {
        let (server, _state, _dir) = make_server();

        let response = server.get("/api/scopes/.hidden").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_progress_report() {
        let (server, _state, _dir) = make_server();

        let response = server.get("/api/scopes/2025-11/progress?today=2025-10-15").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["kind"], "production");
        assert_eq!(body["data"]["summary"]["progressRate"], 50);
        assert_eq!(body["data"]["delayed"][0]["delayDays"], 14);
    }

    #[tokio::test]
    async fn test_progress_report_bad_date() {
        let (server, _state, _dir) = make_server();

        let response = server.get("/api/scopes/2025-11/progress?today=10/15").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_set_checklist_item() {
        let (server, state, _dir) = make_server();

        let response = server
            .put("/api/scopes/2025-11/units/A-2/checklist/c1")
            .json(&json!({ "checked": true }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["checklist"][0]["checked"], true);

        let stored = state.store.load(&ScopeId::from("2025-11")).unwrap();
        assert!(stored.units[1].checklist[0].checked);
    }

    #[tokio::test]
    async fn test_set_unknown_checklist_item() {
        let (server, _state, _dir) = make_server();

        let response = server
            .put("/api/scopes/2025-11/units/A-2/checklist/zz")
            .json(&json!({ "checked": true }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_complete_writes_derived_fields() {
        let (server, state, _dir) = make_server();

        let response = server.post("/api/scopes/contract-8/units/10/complete").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["status"], "completed");
        assert!(body["data"]["actualDate"].is_string());

        let stored = state.store.load(&ScopeId::from("contract-8")).unwrap();
        assert_eq!(stored.fields["payment_status"], "入金済");
        assert!(stored.fields.contains_key("payment_received_date"));
    }

    #[tokio::test]
    async fn test_complete_twice_conflicts() {
        let (server, _state, _dir) = make_server();

        server
            .post("/api/scopes/contract-8/units/10/complete")
            .await
            .assert_status_ok();

        let response = server.post("/api/scopes/contract-8/units/10/complete").await;
        response.assert_status(StatusCode::CONFLICT);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("already completed"));
    }

    #[tokio::test]
    async fn test_malformed_checklist_body_is_enveloped() {
        let (server, state, _dir) = make_server();

        let response = server
            .put("/api/scopes/2025-11/units/A-2/checklist/c1")
            .json(&json!({ "checked": "yes" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("bad request"));
        assert!(body.get("data").is_none());

        let stored = state.store.load(&ScopeId::from("2025-11")).unwrap();
        assert!(!stored.units[1].checklist[0].checked);
    }

    #[tokio::test]
    async fn test_missing_checked_field_is_enveloped() {
        let (server, _state, _dir) = make_server();

        let response = server
            .put("/api/scopes/2025-11/units/A-2/checklist/c1")
            .json(&json!({}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("checked"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_enveloped() {
        let (server, _state, _dir) = make_server();

        let response = server.get("/api/nope").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "not found: no route for /api/nope");
    }

    #[tokio::test]
    async fn test_cors_headers() {
        let (server, _state, _dir) = make_server();

        let response = server.get("/api/health").await;

        assert!(response.headers().contains_key("access-control-allow-origin"));
    }
}
