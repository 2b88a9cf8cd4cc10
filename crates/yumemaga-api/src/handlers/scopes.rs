//! Scope handlers.

use axum::{extract::State, Json};
use chrono::NaiveDate;

use yumemaga_models::{Envelope, ScopeId, Workflow};
use yumemaga_progress as progress;
use yumemaga_workflow::ScopeReport;

use crate::error::{ApiError, Result};
use crate::extract::{AppPath, AppQuery};
use crate::state::AppState;
use crate::types::{ProgressQuery, ScopeListResponse};

/// GET /api/scopes - List stored scopes.
pub async fn list_scopes(State(state): State<AppState>) -> Result<Json<Envelope<ScopeListResponse>>> {
    let scopes = state.with_store(|store| store.list_scopes()).await?;
    Ok(Json(Envelope::ok(ScopeListResponse::from(scopes))))
}

/// GET /api/scopes/:scope - Fetch every unit of a scope.
pub async fn get_scope(
    State(state): State<AppState>,
    AppPath(scope): AppPath<String>,
) -> Result<Json<Envelope<Workflow>>> {
    let scope = ScopeId::from(scope);
    let workflow = state.with_store(move |store| store.load(&scope)).await?;
    Ok(Json(Envelope::ok(workflow)))
}

/// GET /api/scopes/:scope/progress - Read model for the scope's kind.
pub async fn get_progress(
    State(state): State<AppState>,
    AppPath(scope): AppPath<String>,
    AppQuery(query): AppQuery<ProgressQuery>,
) -> Result<Json<Envelope<ScopeReport>>> {
    let today = match query.today.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| ApiError::BadRequest(format!("invalid date: {}", raw)))?,
        None => progress::today(),
    };

    let scope = ScopeId::from(scope);
    let workflow = state.with_store(move |store| store.load(&scope)).await?;
    Ok(Json(Envelope::ok(ScopeReport::build(&workflow, today))))
}
