//! Unit mutation handlers.
//!
//! Both mutations answer with the unit as stored after the write.

use axum::{extract::State, Json};

use yumemaga_models::{ChecklistItemId, Envelope, ScopeId, UnitId, UnitOfWork};
use yumemaga_progress as progress;

use crate::error::Result;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;
use crate::types::ChecklistRequest;

/// PUT /api/scopes/:scope/units/:unit/checklist/:item - Write one checklist item.
pub async fn set_checklist_item(
    State(state): State<AppState>,
    AppPath((scope, unit, item)): AppPath<(String, String, String)>,
    AppJson(req): AppJson<ChecklistRequest>,
) -> Result<Json<Envelope<UnitOfWork>>> {
    let (scope, unit, item) = (
        ScopeId::from(scope),
        UnitId::from(unit),
        ChecklistItemId::from(item),
    );
    let updated = state
        .with_store(move |store| store.set_checklist_item(&scope, &unit, &item, req.checked))
        .await?;
    Ok(Json(Envelope::ok(updated)))
}

/// POST /api/scopes/:scope/units/:unit/complete - Apply the completion action.
pub async fn complete_unit(
    State(state): State<AppState>,
    AppPath((scope, unit)): AppPath<(String, String)>,
) -> Result<Json<Envelope<UnitOfWork>>> {
    let (scope, unit) = (ScopeId::from(scope), UnitId::from(unit));
    let today = progress::today();
    let completed = state
        .with_store(move |store| store.complete_unit(&scope, &unit, today))
        .await?;
    Ok(Json(Envelope::ok(completed)))
}
