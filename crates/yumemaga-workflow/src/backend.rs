//! The persistence seam.

use std::sync::Arc;

use async_trait::async_trait;

use yumemaga_models::{ChecklistItemId, ScopeId, UnitId, UnitOfWork, Workflow};

use crate::error::Result;

/// The external collaborator that owns persistence.
///
/// Each method is exactly one outbound call. Expanding a completion into
/// the actual date, the status, and derived columns is the backend's job.
#[async_trait]
pub trait ProgressBackend: Send + Sync {
    /// Fetches a fresh snapshot of a scope.
    async fn fetch(&self, scope: &ScopeId) -> Result<Workflow>;

    /// Writes one checklist item.
    async fn set_checklist_item(
        &self,
        scope: &ScopeId,
        unit: &UnitId,
        item: &ChecklistItemId,
        checked: bool,
    ) -> Result<()>;

    /// Applies the completion action to a unit and returns the unit as
    /// stored, with its actual date stamped by the backend.
    async fn complete_unit(&self, scope: &ScopeId, unit: &UnitId) -> Result<UnitOfWork>;
}

#[async_trait]
impl<B: ProgressBackend + ?Sized> ProgressBackend for Arc<B> {
    async fn fetch(&self, scope: &ScopeId) -> Result<Workflow> {
        (**self).fetch(scope).await
    }

    async fn set_checklist_item(
        &self,
        scope: &ScopeId,
        unit: &UnitId,
        item: &ChecklistItemId,
        checked: bool,
    ) -> Result<()> {
        (**self).set_checklist_item(scope, unit, item, checked).await
    }

    async fn complete_unit(&self, scope: &ScopeId, unit: &UnitId) -> Result<UnitOfWork> {
        (**self).complete_unit(scope, unit).await
    }
}
