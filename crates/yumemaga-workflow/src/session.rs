//! A user's working view of one scope.

use chrono::NaiveDate;
use tracing::{info, warn};

use yumemaga_models::{ChecklistItemId, ScopeId, UnitId, Workflow};
use yumemaga_progress::{self as progress, DelayReport, Milestone, ProgressSummary};

use crate::backend::ProgressBackend;
use crate::error::{Result, WorkflowError};
use crate::tentative::{apply_tentatively, ChecklistToggle};

/// Snapshot of one scope plus the two mutations a user can trigger.
///
/// Mutations take `&mut self`, so one session cannot have two of them in
/// flight; that is the "disable the button while saving" rule.
pub struct WorkflowSession<B> {
    backend: B,
    scope: ScopeId,
    workflow: Workflow,
}

impl<B: ProgressBackend> WorkflowSession<B> {
    /// Fetches the scope and opens a session on it.
    pub async fn open(backend: B, scope: impl Into<ScopeId>) -> Result<Self> {
        let scope = scope.into();
        let workflow = backend.fetch(&scope).await?;
        Ok(Self {
            backend,
            scope,
            workflow,
        })
    }

    /// Replaces the snapshot with a fresh fetch.
    pub async fn refresh(&mut self) -> Result<()> {
        self.workflow = self.backend.fetch(&self.scope).await?;
        Ok(())
    }

    /// The scope this session tracks.
    pub fn scope(&self) -> &ScopeId {
        &self.scope
    }

    /// The current snapshot.
    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Sets a checklist item optimistically.
    ///
    /// The snapshot changes at once; if the backend rejects the write the
    /// item goes back to its previous value and the error is returned.
    pub async fn toggle_checklist(
        &mut self,
        unit: &UnitId,
        item: &ChecklistItemId,
        checked: bool,
    ) -> Result<()> {
        let toggle = ChecklistToggle {
            unit_id: unit.clone(),
            item_id: item.clone(),
            checked,
        };
        let backend = &self.backend;
        let scope = &self.scope;

        apply_tentatively(&mut self.workflow, &toggle, || {
            backend.set_checklist_item(scope, unit, item, checked)
        })
        .await
    }

    /// Applies the one-way completion action.
    ///
    /// Rejected without a backend call when the unit is already completed.
    /// On failure the snapshot is untouched. On success the stored unit
    /// replaces the local one, then the snapshot is refreshed so derived
    /// columns written by the backend become visible.
    pub async fn complete(&mut self, unit: &UnitId) -> Result<()> {
        let current = self
            .workflow
            .unit(unit)
            .ok_or_else(|| WorkflowError::NotFound(format!("unit {}", unit)))?;
        if current.is_completed() {
            return Err(WorkflowError::AlreadyCompleted(unit.to_string()));
        }

        let stored = match self.backend.complete_unit(&self.scope, unit).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(scope = %self.scope, unit = %unit, error = %e, "completion failed");
                return Err(e);
            }
        };
        info!(scope = %self.scope, unit = %unit, actual_date = ?stored.actual_date, "unit completed");

        if let Some(local) = self.workflow.unit_mut(unit) {
            *local = stored;
        }
        if let Err(e) = self.refresh().await {
            warn!(scope = %self.scope, error = %e, "refresh after completion failed, keeping stored unit");
        }
        Ok(())
    }

    /// Progress of the snapshot.
    pub fn progress(&self) -> ProgressSummary {
        progress::summarize(&self.workflow.units)
    }

    /// Late units of the snapshot.
    pub fn delays(&self, today: NaiveDate) -> Vec<DelayReport> {
        progress::delays(&self.workflow.units, today)
    }

    /// Next open milestone of the snapshot.
    pub fn next_milestone(&self, today: NaiveDate) -> Option<Milestone> {
        progress::next_milestone(&self.workflow.units, today)
    }
}
