//! Optimistic local mutations with rollback.
//!
//! The local view changes first so the user sees the effect at once; the
//! remote write follows, and if it fails the local change is inverted.

use std::future::Future;

use tracing::warn;

use yumemaga_models::{ChecklistItemId, UnitId, Workflow};

use crate::error::{Result, WorkflowError};

/// A local change that can be undone.
pub trait TentativeMutation<T> {
    /// What `revert` needs to restore the prior state.
    type Undo;

    /// Applies the change locally.
    fn apply(&self, target: &mut T) -> Result<Self::Undo>;

    /// Restores the state from before `apply`.
    fn revert(&self, target: &mut T, undo: Self::Undo);
}

/// Applies `mutation` to `target`, then awaits `persist`.
///
/// On a persistence failure the mutation is reverted and the error is
/// returned; `target` then equals its value before the call.
pub async fn apply_tentatively<T, M, F, Fut>(target: &mut T, mutation: &M, persist: F) -> Result<()>
where
    M: TentativeMutation<T>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let undo = mutation.apply(target)?;

    match persist().await {
        Ok(()) => Ok(()),
        Err(e) => {
            warn!(error = %e, "remote write failed, reverting local change");
            mutation.revert(target, undo);
            Err(e)
        }
    }
}

/// Sets one checklist item of one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistToggle {
    pub unit_id: UnitId,
    pub item_id: ChecklistItemId,
    pub checked: bool,
}

impl TentativeMutation<Workflow> for ChecklistToggle {
    type Undo = bool;

    fn apply(&self, target: &mut Workflow) -> Result<bool> {
        let unit = target
            .unit_mut(&self.unit_id)
            .ok_or_else(|| WorkflowError::NotFound(format!("unit {}", self.unit_id)))?;
        unit.set_checklist_item(&self.item_id, self.checked)
            .ok_or_else(|| {
                WorkflowError::NotFound(format!("checklist item {} of unit {}", self.item_id, self.unit_id))
            })
    }

    fn revert(&self, target: &mut Workflow, previous: bool) {
        if let Some(unit) = target.unit_mut(&self.unit_id) {
            unit.set_checklist_item(&self.item_id, previous);
        }
    }
}
