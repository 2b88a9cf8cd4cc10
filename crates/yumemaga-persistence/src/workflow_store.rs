//! Workflow store.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use yumemaga_models::{ChecklistItemId, ScopeId, UnitId, UnitOfWork, Workflow};

use crate::atomic::{atomic_write_json, read_json, read_json_optional};
use crate::derived::derived_updates;
use crate::error::{PersistenceError, Result};

/// Stands in for the spreadsheet: one JSON file per scope.
///
/// ```text
/// base_path/
/// └── workflows/
///     ├── 2025-11.json
///     └── contract-0042.json
/// ```
///
/// Mutations read the file, change a copy, and write it back atomically.
/// They are serialized within the process; across processes the last
/// write wins.
pub struct WorkflowStore {
    base_path: PathBuf,
    write_lock: Mutex<()>,
}

impl WorkflowStore {
    /// Creates a new WorkflowStore with the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn workflows_dir(&self) -> PathBuf {
        self.base_path.join("workflows")
    }

    fn workflow_path(&self, scope_id: &ScopeId) -> PathBuf {
        self.workflows_dir().join(format!("{}.json", scope_id))
    }

    fn validate_scope(scope_id: &ScopeId) -> Result<()> {
        let s = scope_id.as_str();
        if s.is_empty() || s.contains(['/', '\\']) || s.starts_with('.') {
            return Err(PersistenceError::InvalidData(format!(
                "invalid scope id: {:?}",
                s
            )));
        }
        Ok(())
    }

    /// Saves a workflow, replacing any existing one for the scope.
    pub fn save(&self, workflow: &Workflow) -> Result<()> {
        Self::validate_scope(&workflow.scope_id)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| PersistenceError::LockPoisoned(e.to_string()))?;
        atomic_write_json(&self.workflow_path(&workflow.scope_id), workflow)
    }

    /// Loads a workflow by scope.
    pub fn load(&self, scope_id: &ScopeId) -> Result<Workflow> {
        self.load_optional(scope_id)?
            .ok_or_else(|| PersistenceError::not_found("scope", scope_id))
    }

    /// Loads a workflow, returning None if the scope is unknown.
    pub fn load_optional(&self, scope_id: &ScopeId) -> Result<Option<Workflow>> {
        Self::validate_scope(scope_id)?;
        read_json_optional(&self.workflow_path(scope_id))
    }

    /// Lists stored scopes, sorted.
    pub fn list_scopes(&self) -> Result<Vec<ScopeId>> {
        let dir = self.workflows_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir).map_err(|source| PersistenceError::ReadError {
            path: dir.clone(),
            source,
        })?;

        let mut scopes = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| PersistenceError::ReadError {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    scopes.push(ScopeId::from(stem));
                }
            }
        }
        scopes.sort();
        Ok(scopes)
    }

    /// Loads every stored workflow, skipping unreadable files.
    pub fn load_all(&self) -> Result<Vec<Workflow>> {
        let mut workflows = Vec::new();
        for scope in self.list_scopes()? {
            match read_json::<Workflow>(&self.workflow_path(&scope)) {
                Ok(wf) => workflows.push(wf),
                Err(e) => warn!(scope = %scope, error = %e, "skipping unreadable workflow"),
            }
        }
        Ok(workflows)
    }

    /// Deletes a workflow.
    pub fn delete(&self, scope_id: &ScopeId) -> Result<()> {
        Self::validate_scope(scope_id)?;
        let path = self.workflow_path(scope_id);
        if path.exists() {
            fs::remove_file(&path).map_err(|source| PersistenceError::WriteError { path, source })?;
        }
        Ok(())
    }

    /// Sets one checklist item. Idempotent.
    pub fn set_checklist_item(
        &self,
        scope_id: &ScopeId,
        unit_id: &UnitId,
        item_id: &ChecklistItemId,
        checked: bool,
    ) -> Result<UnitOfWork> {
        self.update(scope_id, |wf| {
            let unit = wf
                .unit_mut(unit_id)
                .ok_or_else(|| PersistenceError::not_found("unit", unit_id))?;
            unit.set_checklist_item(item_id, checked)
                .ok_or_else(|| PersistenceError::not_found("checklist item", item_id))?;
            debug!(scope = %scope_id, unit = %unit_id, item = %item_id, checked, "checklist item set");
            Ok(unit.clone())
        })
    }

    /// Applies the completion action to a unit.
    ///
    /// Sets `actualDate` to `today`, `status` to completed, and writes the
    /// scope columns declared in [`crate::derived::DERIVED_FIELDS`]. Either
    /// all of it is stored or none of it is. Rejected for a unit that is
    /// already completed.
    pub fn complete_unit(
        &self,
        scope_id: &ScopeId,
        unit_id: &UnitId,
        today: NaiveDate,
    ) -> Result<UnitOfWork> {
        self.update(scope_id, |wf| {
            let kind = wf.kind;
            let unit = wf
                .unit_mut(unit_id)
                .ok_or_else(|| PersistenceError::not_found("unit", unit_id))?;

            if !unit.complete(today) {
                return Err(PersistenceError::AlreadyCompleted {
                    unit: unit_id.to_string(),
                });
            }
            let completed = unit.clone();

            for update in derived_updates(kind, unit_id) {
                wf.fields
                    .insert(update.column.to_string(), update.value.render(today));
            }

            info!(scope = %scope_id, unit = %unit_id, %today, "unit completed");
            Ok(completed)
        })
    }

    /// Read-modify-write under the write lock. Nothing is written when
    /// `apply` fails.
    fn update<T>(
        &self,
        scope_id: &ScopeId,
        apply: impl FnOnce(&mut Workflow) -> Result<T>,
    ) -> Result<T> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| PersistenceError::LockPoisoned(e.to_string()))?;

        let mut workflow = self.load(scope_id)?;
        let result = apply(&mut workflow)?;
        atomic_write_json(&self.workflow_path(scope_id), &workflow)?;
        Ok(result)
    }
}
