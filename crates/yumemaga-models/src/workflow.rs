//! A scope's collection of units.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::{ScopeId, UnitId};
use crate::status::WorkflowKind;
use crate::unit::UnitOfWork;

/// All units tracked for one scope (an issue month or a contract), plus the
/// scope-level columns that completion may write into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub scope_id: ScopeId,

    #[serde(default)]
    pub kind: WorkflowKind,

    #[serde(default)]
    pub title: String,

    /// Scope-level columns, e.g. `payment_received_date`.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,

    #[serde(default)]
    pub units: Vec<UnitOfWork>,
}

impl Workflow {
    /// Creates an empty workflow.
    pub fn new(scope_id: impl Into<ScopeId>, kind: WorkflowKind) -> Self {
        Self {
            scope_id: scope_id.into(),
            kind,
            title: String::new(),
            fields: BTreeMap::new(),
            units: Vec::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Appends a unit.
    pub fn with_unit(mut self, unit: UnitOfWork) -> Self {
        self.units.push(unit);
        self
    }

    /// Looks up a unit by ID.
    pub fn unit(&self, id: &UnitId) -> Option<&UnitOfWork> {
        self.units.iter().find(|u| &u.id == id)
    }

    /// Looks up a unit by ID for mutation.
    pub fn unit_mut(&mut self, id: &UnitId) -> Option<&mut UnitOfWork> {
        self.units.iter_mut().find(|u| &u.id == id)
    }
}
