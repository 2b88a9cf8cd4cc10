//! Status enums for units of work and their attachments.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a unit of work.
///
/// Production processes use all four values. Contract steps use the
/// `pending | in_progress | completed` subset, where `pending` is read as
/// [`UnitStatus::NotStarted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    /// Work has not started yet.
    #[default]
    #[serde(alias = "pending")]
    NotStarted,
    /// Work is underway.
    InProgress,
    /// Work is finished. Terminal.
    Completed,
    /// Work is past its planned date. Set upstream, never derived here.
    Delayed,
}

impl UnitStatus {
    /// Returns true if no transition out of this status exists.
    pub fn is_terminal(&self) -> bool {
        matches!(self, UnitStatus::Completed)
    }

    /// Parses a status label as written in the spreadsheet or a query string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "not_started" | "pending" => Some(UnitStatus::NotStarted),
            "in_progress" => Some(UnitStatus::InProgress),
            "completed" => Some(UnitStatus::Completed),
            "delayed" => Some(UnitStatus::Delayed),
            _ => None,
        }
    }
}

/// The kind of workflow a scope tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
    /// Magazine production processes for one issue.
    #[default]
    Production,
    /// Contract workflow steps for one customer contract.
    Contract,
}

impl WorkflowKind {
    /// Returns the label this workflow uses for a status.
    pub fn status_label(&self, status: UnitStatus) -> &'static str {
        match (self, status) {
            (WorkflowKind::Contract, UnitStatus::NotStarted) => "pending",
            (_, UnitStatus::NotStarted) => "not_started",
            (_, UnitStatus::InProgress) => "in_progress",
            (_, UnitStatus::Completed) => "completed",
            (_, UnitStatus::Delayed) => "delayed",
        }
    }
}

/// Presence of an uploaded file attached to a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentStatus {
    /// A file has been uploaded.
    Submitted,
    /// A file is expected but missing.
    Pending,
    /// Nothing is expected.
    #[default]
    None,
}
