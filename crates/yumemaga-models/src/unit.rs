//! Unit of work types.
//!
//! A unit of work is one production process of an issue or one step of a
//! contract workflow. Units are seeded out-of-band; after that they change
//! only through checklist toggles and the one-way completion action.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::{ChecklistItemId, UnitId};
use crate::status::{AttachmentStatus, UnitStatus};

/// A single checklist entry. Display order is the order in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ChecklistItemId,
    pub text: String,
    #[serde(default)]
    pub checked: bool,
}

impl ChecklistItem {
    /// Creates an unchecked item with a generated ID.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ChecklistItemId::new(),
            text: text.into(),
            checked: false,
        }
    }

    /// Creates an unchecked item with a known ID.
    pub fn with_id(id: impl Into<ChecklistItemId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            checked: false,
        }
    }
}

/// Required data or a deliverable attached to a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    #[serde(default)]
    pub status: AttachmentStatus,
}

/// A trackable step or production process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitOfWork {
    /// Process number (`A-3`) or step number (`10`).
    pub id: UnitId,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Explicit grouping; falls back to the id prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default)]
    pub status: UnitStatus,

    /// Raw planned date as entered (`2025-11-18`, `11/18`, `-`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_date: Option<String>,

    /// Set only by completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_date: Option<NaiveDate>,

    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_data: Vec<Attachment>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deliverables: Vec<Attachment>,
}

impl UnitOfWork {
    /// Creates a not-started unit with no planned date.
    pub fn new(id: impl Into<UnitId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            status: UnitStatus::NotStarted,
            planned_date: None,
            actual_date: None,
            checklist: Vec::new(),
            required_data: Vec::new(),
            deliverables: Vec::new(),
        }
    }

    /// Sets the status.
    pub fn with_status(mut self, status: UnitStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the raw planned date.
    pub fn with_planned_date(mut self, planned: impl Into<String>) -> Self {
        self.planned_date = Some(planned.into());
        self
    }

    /// Sets an explicit category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Appends a checklist item.
    pub fn with_checklist_item(mut self, item: ChecklistItem) -> Self {
        self.checklist.push(item);
        self
    }

    /// Returns true once the completion action has been applied.
    pub fn is_completed(&self) -> bool {
        self.status == UnitStatus::Completed
    }

    /// Returns the grouping key: the explicit category, else the id up to
    /// the first `-` (`A-3` -> `A`), else the whole id.
    pub fn category(&self) -> &str {
        if let Some(ref category) = self.category {
            return category;
        }
        let id = self.id.as_str();
        match id.split_once('-') {
            Some((prefix, _)) if !prefix.is_empty() => prefix,
            _ => id,
        }
    }

    /// Looks up a checklist item.
    pub fn checklist_item(&self, item_id: &ChecklistItemId) -> Option<&ChecklistItem> {
        self.checklist.iter().find(|item| &item.id == item_id)
    }

    /// Sets a checklist item and returns its previous value.
    ///
    /// Returns `None` when the item does not exist. Idempotent.
    pub fn set_checklist_item(&mut self, item_id: &ChecklistItemId, checked: bool) -> Option<bool> {
        let item = self.checklist.iter_mut().find(|item| &item.id == item_id)?;
        let previous = item.checked;
        item.checked = checked;
        Some(previous)
    }

    /// Number of checked items.
    pub fn checked_count(&self) -> usize {
        self.checklist.iter().filter(|item| item.checked).count()
    }

    /// Marks the unit completed on `today`.
    ///
    /// Completion is one-way: returns `false` and changes nothing when the
    /// unit is already completed. Unchecked checklist items do not block it.
    pub fn complete(&mut self, today: NaiveDate) -> bool {
        if self.is_completed() {
            return false;
        }
        self.status = UnitStatus::Completed;
        self.actual_date = Some(today);
        true
    }
}
