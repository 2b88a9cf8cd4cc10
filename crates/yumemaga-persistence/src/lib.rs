//! Backing store for yumemaga workflows.
//!
//! Plays the role of the spreadsheet behind the HTTP collaborator: it keeps
//! one JSON document per scope, applies checklist writes, and expands the
//! completion action into the unit's status, its actual date, and any
//! derived scope columns. Files are written atomically (temp file, then
//! rename).
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use yumemaga_models::{ScopeId, UnitId};
//! use yumemaga_persistence::WorkflowStore;
//!
//! let store = WorkflowStore::new("/var/lib/yumemaga");
//! let today = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap();
//!
//! let unit = store
//!     .complete_unit(&ScopeId::from("contract-0042"), &UnitId::from("10"), today)
//!     .unwrap();
//! assert!(unit.is_completed());
//! ```

pub mod atomic;
pub mod derived;
pub mod error;
pub mod workflow_store;

pub use derived::{derived_updates, FieldUpdate, FieldValue, DERIVED_FIELDS};
pub use error::{PersistenceError, Result};
pub use workflow_store::WorkflowStore;
