//! Transitions and read models for yumemaga scopes.
//!
//! - **backend**: the [`ProgressBackend`] seam to persistence
//! - **http**: [`HttpBackend`], the envelope-speaking HTTP client
//! - **tentative**: optimistic mutations that roll back on failure
//! - **session**: [`WorkflowSession`], checklist toggles and completion
//! - **read_model**: per-scope reports and the multi-scope [`Dashboard`]

pub mod backend;
pub mod error;
pub mod http;
pub mod read_model;
pub mod session;
pub mod tentative;

pub use backend::ProgressBackend;
pub use error::{Result, WorkflowError};
pub use http::{HttpBackend, API_URL_ENV, DEFAULT_API_URL};
pub use read_model::{
    ContractReminders, Dashboard, NextStep, ProductionProgress, ScopeFailure, ScopeReport,
    PAYMENT_STATUS_FIELD,
};
pub use session::WorkflowSession;
pub use tentative::{apply_tentatively, ChecklistToggle, TentativeMutation};
