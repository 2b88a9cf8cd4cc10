//! Core data models for the yumemaga operations tracker.
//!
//! This crate provides the fundamental data types shared by the progress
//! logic, the backing store, the HTTP service, and the client: units of work,
//! their statuses and checklists, the per-scope workflow collection, and the
//! `{success, data|error}` response envelope.

pub mod envelope;
pub mod ids;
pub mod status;
pub mod unit;
pub mod workflow;

// Re-export main types
pub use envelope::Envelope;
pub use ids::{ChecklistItemId, ScopeId, UnitId};
pub use status::{AttachmentStatus, UnitStatus, WorkflowKind};
pub use unit::{Attachment, ChecklistItem, UnitOfWork};
pub use workflow::Workflow;
