//! Request DTOs for the API.

use serde::Deserialize;

/// Body of a checklist write.
#[derive(Debug, Clone, Deserialize)]
pub struct ChecklistRequest {
    pub checked: bool,
}

/// Query parameters of the progress report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressQuery {
    /// Evaluation date (`YYYY-MM-DD`); defaults to the local date.
    pub today: Option<String>,
}
