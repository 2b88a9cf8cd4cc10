//! The `{success, data|error}` wrapper used by every HTTP collaborator.

use serde::{Deserialize, Serialize};

/// JSON response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Successful envelope carrying data.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Successful envelope without data.
    pub fn ok_empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    /// Failed envelope with a message.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Converts into a result, keeping the error message on failure.
    ///
    /// A successful envelope with no data yields `Ok(None)`.
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self
                .error
                .unwrap_or_else(|| "request failed without an error message".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Workflow, WorkflowKind};
    use serde_json::json;

    #[test]
    fn test_ok_serializes_without_error() {
        let value = serde_json::to_value(Envelope::ok(3)).unwrap();
        assert_eq!(value, json!({"success": true, "data": 3}));
    }

    #[test]
    fn test_err_serializes_without_data() {
        let value = serde_json::to_value(Envelope::<()>::err("sheet locked")).unwrap();
        assert_eq!(value, json!({"success": false, "error": "sheet locked"}));
    }

    #[test]
    fn test_into_result() {
        let ok: Envelope<u8> = serde_json::from_str(r#"{"success": true, "data": 7}"#).unwrap();
        assert_eq!(ok.into_result(), Ok(Some(7)));

        let empty: Envelope<u8> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(empty.into_result(), Ok(None));

        let failed: Envelope<u8> =
            serde_json::from_str(r#"{"success": false, "error": "nope"}"#).unwrap();
        assert_eq!(failed.into_result(), Err("nope".to_string()));

        let bare: Envelope<u8> = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(bare.into_result().is_err());
    }

    #[test]
    fn test_decodes_workflow_payload() {
        let body = json!({
            "success": true,
            "data": {"scopeId": "2025-11", "kind": "contract", "units": []}
        });
        let envelope: Envelope<Workflow> = serde_json::from_value(body).unwrap();
        let workflow = envelope.into_result().unwrap().unwrap();
        assert_eq!(workflow.scope_id.as_str(), "2025-11");
        assert_eq!(workflow.kind, WorkflowKind::Contract);

        let failed: Envelope<Workflow> =
            serde_json::from_value(json!({"success": false, "error": "scope not found"})).unwrap();
        assert_eq!(failed.into_result(), Err("scope not found".to_string()));
    }
}
