//! Response DTOs for the API.

use serde::Serialize;

use yumemaga_models::ScopeId;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}

/// Stored scopes.
#[derive(Debug, Clone, Serialize)]
pub struct ScopeListResponse {
    pub scopes: Vec<ScopeId>,
    pub total: usize,
}

impl From<Vec<ScopeId>> for ScopeListResponse {
    fn from(scopes: Vec<ScopeId>) -> Self {
        let total = scopes.len();
        Self { scopes, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.3.0".to_string(),
            uptime_seconds: 3600,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["uptimeSeconds"], 3600);
    }

    #[test]
    fn test_scope_list_response_counts() {
        let resp = ScopeListResponse::from(vec![ScopeId::from("2025-11"), ScopeId::from("c-1")]);
        assert_eq!(resp.total, 2);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["scopes"][0], "2025-11");
    }
}
