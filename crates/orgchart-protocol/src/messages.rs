use serde::{Deserialize, Serialize};

use crate::constants::JSONRPC_VERSION;
use crate::identity::EmployeeId;
use crate::types::{EmployeePatch, NewEmployee};

/// Request envelope in JSON-RPC 2.0 form.
///
/// The engine does not own a transport; whoever carries these envelopes
/// (a socket, stdin, a web handler) hands them to the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgRequest {
    #[serde(default = "default_jsonrpc")]
    pub jsonrpc: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub params: serde_json::Value,
}

impl OrgRequest {
    pub fn new(method: &str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            id: Some(uuid::Uuid::new_v4().to_string()),
            params,
        }
    }
}

fn default_jsonrpc() -> String {
    JSONRPC_VERSION.to_string()
}

/// Response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgResponse {
    pub jsonrpc: String,
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl OrgResponse {
    pub fn success(id: Option<String>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<String>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(RpcError {
                code,
                message,
                data: None,
            }),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

// ── Method Parameters ──

/// Params for methods addressed at one employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeParams {
    pub id: EmployeeId,
}

/// Params for `org.propose_reassignment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReassignParams {
    pub employee_id: EmployeeId,
    /// `None` (or `null`) detaches the employee to root.
    #[serde(default)]
    pub manager_id: Option<EmployeeId>,
}

/// Params for team-scoped methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamParams {
    pub team: String,
}

/// Params for `org.search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

/// Params for `org.highlight`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightParams {
    pub text: String,
    #[serde(default)]
    pub query: String,
}

/// Params for `org.layout`; a team scopes the layout to that team's
/// related set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutParams {
    #[serde(default)]
    pub team: Option<String>,
}

/// Params for `org.create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateParams {
    pub employee: NewEmployee,
}

/// Params for `org.update`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateParams {
    pub id: EmployeeId,
    #[serde(default)]
    pub patch: EmployeePatch,
}

/// Result of `org.propose_reassignment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignResult {
    pub accepted: bool,
    /// Whether the store changed. An accepted no-op leaves it untouched.
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req: OrgRequest = serde_json::from_str(r#"{"method":"org.roots"}"#).unwrap();
        assert_eq!(req.jsonrpc, JSONRPC_VERSION);
        assert!(req.id.is_none());
        assert!(req.params.is_null());
    }

    #[test]
    fn test_reassign_params_null_manager() {
        let params: ReassignParams =
            serde_json::from_str(r#"{"employeeId":"3","managerId":null}"#).unwrap();
        assert_eq!(params.employee_id, EmployeeId::new("3"));
        assert!(params.manager_id.is_none());
    }

    #[test]
    fn test_error_response_shape() {
        let resp = OrgResponse::error(Some("id-2".into()), -32601, "Unknown method".into());
        assert!(resp.is_error());
        assert!(resp.result.is_none());
        assert_eq!(resp.error.as_ref().unwrap().code, -32601);
    }
}
