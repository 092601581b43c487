//! MCP tool handlers for the hospital registry.
//!
//! This module implements the MCP tools using the rmcp SDK's tool_router pattern.

use crate::domain::{OwnershipType, VerificationStatus};
use crate::error::RegistrationError;
use crate::models::{HospitalRecord, HospitalRegistrationEntry};
use crate::services::HospitalRegistrationService;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server exposing hospital registration tools.
#[derive(Clone)]
pub struct HospitalRegistryServer {
    registration_service: Arc<dyn HospitalRegistrationService>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for HospitalRegistryServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "hospital-registry".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Hospital registry - registers hospitals either by a key contact or as unclaimed entries with a verification status.".into()),
        }
    }
}

/// Map a registration failure to an MCP error.
///
/// Bad input becomes `INVALID_PARAMS`, a duplicate becomes `INVALID_REQUEST`,
/// anything else `INTERNAL_ERROR`.
pub fn to_mcp_error(e: RegistrationError) -> McpError {
    let code = if e.is_client_error() {
        ErrorCode::INVALID_PARAMS
    } else if e.is_conflict() {
        ErrorCode::INVALID_REQUEST
    } else {
        ErrorCode::INTERNAL_ERROR
    };

    McpError {
        code,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn to_internal_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

#[tool_router]
impl HospitalRegistryServer {
    /// Create a new hospital registry server.
    pub fn new(registration_service: Arc<dyn HospitalRegistrationService>) -> Self {
        Self {
            registration_service,
            tool_router: Self::tool_router(),
        }
    }

    /// Register a hospital.
    #[tool(
        description = "Register a hospital. Provide either a key_contact (self-registration, optionally with verified_status \"unverified\") or a verified_status of \"verified\" or \"verification_pending\" (unclaimed hospital), never both. Returns the stored record."
    )]
    pub async fn register_hospital(
        &self,
        params: Parameters<HospitalRegistrationEntry>,
    ) -> Result<CallToolResult, McpError> {
        let hospital = self
            .registration_service
            .register_hospital(params.0)
            .await
            .map_err(to_mcp_error)?;

        let response = serde_json::json!({
            "table": hospital.kind().table(),
            "record": HospitalRecord::from(&hospital),
        });

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&response).map_err(to_internal_error)?,
        )]))
    }

    /// List accepted ownership types and verification statuses.
    #[tool(description = "List the accepted ownership_type and verified_status values")]
    pub async fn list_registration_options(&self) -> Result<CallToolResult, McpError> {
        let to_options = |items: Vec<(String, &'static str)>| {
            items
                .into_iter()
                .map(|(name, value)| serde_json::json!({ "name": name, "value": value }))
                .collect::<Vec<_>>()
        };

        let response = serde_json::json!({
            "ownership_type": to_options(OwnershipType::items()),
            "verified_status": to_options(VerificationStatus::items()),
        });

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&response).map_err(to_internal_error)?,
        )]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::M3oApiError;

    #[test]
    fn test_error_code_mapping() {
        let missing = RegistrationError::InvalidRegistrationEntry("bad".to_string());
        assert_eq!(to_mcp_error(missing).code, ErrorCode::INVALID_PARAMS);

        let conflict = RegistrationError::RecordAlreadyExists {
            table: "unverified_hospital".to_string(),
            hospital_name: "City Hospital".to_string(),
        };
        assert_eq!(to_mcp_error(conflict).code, ErrorCode::INVALID_REQUEST);

        let storage = RegistrationError::Storage(M3oApiError::Timeout);
        let err = to_mcp_error(storage);
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(err.message, "Storage error: Request timeout");
    }
}
