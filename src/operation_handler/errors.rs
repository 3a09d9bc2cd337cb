//! Error response creation for operation handlers

use crate::error::{CauseChain, PluginError};
use crate::operation_handler::core::{OperationMetadata, PluginOperationResponse};

pub const CONFIGURATION_FAILED: &str = "CONFIGURATION_FAILED";
pub const NOT_CONFIGURED: &str = "NOT_CONFIGURED";
pub const GET_USERS_FOR_GROUP_FAILED: &str = "GET_USERS_FOR_GROUP_FAILED";
pub const GET_GROUPS_FOR_USER_FAILED: &str = "GET_GROUPS_FOR_USER_FAILED";
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";

/// Error code reported for `error`.
pub fn error_code(error: &PluginError) -> &'static str {
    match error {
        PluginError::Configuration(_) => CONFIGURATION_FAILED,
        PluginError::NotConfigured => NOT_CONFIGURED,
        PluginError::GetUsersForGroup(_) => GET_USERS_FOR_GROUP_FAILED,
        PluginError::GetGroupsForUser(_) => GET_GROUPS_FOR_USER_FAILED,
    }
}

/// Create an error response from a PluginError.
///
/// The message is the full display chain of `error`.
pub fn create_error_response(
    error: PluginError,
    request_id: String,
    operation: Option<&str>,
) -> PluginOperationResponse {
    PluginOperationResponse {
        success: false,
        data: None,
        error: Some(error.display_chain()),
        error_code: Some(error_code(&error).to_string()),
        metadata: OperationMetadata {
            request_id,
            operation: operation.map(str::to_string),
            resource_count: None,
        },
    }
}

/// Create a response for a request that could not be parsed.
pub fn create_invalid_request_response(
    message: impl Into<String>,
    request_id: String,
) -> PluginOperationResponse {
    PluginOperationResponse {
        success: false,
        data: None,
        error: Some(format!("Invalid request: {}", message.into())),
        error_code: Some(INVALID_REQUEST.to_string()),
        metadata: OperationMetadata {
            request_id,
            operation: None,
            resource_count: None,
        },
    }
}
