//! Framework-agnostic plugin operation handler.
//!
//! Structured request/response handling for the plugin operations, usable
//! from any host transport.
//!
//! # Key Types
//!
//! - [`PluginOperationHandler`] - Main handler for processing plugin operations
//! - [`PluginOperationRequest`] - Tagged request wrapper with tracing fields
//! - [`PluginOperationResponse`] - Response with error code and metadata
//!
//! # Examples
//!
//! ```rust,no_run
//! use scim_identity_plugin::operation_handler::{PluginOperationHandler, PluginOperationRequest};
//! use scim_identity_plugin::plugin::ScimPlugin;
//!
//! # async fn example() {
//! let handler = PluginOperationHandler::new(ScimPlugin::new());
//!
//! let configure = PluginOperationRequest::configure(
//!     "connectCfg:\n  host: https://tenant.example.com/scim\n",
//! );
//! let response = handler.handle_operation(configure).await;
//! assert!(response.success);
//!
//! let request = PluginOperationRequest::get_users_for_group("KeyAdmin").with_request_id("req-1");
//! let response = handler.handle_operation(request).await;
//! println!("{}", serde_json::to_string(&response).unwrap());
//! # }
//! ```

mod builders;
mod core;
mod errors;
mod handlers;

// Re-export all public types and functions
pub use core::{
    OperationMetadata, PluginOperation, PluginOperationHandler, PluginOperationRequest,
    PluginOperationResponse,
};

// Re-export error utilities for advanced usage
pub use errors::{
    CONFIGURATION_FAILED, GET_GROUPS_FOR_USER_FAILED, GET_USERS_FOR_GROUP_FAILED, INVALID_REQUEST,
    NOT_CONFIGURED, create_error_response, create_invalid_request_response, error_code,
};
