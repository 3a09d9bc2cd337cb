//! Core operation handler infrastructure
//!
//! Request/response types and the dispatcher that routes each operation to
//! the plugin services.

use crate::context::RequestContext;
use crate::error::CauseChain;
use crate::plugin::{
    ConfigService, ConfigureRequest, GetGroupsForUserRequest, GetUsersForGroupRequest,
    IdentityManagementService,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Transport-agnostic handler for plugin operations.
///
/// Wraps any service implementing both host traits and turns every outcome,
/// including failures, into a [`PluginOperationResponse`].
#[derive(Debug)]
pub struct PluginOperationHandler<S> {
    pub(super) service: S,
}

/// One operation with its payload.
///
/// Serialized with an `operation` tag next to the payload fields:
/// `{"operation": "getUsersForGroup", "groupId": "KeyAdmin"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "camelCase")]
pub enum PluginOperation {
    /// Apply a YAML configuration
    Configure(ConfigureRequest),
    /// Resolve the users of a group
    GetUsersForGroup(GetUsersForGroupRequest),
    /// Resolve the groups of a user
    GetGroupsForUser(GetGroupsForUserRequest),
}

impl PluginOperation {
    /// Wire name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Configure(_) => "configure",
            Self::GetUsersForGroup(_) => "getUsersForGroup",
            Self::GetGroupsForUser(_) => "getGroupsForUser",
        }
    }
}

/// Structured request for plugin operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginOperationRequest {
    #[serde(flatten)]
    pub operation: PluginOperation,
    /// Request ID for tracing and correlation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Upper bound on the backend call, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_ms: Option<u64>,
}

/// Structured response from plugin operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginOperationResponse {
    /// Whether the operation succeeded
    pub success: bool,
    /// The response message of the operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Error message if the operation failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Error code for programmatic handling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    pub metadata: OperationMetadata,
}

/// Metadata about a plugin operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationMetadata {
    /// Request ID for tracing
    pub request_id: String,
    /// Wire name of the operation, when the request could be parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    /// Number of users or groups returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_count: Option<usize>,
}

impl<S> PluginOperationHandler<S>
where
    S: ConfigService + IdentityManagementService,
{
    /// Create a new operation handler around `service`.
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Access the wrapped service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Handle a structured plugin operation request.
    pub async fn handle_operation(&self, request: PluginOperationRequest) -> PluginOperationResponse {
        self.handle_operation_with_cancellation(request, CancellationToken::new())
            .await
    }

    /// Handle a request whose backend call is abandoned when `cancellation` fires.
    pub async fn handle_operation_with_cancellation(
        &self,
        request: PluginOperationRequest,
        cancellation: CancellationToken,
    ) -> PluginOperationResponse {
        let context = create_request_context(&request, cancellation);
        self.handle_operation_with_context(request.operation, &context)
            .await
    }

    /// Dispatch `operation` under an existing request context.
    pub async fn handle_operation_with_context(
        &self,
        operation: PluginOperation,
        context: &RequestContext,
    ) -> PluginOperationResponse {
        let operation_name = operation.name();
        info!(
            "Plugin operation handler processing {} (request: '{}')",
            operation_name, context.request_id
        );

        let result = match operation {
            PluginOperation::Configure(request) => {
                super::handlers::configure::handle_configure(self, request, context).await
            }
            PluginOperation::GetUsersForGroup(request) => {
                super::handlers::membership::handle_get_users_for_group(self, request, context)
                    .await
            }
            PluginOperation::GetGroupsForUser(request) => {
                super::handlers::membership::handle_get_groups_for_user(self, request, context)
                    .await
            }
        };

        match result {
            Ok(response) => {
                debug!(
                    "Plugin operation handler completed successfully (request: '{}')",
                    context.request_id
                );
                response
            }
            Err(e) => {
                warn!(
                    "Plugin operation handler failed: {} (request: '{}')",
                    e.display_chain(),
                    context.request_id
                );
                super::errors::create_error_response(
                    e,
                    context.request_id.clone(),
                    Some(operation_name),
                )
            }
        }
    }

    /// Parse one JSON request and handle it.
    ///
    /// A request that cannot be parsed yields an `INVALID_REQUEST` response
    /// carrying the `requestId` when one could be recovered.
    pub async fn handle_json(
        &self,
        payload: &str,
        cancellation: CancellationToken,
    ) -> PluginOperationResponse {
        match serde_json::from_str::<PluginOperationRequest>(payload) {
            Ok(request) => {
                self.handle_operation_with_cancellation(request, cancellation)
                    .await
            }
            Err(e) => {
                let request_id = recover_request_id(payload)
                    .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
                warn!(
                    "Plugin operation handler rejected request: {} (request: '{}')",
                    e, request_id
                );
                super::errors::create_invalid_request_response(e.to_string(), request_id)
            }
        }
    }
}

/// Create a RequestContext from the operation request.
pub(super) fn create_request_context(
    request: &PluginOperationRequest,
    cancellation: CancellationToken,
) -> RequestContext {
    let context = match &request.request_id {
        Some(request_id) => RequestContext::new(request_id.clone()),
        None => RequestContext::with_generated_id(),
    }
    .with_cancellation(cancellation);

    match request.deadline_ms {
        Some(ms) => context.with_deadline(Duration::from_millis(ms)),
        None => context,
    }
}

fn recover_request_id(payload: &str) -> Option<String> {
    let value: Value = serde_json::from_str(payload).ok()?;
    value.get("requestId")?.as_str().map(str::to_string)
}
