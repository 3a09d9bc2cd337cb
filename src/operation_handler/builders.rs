//! Builder utilities for PluginOperationRequest

use crate::operation_handler::core::{PluginOperation, PluginOperationRequest};
use crate::plugin::{ConfigureRequest, GetGroupsForUserRequest, GetUsersForGroupRequest};
use std::time::Duration;

impl PluginOperationRequest {
    /// Wrap an operation with no request id and no deadline.
    pub fn new(operation: PluginOperation) -> Self {
        Self {
            operation,
            request_id: None,
            deadline_ms: None,
        }
    }

    /// Create a configure request.
    pub fn configure(yaml_configuration: impl Into<String>) -> Self {
        Self::new(PluginOperation::Configure(ConfigureRequest {
            yaml_configuration: yaml_configuration.into(),
        }))
    }

    /// Create a users-for-group request.
    pub fn get_users_for_group(group_id: impl Into<String>) -> Self {
        Self::new(PluginOperation::GetUsersForGroup(
            GetUsersForGroupRequest::new(group_id),
        ))
    }

    /// Create a groups-for-user request.
    pub fn get_groups_for_user(user_id: impl Into<String>) -> Self {
        Self::new(PluginOperation::GetGroupsForUser(
            GetGroupsForUserRequest::new(user_id),
        ))
    }

    /// Set request ID for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Bound the backend call. Sub-millisecond precision is dropped and
    /// deadlines beyond `u64::MAX` milliseconds saturate.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline_ms = Some(u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX));
        self
    }
}
