//! Membership query handlers
//!
//! Both handlers report the number of returned entries in the metadata.

use crate::error::PluginResult;
use crate::operation_handler::core::{
    OperationMetadata, PluginOperationHandler, PluginOperationResponse,
};
use crate::{
    context::RequestContext,
    plugin::{
        ConfigService, GetGroupsForUserRequest, GetUsersForGroupRequest,
        IdentityManagementService,
    },
};
use serde::Serialize;

/// Handle users-for-group operations.
pub async fn handle_get_users_for_group<S>(
    handler: &PluginOperationHandler<S>,
    request: GetUsersForGroupRequest,
    context: &RequestContext,
) -> PluginResult<PluginOperationResponse>
where
    S: ConfigService + IdentityManagementService,
{
    let response = handler.service.get_users_for_group(context, request).await?;
    let count = response.users.len();
    Ok(success_response(&response, count, "getUsersForGroup", context))
}

/// Handle groups-for-user operations.
pub async fn handle_get_groups_for_user<S>(
    handler: &PluginOperationHandler<S>,
    request: GetGroupsForUserRequest,
    context: &RequestContext,
) -> PluginResult<PluginOperationResponse>
where
    S: ConfigService + IdentityManagementService,
{
    let response = handler.service.get_groups_for_user(context, request).await?;
    let count = response.groups.len();
    Ok(success_response(&response, count, "getGroupsForUser", context))
}

fn success_response<T: Serialize>(
    data: &T,
    resource_count: usize,
    operation: &str,
    context: &RequestContext,
) -> PluginOperationResponse {
    PluginOperationResponse {
        success: true,
        data: serde_json::to_value(data).ok(),
        error: None,
        error_code: None,
        metadata: OperationMetadata {
            request_id: context.request_id.clone(),
            operation: Some(operation.to_string()),
            resource_count: Some(resource_count),
        },
    }
}
