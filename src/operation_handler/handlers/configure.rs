//! Configure operation handler

use crate::error::PluginResult;
use crate::operation_handler::core::{
    OperationMetadata, PluginOperationHandler, PluginOperationResponse,
};
use crate::{
    context::RequestContext,
    plugin::{ConfigService, ConfigureRequest, IdentityManagementService},
};

/// Handle configure operations.
pub async fn handle_configure<S>(
    handler: &PluginOperationHandler<S>,
    request: ConfigureRequest,
    context: &RequestContext,
) -> PluginResult<PluginOperationResponse>
where
    S: ConfigService + IdentityManagementService,
{
    let response = handler.service.configure(request).await?;

    Ok(PluginOperationResponse {
        success: true,
        data: serde_json::to_value(response).ok(),
        error: None,
        error_code: None,
        metadata: OperationMetadata {
            request_id: context.request_id.clone(),
            operation: Some("configure".to_string()),
            resource_count: None,
        },
    })
}
