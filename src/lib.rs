//! SCIM 2.0 identity plugin for Rust.
//!
//! Answers two membership queries for a host system, "which users belong to
//! group G" and "which groups contain user U", by translating each into a
//! single filtered list call against a SCIM 2.0 provider.
//!
//! # Core Components
//!
//! - [`ScimPlugin`] - Plugin object implementing the host services
//! - [`ScimClient`] - Async SCIM list client with per-path error classification
//! - [`PluginOperationHandler`] - Transport-agnostic request dispatcher
//! - [`build_filter`] - Equality filter construction with attribute overrides
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use scim_identity_plugin::{
//!     GetGroupsForUserRequest, IdentityManagementService, PluginConfig, RequestContext,
//!     ScimPlugin,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PluginConfig::from_yaml(
//!     "connectCfg:\n  host: https://tenant.example.com/scim\n  clientId: id\n  clientSecret: secret\n",
//! )?;
//! let plugin = ScimPlugin::with_config(config)?;
//!
//! let ctx = RequestContext::with_generated_id();
//! let groups = plugin
//!     .get_groups_for_user(&ctx, GetGroupsForUserRequest::new("jdoe"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod operation_handler;
pub mod plugin;
pub mod resource;

// Re-export commonly used types for convenience
pub use client::{ConnectionParams, ListMethod, ScimClient};
pub use config::{PluginConfig, RequestParams};
pub use context::RequestContext;
pub use error::{
    CauseChain, ConfigError, DecodeError, PluginError, PluginResult, RequestError,
    ScimClientError,
};
pub use filter::{FilterComparison, FilterOperator, build_filter};
pub use resource::{ListResponse, ScimGroup, ScimUser};

pub use operation_handler::{
    OperationMetadata, PluginOperation, PluginOperationHandler, PluginOperationRequest,
    PluginOperationResponse,
};
pub use plugin::{
    ConfigService, GetGroupsForUserRequest, GetGroupsForUserResponse, GetUsersForGroupRequest,
    GetUsersForGroupResponse, IdentityManagementService, ScimAdapter, ScimPlugin,
};
