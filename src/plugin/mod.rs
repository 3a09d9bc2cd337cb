//! Identity plugin: host service contract and its SCIM-backed implementation.
//!
//! # Key Types
//!
//! - [`ScimPlugin`] - The plugin object implementing both host services
//! - [`ScimAdapter`] - Filter building, list call and projection for one query
//! - [`ConfigService`] / [`IdentityManagementService`] - Host-facing traits
//!
//! # Examples
//!
//! ```rust,no_run
//! use scim_identity_plugin::plugin::{
//!     ConfigService, ConfigureRequest, GetUsersForGroupRequest, IdentityManagementService,
//!     ScimPlugin,
//! };
//! use scim_identity_plugin::RequestContext;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let plugin = ScimPlugin::new();
//! plugin
//!     .configure(ConfigureRequest {
//!         yaml_configuration: "connectCfg:\n  host: https://tenant.example.com/scim\n".into(),
//!     })
//!     .await?;
//!
//! let ctx = RequestContext::with_generated_id();
//! let response = plugin
//!     .get_users_for_group(&ctx, GetUsersForGroupRequest::new("KeyAdmin"))
//!     .await?;
//! for user in response.users {
//!     println!("{}", user.name);
//! }
//! # Ok(())
//! # }
//! ```

mod adapter;
mod scim_plugin;
mod service;

pub use adapter::ScimAdapter;
pub use scim_plugin::ScimPlugin;
pub use service::{
    ConfigService, ConfigureRequest, ConfigureResponse, GetGroupsForUserRequest,
    GetGroupsForUserResponse, GetUsersForGroupRequest, GetUsersForGroupResponse, Group,
    IdentityManagementService, User,
};
