//! Integration tests against mock SCIM providers
//!
//! - `plugin_end_to_end` - Membership queries through the plugin services
//! - `client` - Request shape, status handling, decoding and cancellation
//! - `configuration` - YAML configuration and configure-once semantics
//! - `operation_handler` - Dispatch, wire format and error codes

pub mod client;
pub mod configuration;
