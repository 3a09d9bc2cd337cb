//! Operation handler modules
//!
//! - Configuration (configure)
//! - Membership queries (users for group, groups for user)

pub mod configure;
pub mod membership;
