//! Domain traits - Abstractions for infrastructure implementations

pub mod gateway;
pub mod permissions;

pub use gateway::Gateway;
pub use permissions::PermissionResolver;
