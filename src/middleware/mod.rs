pub mod auth;
pub mod policy;

pub use auth::{resolve_identity, AuthState, Identity};
pub use policy::require_identity;
