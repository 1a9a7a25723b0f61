// handlers/protected/user/mod.rs - Profile of the authenticated user

pub mod me;

pub use me::{me_get, me_put};
