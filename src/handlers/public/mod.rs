// handlers/public/mod.rs - Public handlers (no identity required)

pub mod auth;
pub mod status;

pub use status::{health, not_found, root};
