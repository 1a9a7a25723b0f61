// handlers/mod.rs - Two-tier handler layout
//
// Public (no identity) → Protected (identity required by route policy)
pub mod protected;
pub mod public;
