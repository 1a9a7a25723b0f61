// handlers/protected/mod.rs - Handlers behind the identity policy
//
// Route Prefix: /api/schedule/*, /api/user/*
// Middleware: identity filter + require_identity (both global)

pub mod schedule;
pub mod user;
