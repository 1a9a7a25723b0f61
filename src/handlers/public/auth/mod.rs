// handlers/public/auth/mod.rs - Public authentication handlers
//
// Token acquisition endpoints under /api/auth. The route policy always lets
// these through, with or without a token.

pub mod login;    // POST /api/auth/login - authenticate and get a token
pub mod register; // POST /api/auth/register - create new account

pub use login::login;
pub use register::register;
