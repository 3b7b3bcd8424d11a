// handlers/mod.rs - public and bearer-protected handlers
//
// Public:    GET /, GET /health
// Protected: /api/gratitudes/* (wrapped by `middleware::require_auth`)
pub mod gratitudes;
pub mod health;

pub use health::{health, root};
