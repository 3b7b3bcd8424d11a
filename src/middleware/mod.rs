pub mod auth;
pub mod gratitude;

pub use auth::{require_auth, AuthUser};
pub use gratitude::{load_gratitude, NOT_FOUND_MESSAGE};
