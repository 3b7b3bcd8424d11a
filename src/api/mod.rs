pub mod format;
pub mod sanitize;

pub use format::{serialize_gratitude, GratitudeResponse};
pub use sanitize::sanitize;
