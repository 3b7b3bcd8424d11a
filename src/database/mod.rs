pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryGratitudeStore;
pub use models::gratitude::{Gratitude, GratitudeUpdate, NewGratitude};
pub use postgres::PgGratitudeStore;
pub use store::GratitudeStore;
