use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::gratitude::{Gratitude, GratitudeUpdate, NewGratitude};

/// Data access for the `gratitudes` table.
///
/// Every method is a single statement. No validation or sanitization happens
/// here; callers hand over exactly what should be stored.
#[async_trait]
pub trait GratitudeStore: Send + Sync {
    /// All entries owned by `author_id`, in storage order
    async fn list_by_author(&self, author_id: i32) -> Result<Vec<Gratitude>, DatabaseError>;

    /// Insert and return the fully populated row
    async fn insert(&self, gratitude: NewGratitude) -> Result<Gratitude, DatabaseError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Gratitude>, DatabaseError>;

    /// Returns the number of rows removed (0 or 1)
    async fn delete_by_id(&self, id: i32) -> Result<u64, DatabaseError>;

    /// Returns the number of rows updated (0 or 1)
    async fn update_by_id(&self, id: i32, fields: GratitudeUpdate) -> Result<u64, DatabaseError>;

    /// Connectivity probe for `/health`
    async fn ping(&self) -> Result<(), DatabaseError>;
}
