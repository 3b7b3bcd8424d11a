use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::manager::DatabaseError;
use super::models::gratitude::{Gratitude, GratitudeUpdate, NewGratitude};
use super::store::GratitudeStore;

#[derive(Default)]
struct Table {
    rows: Vec<Gratitude>,
    next_id: i32,
}

/// In-process `GratitudeStore` for tests and `serve --memory`.
///
/// Rows keep insertion order; ids are assigned sequentially from 1.
#[derive(Default)]
pub struct MemoryGratitudeStore {
    table: RwLock<Table>,
}

impl MemoryGratitudeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully specified row, as a fixture loader would.
    /// Later generated ids continue after the highest id seen.
    pub async fn seed(&self, gratitude: Gratitude) {
        let mut table = self.table.write().await;
        table.next_id = table.next_id.max(gratitude.id);
        table.rows.push(gratitude);
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl GratitudeStore for MemoryGratitudeStore {
    async fn list_by_author(&self, author_id: i32) -> Result<Vec<Gratitude>, DatabaseError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|g| g.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, gratitude: NewGratitude) -> Result<Gratitude, DatabaseError> {
        let mut table = self.table.write().await;
        let id = table
            .next_id
            .checked_add(1)
            .ok_or(DatabaseError::IdExhausted("gratitudes"))?;
        table.next_id = id;
        let row = Gratitude {
            id,
            thankful_for: gratitude.thankful_for,
            did_well: gratitude.did_well,
            achieve: gratitude.achieve,
            soc: gratitude.soc,
            author_id: gratitude.author_id,
            date_created: Utc::now(),
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Gratitude>, DatabaseError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|g| g.id == id).cloned())
    }

    async fn delete_by_id(&self, id: i32) -> Result<u64, DatabaseError> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|g| g.id != id);
        Ok((before - table.rows.len()) as u64)
    }

    async fn update_by_id(&self, id: i32, fields: GratitudeUpdate) -> Result<u64, DatabaseError> {
        if fields.is_empty() {
            return Ok(0);
        }
        let mut table = self.table.write().await;
        match table.rows.iter_mut().find(|g| g.id == id) {
            Some(row) => {
                fields.apply_to(row);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_gratitude(author_id: i32, thankful_for: &str) -> NewGratitude {
        NewGratitude {
            thankful_for: thankful_for.to_string(),
            did_well: "did well".to_string(),
            achieve: "achieve".to_string(),
            soc: String::new(),
            author_id,
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let store = MemoryGratitudeStore::new();
        let first = store.insert(new_gratitude(1, "a")).await.unwrap();
        let second = store.insert(new_gratitude(1, "b")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn list_is_scoped_to_author_in_insertion_order() {
        let store = MemoryGratitudeStore::new();
        store.insert(new_gratitude(1, "a")).await.unwrap();
        store.insert(new_gratitude(2, "b")).await.unwrap();
        store.insert(new_gratitude(1, "c")).await.unwrap();

        let mine: Vec<String> = store
            .list_by_author(1)
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.thankful_for)
            .collect();
        assert_eq!(mine, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn delete_reports_affected_rows() {
        let store = MemoryGratitudeStore::new();
        let row = store.insert(new_gratitude(1, "a")).await.unwrap();
        assert_eq!(store.delete_by_id(row.id).await.unwrap(), 1);
        assert_eq!(store.delete_by_id(row.id).await.unwrap(), 0);
        assert!(store.get_by_id(row.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_touches_only_supplied_fields() {
        let store = MemoryGratitudeStore::new();
        let row = store.insert(new_gratitude(1, "a")).await.unwrap();
        let fields = GratitudeUpdate {
            soc: Some("cold plunge".to_string()),
            ..Default::default()
        };
        assert_eq!(store.update_by_id(row.id, fields).await.unwrap(), 1);

        let updated = store.get_by_id(row.id).await.unwrap().unwrap();
        assert_eq!(updated.soc, "cold plunge");
        assert_eq!(updated.thankful_for, "a");
        assert_eq!(updated.date_created, row.date_created);
        assert_eq!(store.update_by_id(99, GratitudeUpdate::default()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn seeded_ids_are_not_reused() {
        let store = MemoryGratitudeStore::new();
        store
            .seed(Gratitude {
                id: 911,
                thankful_for: "x".to_string(),
                did_well: "y".to_string(),
                achieve: "z".to_string(),
                soc: String::new(),
                author_id: 1,
                date_created: Utc::now(),
            })
            .await;
        let row = store.insert(new_gratitude(1, "a")).await.unwrap();
        assert_eq!(row.id, 912);
    }

    #[tokio::test]
    async fn insert_fails_once_ids_run_out() {
        let store = MemoryGratitudeStore::new();
        store
            .seed(Gratitude {
                id: i32::MAX,
                thankful_for: "x".to_string(),
                did_well: "y".to_string(),
                achieve: "z".to_string(),
                soc: String::new(),
                author_id: 1,
                date_created: Utc::now(),
            })
            .await;

        let err = store.insert(new_gratitude(1, "a")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::IdExhausted(_)));
        assert_eq!(store.len().await, 1);
    }
}
