use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::manager::DatabaseError;
use super::models::gratitude::{Gratitude, GratitudeUpdate, NewGratitude};
use super::store::GratitudeStore;

const TABLE: &str = "gratitudes";

/// `GratitudeStore` backed by a shared Postgres pool
#[derive(Clone)]
pub struct PgGratitudeStore {
    pool: PgPool,
}

impl PgGratitudeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build `UPDATE gratitudes SET col = $1, ... WHERE id = $n` for the supplied columns only.
/// Returns `None` when there is nothing to set.
fn update_query(id: i32, fields: &GratitudeUpdate) -> Option<QueryBuilder<'static, Postgres>> {
    let columns = fields.columns();
    if columns.is_empty() {
        return None;
    }

    let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", TABLE));
    for (i, (column, value)) in columns.into_iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(column).push(" = ").push_bind(value.to_string());
    }
    qb.push(" WHERE id = ").push_bind(id);
    Some(qb)
}

#[async_trait]
impl GratitudeStore for PgGratitudeStore {
    async fn list_by_author(&self, author_id: i32) -> Result<Vec<Gratitude>, DatabaseError> {
        let sql = format!("SELECT * FROM {} WHERE author_id = $1", TABLE);
        let rows = sqlx::query_as::<_, Gratitude>(&sql)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert(&self, gratitude: NewGratitude) -> Result<Gratitude, DatabaseError> {
        let sql = format!(
            "INSERT INTO {} (thankful_for, did_well, achieve, soc, author_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
            TABLE
        );
        let row = sqlx::query_as::<_, Gratitude>(&sql)
            .bind(&gratitude.thankful_for)
            .bind(&gratitude.did_well)
            .bind(&gratitude.achieve)
            .bind(&gratitude.soc)
            .bind(gratitude.author_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Gratitude>, DatabaseError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", TABLE);
        let row = sqlx::query_as::<_, Gratitude>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: i32) -> Result<u64, DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn update_by_id(&self, id: i32, fields: GratitudeUpdate) -> Result<u64, DatabaseError> {
        let Some(mut qb) = update_query(id, &fields) else {
            return Ok(0);
        };
        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
