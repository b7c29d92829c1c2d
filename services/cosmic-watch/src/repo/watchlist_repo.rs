use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::error;

use crate::domain::WatchlistEntry;

pub struct WatchlistRepo {
    pool: PgPool,
}

impl WatchlistRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Initialize watchlist table
    pub async fn init_tables(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS watchlist (
                id BIGSERIAL PRIMARY KEY,
                user_id BIGINT NOT NULL,
                asteroid_id VARCHAR(50) NOT NULL,
                name VARCHAR(100) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                UNIQUE (user_id, asteroid_id)
            )"
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Add an asteroid to a user's watchlist. Adding it twice returns the existing row.
    pub async fn insert(
        &self,
        user_id: i64,
        asteroid_id: &str,
        name: &str,
    ) -> Result<WatchlistEntry, sqlx::Error> {
        let row = sqlx::query(
            "INSERT INTO watchlist (user_id, asteroid_id, name)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, asteroid_id)
             DO UPDATE SET name = watchlist.name
             RETURNING id, user_id, asteroid_id, name, created_at"
        )
        .bind(user_id)
        .bind(asteroid_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await;

        match row {
            Ok(r) => Ok(map_entry(&r)),
            Err(e) => {
                error!(
                    "Failed to add asteroid {} to watchlist of user {}: {:?}",
                    asteroid_id, user_id, e
                );
                Err(e)
            }
        }
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<WatchlistEntry>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT id, user_id, asteroid_id, name, created_at
             FROM watchlist
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_entry).collect())
    }

    pub async fn find(
        &self,
        user_id: i64,
        asteroid_id: &str,
    ) -> Result<Option<WatchlistEntry>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT id, user_id, asteroid_id, name, created_at
             FROM watchlist
             WHERE user_id = $1 AND asteroid_id = $2"
        )
        .bind(user_id)
        .bind(asteroid_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_entry))
    }

    /// Remove an entry; returns whether anything was deleted
    pub async fn delete(&self, user_id: i64, asteroid_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM watchlist WHERE user_id = $1 AND asteroid_id = $2")
            .bind(user_id)
            .bind(asteroid_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_entry(row: &PgRow) -> WatchlistEntry {
    WatchlistEntry {
        id: row.get("id"),
        user_id: row.get("user_id"),
        asteroid_id: row.get("asteroid_id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
    }
}
