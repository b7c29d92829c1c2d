use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::error;

use crate::domain::Alert;

pub struct AlertRepo {
    pool: PgPool,
}

impl AlertRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Initialize alerts table
    pub async fn init_tables(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS alerts (
                id BIGSERIAL PRIMARY KEY,
                user_id BIGINT NOT NULL,
                asteroid_name VARCHAR(100) NOT NULL,
                approach_date DATE NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )"
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_alerts_user_date
             ON alerts(user_id, approach_date)"
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn insert(
        &self,
        user_id: i64,
        asteroid_name: &str,
        approach_date: NaiveDate,
    ) -> Result<Alert, sqlx::Error> {
        let row = sqlx::query(
            "INSERT INTO alerts (user_id, asteroid_name, approach_date)
             VALUES ($1, $2, $3)
             RETURNING id, user_id, asteroid_name, approach_date, created_at"
        )
        .bind(user_id)
        .bind(asteroid_name)
        .bind(approach_date)
        .fetch_one(&self.pool)
        .await;

        match row {
            Ok(r) => Ok(map_alert(&r)),
            Err(e) => {
                error!("Failed to insert alert for user {}: {:?}", user_id, e);
                Err(e)
            }
        }
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Alert>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT id, user_id, asteroid_name, approach_date, created_at
             FROM alerts
             WHERE user_id = $1
             ORDER BY approach_date ASC, id ASC"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_alert).collect())
    }

    /// Alerts whose approach date is on or after `from`
    pub async fn list_upcoming(
        &self,
        user_id: i64,
        from: NaiveDate,
    ) -> Result<Vec<Alert>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT id, user_id, asteroid_name, approach_date, created_at
             FROM alerts
             WHERE user_id = $1 AND approach_date >= $2
             ORDER BY approach_date ASC, id ASC"
        )
        .bind(user_id)
        .bind(from)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_alert).collect())
    }
}

fn map_alert(row: &PgRow) -> Alert {
    Alert {
        id: row.get("id"),
        user_id: row.get("user_id"),
        asteroid_name: row.get("asteroid_name"),
        approach_date: row.get("approach_date"),
        created_at: row.get("created_at"),
    }
}
