//! SQLite-backed record store

use super::PredictionStore;
use crate::models::{Label, PredictionRecord};
use async_trait::async_trait;
use onco_common::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Store backed by the `predictions` table
///
/// The table is created by `onco_common::db::init_database`.
#[derive(Clone)]
pub struct SqlitePredictionStore {
    pool: SqlitePool,
}

impl SqlitePredictionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_record(row: &SqliteRow) -> Result<PredictionRecord> {
    let result: String = row.get("result");
    let result = result
        .parse::<Label>()
        .map_err(|e| Error::Internal(format!("Failed to parse stored label: {}", e)))?;

    Ok(PredictionRecord {
        id: row.get("id"),
        result,
        suggestion: row.get("suggestion"),
        confidence_score: row.get("confidence_score"),
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl PredictionStore for SqlitePredictionStore {
    async fn put(&self, record: &PredictionRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO predictions (id, result, suggestion, confidence_score, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(record.result.as_str())
        .bind(&record.suggestion)
        .bind(record.confidence_score)
        .bind(&record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<PredictionRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, result, suggestion, confidence_score, created_at
            FROM predictions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn list(&self) -> Result<Vec<PredictionRecord>> {
        // No ORDER BY: iteration order is whatever SQLite's table scan yields
        let rows = sqlx::query(
            "SELECT id, result, suggestion, confidence_score, created_at FROM predictions",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_record).collect()
    }
}
