use sqlx::PgPool;

use crate::config::TABLE_NAME;
use crate::models::{CalculationRecord, HistoryEntry};

pub async fn ensure_table(pool: &PgPool) -> Result<(), sqlx::Error> {
    let sql = format!(
        r#"CREATE TABLE IF NOT EXISTS "{TABLE_NAME}" (
            id UUID NOT NULL,
            timestamp TIMESTAMPTZ NOT NULL,
            investment DOUBLE PRECISION NOT NULL,
            gains DOUBLE PRECISION NOT NULL,
            roi DOUBLE PRECISION NOT NULL,
            PRIMARY KEY (id, timestamp)
        )"#
    );
    sqlx::query(&sql).execute(pool).await?;
    Ok(())
}

pub async fn insert(pool: &PgPool, record: &CalculationRecord) -> Result<(), sqlx::Error> {
    let sql = format!(
        r#"INSERT INTO "{TABLE_NAME}" (id, timestamp, investment, gains, roi)
           VALUES ($1, $2, $3, $4, $5)"#
    );
    sqlx::query(&sql)
        .bind(record.id)
        .bind(record.timestamp)
        .bind(record.investment)
        .bind(record.gains)
        .bind(record.roi)
        .execute(pool)
        .await?;
    Ok(())
}

// No ORDER BY: rows come back in the table's scan order.
pub async fn fetch_history(pool: &PgPool) -> Result<Vec<HistoryEntry>, sqlx::Error> {
    let sql = format!(r#"SELECT timestamp, roi FROM "{TABLE_NAME}""#);
    sqlx::query_as::<_, HistoryEntry>(&sql)
        .fetch_all(pool)
        .await
}
