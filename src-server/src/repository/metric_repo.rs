//! Metric Repository

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::db::{id_param, SharedConnection};
use super::traits::Repository;
use crate::domain::{check_version, timestamp_now, DomainError, DomainResult, Metric, MetricRecord};

const COLUMNS: &str = "id, name, current, target, unit, notes, updated_at";

pub struct MetricRepository {
    conn: SharedConnection,
}

impl MetricRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Store a new current value for metric `id`.
    pub async fn record(&self, id: u32, record: &MetricRecord) -> DomainResult<Metric> {
        record.validate()?;
        let conn = self.conn.lock().await;

        let mut metric = select_one(&conn, id)?.ok_or_else(|| not_found(id))?;
        check_version(record.expected_updated_at.as_deref(), metric.updated_at.as_deref())?;
        metric.record(record);

        write(&conn, &metric)?;
        select_one(&conn, id)?.ok_or_else(|| not_found(id))
    }
}

fn row_to_metric(row: &Row) -> rusqlite::Result<Metric> {
    Ok(Metric {
        id: row.get(0)?,
        name: row.get(1)?,
        current: row.get(2)?,
        target: row.get(3)?,
        unit: row.get(4)?,
        notes: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn select_one(conn: &Connection, id: u32) -> DomainResult<Option<Metric>> {
    let sql = format!("SELECT {} FROM metrics WHERE id = ?1", COLUMNS);
    Ok(conn.query_row(&sql, params![id], row_to_metric).optional()?)
}

fn write(conn: &Connection, metric: &Metric) -> DomainResult<()> {
    let changed = conn.execute(
        "UPDATE metrics SET name = ?1, current = ?2, target = ?3, unit = ?4, notes = ?5, updated_at = ?6
         WHERE id = ?7",
        params![
            metric.name,
            metric.current,
            metric.target,
            metric.unit,
            metric.notes,
            timestamp_now(),
            metric.id,
        ],
    )?;
    if changed == 0 {
        return Err(not_found(metric.id));
    }
    Ok(())
}

fn not_found(id: u32) -> DomainError {
    DomainError::NotFound(format!("Metric ID {} not found", id))
}

#[async_trait]
impl Repository<Metric> for MetricRepository {
    async fn create(&self, entity: &Metric) -> DomainResult<Metric> {
        let conn = self.conn.lock().await;

        conn.execute(
            "INSERT INTO metrics (id, name, current, target, unit, notes, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                id_param(entity.id),
                entity.name,
                entity.current,
                entity.target,
                entity.unit,
                entity.notes,
                entity.updated_at.clone().unwrap_or_else(timestamp_now),
            ],
        )?;

        let id = conn.last_insert_rowid() as u32;
        select_one(&conn, id)?.ok_or_else(|| not_found(id))
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Metric>> {
        let conn = self.conn.lock().await;
        select_one(&conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<Metric>> {
        let conn = self.conn.lock().await;
        let sql = format!("SELECT {} FROM metrics ORDER BY id", COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_metric)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    async fn update(&self, entity: &Metric) -> DomainResult<Metric> {
        let conn = self.conn.lock().await;
        write(&conn, entity)?;
        select_one(&conn, entity.id)?.ok_or_else(|| not_found(entity.id))
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM metrics WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
