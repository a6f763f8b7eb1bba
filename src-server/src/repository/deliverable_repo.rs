//! Deliverable Repository
//!
//! Progress updates run their version check and write under one lock.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::db::{id_param, json_list, text_enum, to_json, SharedConnection};
use super::traits::Repository;
use crate::domain::{check_version, timestamp_now, Deliverable, DeliverableProgress, DomainError, DomainResult};

const COLUMNS: &str = "id, name, description, due_date, owner, status, completion_percentage, \
                       phase_id, evidence, comments, updated_at";

pub struct DeliverableRepository {
    conn: SharedConnection,
}

impl DeliverableRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub async fn list_by_phase(&self, phase: u8) -> DomainResult<Vec<Deliverable>> {
        let conn = self.conn.lock().await;
        let sql = format!("SELECT {} FROM deliverables WHERE phase_id = ?1 ORDER BY id", COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![phase], row_to_deliverable)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Apply a status/percentage update, rejecting it when the caller's
    /// `expected_updated_at` is stale.
    pub async fn update_progress(&self, id: u32, progress: &DeliverableProgress) -> DomainResult<Deliverable> {
        progress.validate()?;
        let conn = self.conn.lock().await;

        let mut deliverable = select_one(&conn, id)?.ok_or_else(not_found)?;
        check_version(progress.expected_updated_at.as_deref(), deliverable.updated_at.as_deref())?;
        deliverable.apply_progress(progress);

        write(&conn, &deliverable)?;
        select_one(&conn, id)?.ok_or_else(not_found)
    }
}

fn row_to_deliverable(row: &Row) -> rusqlite::Result<Deliverable> {
    Ok(Deliverable {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        due_date: row.get(3)?,
        owner: text_enum(row, 4)?,
        status: text_enum(row, 5)?,
        completion_percentage: row.get(6)?,
        phase_id: row.get(7)?,
        evidence: json_list(row, 8)?,
        comments: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn select_one(conn: &Connection, id: u32) -> DomainResult<Option<Deliverable>> {
    let sql = format!("SELECT {} FROM deliverables WHERE id = ?1", COLUMNS);
    Ok(conn.query_row(&sql, params![id], row_to_deliverable).optional()?)
}

fn write(conn: &Connection, entity: &Deliverable) -> DomainResult<()> {
    let changed = conn.execute(
        "UPDATE deliverables
         SET name = ?1, description = ?2, due_date = ?3, owner = ?4, status = ?5,
             completion_percentage = ?6, phase_id = ?7, evidence = ?8, comments = ?9, updated_at = ?10
         WHERE id = ?11",
        params![
            entity.name,
            entity.description,
            entity.due_date,
            entity.owner.as_str(),
            entity.status.as_str(),
            entity.completion_percentage,
            entity.phase_id,
            to_json(&entity.evidence)?,
            entity.comments,
            timestamp_now(),
            entity.id,
        ],
    )?;
    if changed == 0 {
        return Err(not_found());
    }
    Ok(())
}

fn not_found() -> DomainError {
    DomainError::NotFound("Deliverable not found".to_string())
}

#[async_trait]
impl Repository<Deliverable> for DeliverableRepository {
    async fn create(&self, entity: &Deliverable) -> DomainResult<Deliverable> {
        let conn = self.conn.lock().await;

        conn.execute(
            "INSERT INTO deliverables (id, name, description, due_date, owner, status,
                                       completion_percentage, phase_id, evidence, comments, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                id_param(entity.id),
                entity.name,
                entity.description,
                entity.due_date,
                entity.owner.as_str(),
                entity.status.as_str(),
                entity.completion_percentage,
                entity.phase_id,
                to_json(&entity.evidence)?,
                entity.comments,
                entity.updated_at.clone().unwrap_or_else(timestamp_now),
            ],
        )?;

        let id = conn.last_insert_rowid() as u32;
        select_one(&conn, id)?.ok_or_else(not_found)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Deliverable>> {
        let conn = self.conn.lock().await;
        select_one(&conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<Deliverable>> {
        let conn = self.conn.lock().await;
        let sql = format!("SELECT {} FROM deliverables ORDER BY id", COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_deliverable)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    async fn update(&self, entity: &Deliverable) -> DomainResult<Deliverable> {
        let conn = self.conn.lock().await;
        write(&conn, entity)?;
        select_one(&conn, entity.id)?.ok_or_else(not_found)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM deliverables WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
