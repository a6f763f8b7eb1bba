//! Action Item Repository
//!
//! SQLite-backed storage for action items, with the combined
//! status / responsible party / meeting filter.

use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use super::db::{id_param, text_enum, SharedConnection};
use super::traits::Repository;
use crate::domain::{timestamp_now, ActionItem, ActionItemFilter, DomainError, DomainResult};

const COLUMNS: &str = "id, title, description, responsible_party, target_date, status, priority, \
                       meeting_id, notes, created_at, updated_at";

pub struct ActionItemRepository {
    conn: SharedConnection,
}

impl ActionItemRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Items matching every filter field that is set, in id order.
    pub async fn list_filtered(&self, filter: &ActionItemFilter) -> DomainResult<Vec<ActionItem>> {
        let conn = self.conn.lock().await;

        let mut clauses = Vec::new();
        let mut values = Vec::new();
        if let Some(status) = filter.status {
            values.push(Value::Text(status.as_str().to_string()));
            clauses.push(format!("status = ?{}", values.len()));
        }
        if let Some(party) = &filter.responsible_party {
            values.push(Value::Text(party.clone()));
            clauses.push(format!("responsible_party = ?{}", values.len()));
        }
        if let Some(meeting_id) = filter.meeting_id {
            values.push(Value::Integer(i64::from(meeting_id)));
            clauses.push(format!("meeting_id = ?{}", values.len()));
        }

        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };
        let sql = format!("SELECT {} FROM action_items{} ORDER BY id", COLUMNS, where_sql);

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values.iter()), row_to_action_item)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn row_to_action_item(row: &Row) -> rusqlite::Result<ActionItem> {
    Ok(ActionItem {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        responsible_party: row.get(3)?,
        target_date: row.get(4)?,
        status: text_enum(row, 5)?,
        priority: text_enum(row, 6)?,
        meeting_id: row.get(7)?,
        notes: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn select_one(conn: &Connection, id: u32) -> DomainResult<Option<ActionItem>> {
    let sql = format!("SELECT {} FROM action_items WHERE id = ?1", COLUMNS);
    Ok(conn.query_row(&sql, params![id], row_to_action_item).optional()?)
}

fn not_found() -> DomainError {
    DomainError::NotFound("Action item not found".to_string())
}

#[async_trait]
impl Repository<ActionItem> for ActionItemRepository {
    async fn create(&self, entity: &ActionItem) -> DomainResult<ActionItem> {
        let conn = self.conn.lock().await;
        let now = timestamp_now();

        conn.execute(
            "INSERT INTO action_items (id, title, description, responsible_party, target_date, status,
                                       priority, meeting_id, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                id_param(entity.id),
                entity.title,
                entity.description,
                entity.responsible_party,
                entity.target_date,
                entity.status.as_str(),
                entity.priority.as_str(),
                entity.meeting_id,
                entity.notes,
                entity.created_at.clone().unwrap_or_else(|| now.clone()),
                entity.updated_at.clone().unwrap_or(now),
            ],
        )?;

        let id = conn.last_insert_rowid() as u32;
        select_one(&conn, id)?.ok_or_else(not_found)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<ActionItem>> {
        let conn = self.conn.lock().await;
        select_one(&conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<ActionItem>> {
        self.list_filtered(&ActionItemFilter::default()).await
    }

    async fn update(&self, entity: &ActionItem) -> DomainResult<ActionItem> {
        let conn = self.conn.lock().await;

        let changed = conn.execute(
            "UPDATE action_items
             SET title = ?1, description = ?2, responsible_party = ?3, target_date = ?4,
                 status = ?5, priority = ?6, meeting_id = ?7, notes = ?8, updated_at = ?9
             WHERE id = ?10",
            params![
                entity.title,
                entity.description,
                entity.responsible_party,
                entity.target_date,
                entity.status.as_str(),
                entity.priority.as_str(),
                entity.meeting_id,
                entity.notes,
                timestamp_now(),
                entity.id,
            ],
        )?;
        if changed == 0 {
            return Err(not_found());
        }

        select_one(&conn, entity.id)?.ok_or_else(not_found)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM action_items WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
