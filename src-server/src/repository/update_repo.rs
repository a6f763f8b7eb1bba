//! Update Repository
//!
//! Posts are listed newest first. Acknowledgements are a JSON array of
//! reader names appended under the connection lock.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::db::{id_param, json_list, text_enum, to_json, SharedConnection};
use super::traits::Repository;
use crate::domain::{timestamp_now, DomainError, DomainResult, Update, UpdateType};

const COLUMNS: &str = "id, type, title, content, author, author_email, priority, created_at, acknowledgements";

pub struct UpdateRepository {
    conn: SharedConnection,
}

impl UpdateRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub async fn list_by_type(&self, update_type: Option<UpdateType>) -> DomainResult<Vec<Update>> {
        let conn = self.conn.lock().await;
        match update_type {
            Some(t) => {
                let sql = format!(
                    "SELECT {} FROM updates WHERE type = ?1 ORDER BY created_at DESC, id DESC",
                    COLUMNS
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(params![t.as_str()], row_to_update)?;
                Ok(rows.collect::<Result<Vec<_>, _>>()?)
            }
            None => {
                let sql = format!("SELECT {} FROM updates ORDER BY created_at DESC, id DESC", COLUMNS);
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map([], row_to_update)?;
                Ok(rows.collect::<Result<Vec<_>, _>>()?)
            }
        }
    }

    /// Record `email` as having read update `id`. Returns the stored update
    /// and whether a new acknowledgement was added.
    pub async fn acknowledge(&self, id: u32, email: &str) -> DomainResult<(Update, bool)> {
        let conn = self.conn.lock().await;

        let mut update = select_one(&conn, id)?.ok_or_else(not_found)?;
        let added = update.acknowledge(email);
        if added {
            conn.execute(
                "UPDATE updates SET acknowledgements = ?1 WHERE id = ?2",
                params![to_json(&update.acknowledgements)?, id],
            )?;
        }
        Ok((update, added))
    }
}

fn row_to_update(row: &Row) -> rusqlite::Result<Update> {
    Ok(Update {
        id: row.get(0)?,
        update_type: text_enum(row, 1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        author: row.get(4)?,
        author_email: row.get(5)?,
        priority: text_enum(row, 6)?,
        created_at: row.get(7)?,
        acknowledgements: json_list(row, 8)?,
    })
}

fn select_one(conn: &Connection, id: u32) -> DomainResult<Option<Update>> {
    let sql = format!("SELECT {} FROM updates WHERE id = ?1", COLUMNS);
    Ok(conn.query_row(&sql, params![id], row_to_update).optional()?)
}

fn not_found() -> DomainError {
    DomainError::NotFound("Update not found".to_string())
}

#[async_trait]
impl Repository<Update> for UpdateRepository {
    async fn create(&self, entity: &Update) -> DomainResult<Update> {
        let conn = self.conn.lock().await;
        let created_at = if entity.created_at.is_empty() {
            timestamp_now()
        } else {
            entity.created_at.clone()
        };

        conn.execute(
            "INSERT INTO updates (id, type, title, content, author, author_email, priority,
                                  created_at, acknowledgements)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id_param(entity.id),
                entity.update_type.as_str(),
                entity.title,
                entity.content,
                entity.author,
                entity.author_email,
                entity.priority.as_str(),
                created_at,
                to_json(&entity.acknowledgements)?,
            ],
        )?;

        let id = conn.last_insert_rowid() as u32;
        select_one(&conn, id)?.ok_or_else(not_found)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Update>> {
        let conn = self.conn.lock().await;
        select_one(&conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<Update>> {
        self.list_by_type(None).await
    }

    async fn update(&self, entity: &Update) -> DomainResult<Update> {
        let conn = self.conn.lock().await;

        let changed = conn.execute(
            "UPDATE updates
             SET type = ?1, title = ?2, content = ?3, priority = ?4, acknowledgements = ?5
             WHERE id = ?6",
            params![
                entity.update_type.as_str(),
                entity.title,
                entity.content,
                entity.priority.as_str(),
                to_json(&entity.acknowledgements)?,
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
        let changed = conn.execute("DELETE FROM updates WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
