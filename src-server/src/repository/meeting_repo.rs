//! Meeting Repository
//!
//! Attendees, topics and linked action item ids are stored as JSON arrays.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::db::{id_param, json_list, to_json, SharedConnection};
use super::traits::Repository;
use crate::domain::{timestamp_now, DomainError, DomainResult, Meeting};

const COLUMNS: &str = "id, title, meeting_date, attendees, summary, topics, action_item_ids, \
                       notes, created_at, updated_at";

pub struct MeetingRepository {
    conn: SharedConnection,
}

impl MeetingRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Meetings held on `date`.
    pub async fn list_by_date(&self, date: &str) -> DomainResult<Vec<Meeting>> {
        let conn = self.conn.lock().await;
        let sql = format!("SELECT {} FROM meetings WHERE meeting_date = ?1 ORDER BY id", COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![date], row_to_meeting)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn row_to_meeting(row: &Row) -> rusqlite::Result<Meeting> {
    Ok(Meeting {
        id: row.get(0)?,
        title: row.get(1)?,
        meeting_date: row.get(2)?,
        attendees: json_list(row, 3)?,
        summary: row.get(4)?,
        topics: json_list(row, 5)?,
        action_item_ids: json_list(row, 6)?,
        notes: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

fn select_one(conn: &Connection, id: u32) -> DomainResult<Option<Meeting>> {
    let sql = format!("SELECT {} FROM meetings WHERE id = ?1", COLUMNS);
    Ok(conn.query_row(&sql, params![id], row_to_meeting).optional()?)
}

fn not_found() -> DomainError {
    DomainError::NotFound("Meeting not found".to_string())
}

#[async_trait]
impl Repository<Meeting> for MeetingRepository {
    async fn create(&self, entity: &Meeting) -> DomainResult<Meeting> {
        let conn = self.conn.lock().await;
        let now = timestamp_now();

        conn.execute(
            "INSERT INTO meetings (id, title, meeting_date, attendees, summary, topics,
                                   action_item_ids, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                id_param(entity.id),
                entity.title,
                entity.meeting_date,
                to_json(&entity.attendees)?,
                entity.summary,
                to_json(&entity.topics)?,
                to_json(&entity.action_item_ids)?,
                entity.notes,
                entity.created_at.clone().unwrap_or_else(|| now.clone()),
                entity.updated_at.clone().unwrap_or(now),
            ],
        )?;

        let id = conn.last_insert_rowid() as u32;
        select_one(&conn, id)?.ok_or_else(not_found)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Meeting>> {
        let conn = self.conn.lock().await;
        select_one(&conn, id)
    }

    /// Most recent meeting first.
    async fn list(&self) -> DomainResult<Vec<Meeting>> {
        let conn = self.conn.lock().await;
        let sql = format!("SELECT {} FROM meetings ORDER BY meeting_date DESC, id DESC", COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_meeting)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    async fn update(&self, entity: &Meeting) -> DomainResult<Meeting> {
        let conn = self.conn.lock().await;

        let changed = conn.execute(
            "UPDATE meetings
             SET title = ?1, meeting_date = ?2, attendees = ?3, summary = ?4, topics = ?5,
                 action_item_ids = ?6, notes = ?7, updated_at = ?8
             WHERE id = ?9",
            params![
                entity.title,
                entity.meeting_date,
                to_json(&entity.attendees)?,
                entity.summary,
                to_json(&entity.topics)?,
                to_json(&entity.action_item_ids)?,
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
        let changed = conn.execute("DELETE FROM meetings WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
