//! Sample Project Repository
//!
//! Document counts, feature lists, key files and metrics are stored as JSON.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::db::{id_param, json_list, json_opt, json_value, text_enum, to_json, SharedConnection};
use super::traits::Repository;
use crate::domain::{timestamp_now, DeliveryMethod, DomainError, DomainResult, ProjectStats, SampleProject};

const COLUMNS: &str = "id, name, delivery_method, type, location, size_mb, size_sf, description, ai_value, \
                       document_counts, key_features, highlights, key_files, metrics, created_at, updated_at";

pub struct SampleProjectRepository {
    conn: SharedConnection,
}

impl SampleProjectRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Projects delivered by `method`, or all of them, ordered by id.
    pub async fn list_by_method(&self, method: Option<DeliveryMethod>) -> DomainResult<Vec<SampleProject>> {
        let conn = self.conn.lock().await;
        match method {
            Some(method) => {
                let sql = format!("SELECT {} FROM sample_projects WHERE delivery_method = ?1 ORDER BY id", COLUMNS);
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(params![method.as_str()], row_to_project)?;
                Ok(rows.collect::<Result<Vec<_>, _>>()?)
            }
            None => select_all(&conn),
        }
    }

    pub async fn stats(&self) -> DomainResult<ProjectStats> {
        let conn = self.conn.lock().await;
        Ok(ProjectStats::from_projects(&select_all(&conn)?))
    }
}

fn row_to_project(row: &Row) -> rusqlite::Result<SampleProject> {
    Ok(SampleProject {
        id: row.get(0)?,
        name: row.get(1)?,
        delivery_method: text_enum(row, 2)?,
        project_type: row.get(3)?,
        location: row.get(4)?,
        size_mb: row.get(5)?,
        size_sf: row.get(6)?,
        description: row.get(7)?,
        ai_value: row.get(8)?,
        document_counts: json_value(row, 9)?,
        key_features: json_list(row, 10)?,
        highlights: json_list(row, 11)?,
        key_files: json_opt(row, 12)?,
        metrics: json_opt(row, 13)?,
        created_at: row.get(14)?,
        updated_at: row.get(15)?,
    })
}

fn select_all(conn: &Connection) -> DomainResult<Vec<SampleProject>> {
    let sql = format!("SELECT {} FROM sample_projects ORDER BY id", COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_project)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

fn select_one(conn: &Connection, id: u32) -> DomainResult<Option<SampleProject>> {
    let sql = format!("SELECT {} FROM sample_projects WHERE id = ?1", COLUMNS);
    Ok(conn.query_row(&sql, params![id], row_to_project).optional()?)
}

fn opt_json<T: serde::Serialize>(value: &Option<T>) -> DomainResult<Option<String>> {
    value.as_ref().map(to_json).transpose()
}

fn not_found(id: u32) -> DomainError {
    DomainError::NotFound(format!("Project ID {} not found", id))
}

#[async_trait]
impl Repository<SampleProject> for SampleProjectRepository {
    async fn create(&self, entity: &SampleProject) -> DomainResult<SampleProject> {
        let conn = self.conn.lock().await;
        let now = timestamp_now();

        conn.execute(
            "INSERT INTO sample_projects (id, name, delivery_method, type, location, size_mb, size_sf,
                                          description, ai_value, document_counts, key_features, highlights,
                                          key_files, metrics, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                id_param(entity.id),
                entity.name,
                entity.delivery_method.as_str(),
                entity.project_type,
                entity.location,
                entity.size_mb,
                entity.size_sf,
                entity.description,
                entity.ai_value,
                to_json(&entity.document_counts)?,
                to_json(&entity.key_features)?,
                to_json(&entity.highlights)?,
                opt_json(&entity.key_files)?,
                opt_json(&entity.metrics)?,
                entity.created_at.clone().unwrap_or_else(|| now.clone()),
                entity.updated_at.clone().unwrap_or(now),
            ],
        )?;

        let id = conn.last_insert_rowid() as u32;
        select_one(&conn, id)?.ok_or_else(|| not_found(id))
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<SampleProject>> {
        let conn = self.conn.lock().await;
        select_one(&conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<SampleProject>> {
        let conn = self.conn.lock().await;
        select_all(&conn)
    }

    async fn update(&self, entity: &SampleProject) -> DomainResult<SampleProject> {
        let conn = self.conn.lock().await;

        let changed = conn.execute(
            "UPDATE sample_projects
             SET name = ?1, delivery_method = ?2, type = ?3, location = ?4, size_mb = ?5, size_sf = ?6,
                 description = ?7, ai_value = ?8, document_counts = ?9, key_features = ?10,
                 highlights = ?11, key_files = ?12, metrics = ?13, updated_at = ?14
             WHERE id = ?15",
            params![
                entity.name,
                entity.delivery_method.as_str(),
                entity.project_type,
                entity.location,
                entity.size_mb,
                entity.size_sf,
                entity.description,
                entity.ai_value,
                to_json(&entity.document_counts)?,
                to_json(&entity.key_features)?,
                to_json(&entity.highlights)?,
                opt_json(&entity.key_files)?,
                opt_json(&entity.metrics)?,
                timestamp_now(),
                entity.id,
            ],
        )?;
        if changed == 0 {
            return Err(not_found(entity.id));
        }

        select_one(&conn, entity.id)?.ok_or_else(|| not_found(entity.id))
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM sample_projects WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
