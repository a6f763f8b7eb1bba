//! Database Connection and Setup
//!
//! Opens the SQLite database, runs migrations and provides the row
//! helpers shared by the repositories.

use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// One connection, serialized behind an async mutex.
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    conn: SharedConnection,
}

impl DbState {
    pub fn connection(&self) -> SharedConnection {
        self.conn.clone()
    }
}

/// Open (or create) the database at `db_path`; `:memory:` opens a private
/// in-memory database.
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = if db_path == Path::new(":memory:") {
        Connection::open_in_memory()?
    } else {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| DomainError::Internal(format!("Failed to create db dir: {}", e)))?;
        }
        Connection::open(db_path)?
    };

    run_migrations(&conn)?;

    Ok(DbState { conn: Arc::new(Mutex::new(conn)) })
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS action_items (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            responsible_party TEXT NOT NULL,
            target_date TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            priority TEXT NOT NULL DEFAULT 'medium',
            meeting_id INTEGER,
            notes TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_action_items_status ON action_items(status);

        CREATE TABLE IF NOT EXISTS meetings (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            meeting_date TEXT NOT NULL,
            attendees TEXT NOT NULL DEFAULT '[]',
            summary TEXT NOT NULL DEFAULT '',
            topics TEXT NOT NULL DEFAULT '[]',
            action_item_ids TEXT NOT NULL DEFAULT '[]',
            notes TEXT,
            created_at TEXT,
            updated_at TEXT
        );

        CREATE TABLE IF NOT EXISTS deliverables (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            due_date TEXT NOT NULL,
            owner TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'NOT_STARTED',
            completion_percentage REAL NOT NULL DEFAULT 0,
            phase_id INTEGER NOT NULL,
            evidence TEXT NOT NULL DEFAULT '[]',
            updated_at TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_deliverables_phase ON deliverables(phase_id);

        CREATE TABLE IF NOT EXISTS updates (
            id INTEGER PRIMARY KEY,
            type TEXT NOT NULL,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            author TEXT NOT NULL,
            author_email TEXT NOT NULL,
            priority TEXT NOT NULL DEFAULT 'NORMAL',
            created_at TEXT NOT NULL,
            acknowledgements TEXT NOT NULL DEFAULT '[]'
        );

        CREATE TABLE IF NOT EXISTS metrics (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            current REAL NOT NULL DEFAULT 0,
            target REAL NOT NULL DEFAULT 0,
            unit TEXT NOT NULL DEFAULT '',
            notes TEXT NOT NULL DEFAULT '',
            updated_at TEXT
        );

        CREATE TABLE IF NOT EXISTS sample_projects (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            delivery_method TEXT NOT NULL,
            type TEXT NOT NULL DEFAULT '',
            location TEXT,
            size_mb REAL NOT NULL DEFAULT 0,
            size_sf INTEGER,
            description TEXT NOT NULL DEFAULT '',
            ai_value TEXT NOT NULL DEFAULT '',
            document_counts TEXT NOT NULL,
            key_features TEXT NOT NULL DEFAULT '[]',
            highlights TEXT NOT NULL DEFAULT '[]',
            key_files TEXT,
            metrics TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_sample_projects_method ON sample_projects(delivery_method);",
    )?;

    // Comments arrived after the first deliverables schema
    if !column_exists(conn, "deliverables", "comments")? {
        conn.execute("ALTER TABLE deliverables ADD COLUMN comments TEXT", [])?;
    }

    Ok(())
}

// ========================
// Row helpers
// ========================

/// Read a TEXT column into one of the domain's string enums.
pub(super) fn text_enum<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = DomainError>,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e: DomainError| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Read a TEXT column holding a JSON array.
pub(super) fn json_list<T: DeserializeOwned>(row: &Row, idx: usize) -> rusqlite::Result<Vec<T>> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Read a TEXT column holding any JSON value.
pub(super) fn json_value<T: DeserializeOwned>(row: &Row, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Nullable variant of [`json_value`].
pub(super) fn json_opt<T: DeserializeOwned>(row: &Row, idx: usize) -> rusqlite::Result<Option<T>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|raw| {
        serde_json::from_str(&raw)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

pub(super) fn to_json<T: Serialize>(value: &T) -> DomainResult<String> {
    Ok(serde_json::to_string(value)?)
}

/// `0` means "let SQLite pick the next id".
pub(super) fn id_param(id: u32) -> Option<u32> {
    (id != 0).then_some(id)
}
