//! Research document endpoint (public)
//!
//! Serves a fixed allow-list of documents from the research directory.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use regex::Regex;
use serde::Serialize;
use std::io::ErrorKind;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::AppState;

/// Document id to file name.
pub const DOCUMENTS: &[(&str, &str)] = &[
    ("togal-readme", "togal-readme.md"),
    ("togal-initial-research", "togal-initial-research.md"),
    ("patrick-murphy-analysis", "patrick-murphy-analysis.md"),
    ("patrick-murphy-transcript", TRANSCRIPT),
];

/// The one document that gets transcript spacing.
pub const TRANSCRIPT: &str = "patrick-murphy-transcript.txt";

#[derive(Debug, Serialize)]
pub struct ResearchDocument {
    pub content: String,
    pub filename: String,
}

#[derive(Debug)]
pub enum ResearchError {
    UnknownDocument,
    Missing,
    Unreadable,
}

impl IntoResponse for ResearchError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ResearchError::UnknownDocument => (StatusCode::NOT_FOUND, "File not found"),
            ResearchError::Missing => (StatusCode::NOT_FOUND, "File not found on filesystem"),
            ResearchError::Unreadable => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file"),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub fn file_for(id: &str) -> Option<&'static str> {
    DOCUMENTS.iter().find(|(key, _)| *key == id).map(|(_, file)| *file)
}

fn timestamp_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[\d{2}:\d{2}\]").unwrap())
}

/// Puts a blank line after every `[mm:ss]` line of a transcript. Line
/// endings and a final newline are left as they are.
pub fn space_transcript(raw: &str) -> String {
    raw.split('\n')
        .map(|line| {
            if timestamp_line().is_match(line) {
                format!("{}\n", line)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn document(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<ResearchDocument>, ResearchError> {
    let filename = file_for(&id).ok_or(ResearchError::UnknownDocument)?;
    let path = state.config.research_dir.join(filename);

    let raw = tokio::fs::read_to_string(&path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            debug!(path = %path.display(), "research document missing");
            ResearchError::Missing
        } else {
            warn!(path = %path.display(), error = %e, "failed to read research document");
            ResearchError::Unreadable
        }
    })?;

    let content = if filename == TRANSCRIPT { space_transcript(&raw) } else { raw };
    Ok(Json(ResearchDocument { content, filename: filename.to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list() {
        assert_eq!(file_for("togal-readme"), Some("togal-readme.md"));
        assert_eq!(file_for("patrick-murphy-transcript"), Some("patrick-murphy-transcript.txt"));
        assert_eq!(file_for("../secrets"), None);
    }

    #[test]
    fn test_space_transcript() {
        let raw = "[00:01] Hello\nsecond line\n[12:30] Bye";
        assert_eq!(space_transcript(raw), "[00:01] Hello\n\nsecond line\n[12:30] Bye\n");
    }

    #[test]
    fn test_space_transcript_keeps_line_endings() {
        assert_eq!(space_transcript("[00:01] a\nb\n"), "[00:01] a\n\nb\n");
        assert_eq!(space_transcript("[00:01] a\r\nb\r\n"), "[00:01] a\r\n\nb\r\n");
        assert_eq!(space_transcript("plain\r\ntext"), "plain\r\ntext");
    }

    #[test]
    fn test_space_transcript_needs_two_digits() {
        assert_eq!(space_transcript("[0:01] short"), "[0:01] short");
    }
}
