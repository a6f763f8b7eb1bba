//! Initial data
//!
//! Loads a JSON document of portal records and inserts each collection into
//! its table if that table is still empty.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::domain::{ActionItem, Deliverable, Meeting, Metric, SampleProject, Update};
use crate::repository::{Repositories, Repository};

#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
    #[serde(default)]
    pub meetings: Vec<Meeting>,
    #[serde(default)]
    pub deliverables: Vec<Deliverable>,
    #[serde(default)]
    pub updates: Vec<Update>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub sample_projects: Vec<SampleProject>,
}

pub fn load_file(path: &Path) -> Result<SeedData> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading seed file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing seed file {}", path.display()))
}

async fn fill<T, R>(repo: &R, rows: &[T], table: &str) -> Result<usize>
where
    T: crate::domain::Entity + Sync,
    R: Repository<T>,
{
    if rows.is_empty() || !repo.list().await?.is_empty() {
        return Ok(0);
    }
    for row in rows {
        repo.create(row).await?;
    }
    info!(table, rows = rows.len(), "seeded");
    Ok(rows.len())
}

/// Returns the number of inserted rows.
pub async fn apply(repos: &Repositories, data: &SeedData) -> Result<usize> {
    let mut inserted = 0;
    inserted += fill(&repos.meetings, &data.meetings, "meetings").await?;
    inserted += fill(&repos.action_items, &data.action_items, "action_items").await?;
    inserted += fill(&repos.deliverables, &data.deliverables, "deliverables").await?;
    inserted += fill(&repos.updates, &data.updates, "updates").await?;
    inserted += fill(&repos.metrics, &data.metrics, "metrics").await?;
    inserted += fill(&repos.sample_projects, &data.sample_projects, "sample_projects").await?;
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::init_db;
    use std::io::Write;

    const SEED: &str = r#"{
        "metrics": [
            {"id": 1, "name": "Drawing Parsing Accuracy", "current": 92.5, "target": 95, "unit": "percent", "updated_at": null}
        ],
        "updates": [
            {"id": 1, "type": "MILESTONE", "title": "Kickoff", "content": "Started", "author": "pm",
             "author_email": "pm@example.com", "priority": "HIGH", "created_at": "2025-01-02T09:00:00.000Z",
             "acknowledgements": []}
        ],
        "sample_projects": [
            {"id": 3, "name": "SANITIZER ADDITION", "delivery_method": "PLAN_SPEC_BID", "type": "Industrial",
             "size_mb": 2048.5, "description": "Process addition", "ai_value": "Change orders",
             "document_counts": {"pdfs": 900, "total": 1200}, "key_features": ["269 change orders"],
             "highlights": [], "metrics": {"change_orders": 269}}
        ]
    }"#;

    #[tokio::test]
    async fn test_apply_only_fills_empty_tables() {
        let db = init_db(Path::new(":memory:")).await.unwrap();
        let repos = Repositories::new(&db);
        let data: SeedData = serde_json::from_str(SEED).unwrap();

        assert_eq!(apply(&repos, &data).await.unwrap(), 3);
        assert_eq!(apply(&repos, &data).await.unwrap(), 0);

        let metrics = repos.metrics.list().await.unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].notes, "");

        let project = repos.sample_projects.find_by_id(3).await.unwrap().unwrap();
        assert_eq!(project.delivery_method, crate::domain::DeliveryMethod::PlanSpecBid);
        assert_eq!(project.key_files, None);
        assert_eq!(project.metrics.unwrap()["change_orders"], 269);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SEED.as_bytes()).unwrap();

        let data = load_file(file.path()).unwrap();
        assert_eq!(data.metrics.len(), 1);
        assert!(data.action_items.is_empty());
    }

    #[test]
    fn test_load_file_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        assert!(load_file(file.path()).is_err());
    }
}
