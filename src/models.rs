//! Frontend Models
//!
//! Data structures matching backend JSON. Enumerated fields keep unknown
//! values in an `Other` variant instead of failing the whole response.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// String-backed enum with a catch-all `Other(raw)` variant.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $raw:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            /// Every known value, in display order
            pub fn known() -> Vec<$name> {
                vec![$($name::$variant),+]
            }

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $raw,)+
                    $name::Other(raw) => raw,
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $($raw => $name::$variant,)+
                    _ => $name::Other(raw),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                match value {
                    $name::Other(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }
    };
}

string_enum!(ActionStatus {
    Pending => "pending",
    InProgress => "in_progress",
    Completed => "completed",
    Blocked => "blocked",
});

string_enum!(Priority {
    Urgent => "urgent",
    High => "high",
    Medium => "medium",
    Low => "low",
});

string_enum!(DeliverableStatus {
    NotStarted => "NOT_STARTED",
    InProgress => "IN_PROGRESS",
    Review => "REVIEW",
    Blocked => "BLOCKED",
    Completed => "COMPLETED",
});

string_enum!(Owner {
    Partner => "PARTNER",
    Client => "CLIENT",
    Joint => "JOINT",
});

string_enum!(UpdateType {
    General => "GENERAL",
    Milestone => "MILESTONE",
    Blocker => "BLOCKER",
    Success => "SUCCESS",
});

string_enum!(UpdatePriority {
    High => "HIGH",
    Normal => "NORMAL",
    Fyi => "FYI",
});

string_enum!(DeliveryMethod {
    Data => "DATA",
    DesignBuild => "DESIGN_BUILD",
    PlanSpecBid => "PLAN_SPEC_BID",
});

// ========================
// Entities
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub responsible_party: String,
    pub target_date: String,
    pub status: ActionStatus,
    pub priority: Priority,
    pub meeting_id: Option<u32>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: u32,
    pub title: String,
    pub meeting_date: String,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub action_item_ids: Vec<u32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deliverable {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub due_date: String,
    pub owner: Owner,
    pub status: DeliverableStatus,
    pub completion_percentage: f64,
    pub phase_id: u8,
    #[serde(default)]
    pub evidence: Vec<String>,
    pub comments: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub id: u32,
    #[serde(rename = "type")]
    pub update_type: UpdateType,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub author_email: String,
    pub priority: UpdatePriority,
    pub created_at: String,
    #[serde(default)]
    pub acknowledgements: Vec<String>,
}

impl Update {
    /// Readers are recorded by the local part of their email.
    pub fn acknowledged_by(&self, email: &str) -> bool {
        let reader = email.split('@').next().unwrap_or(email);
        self.acknowledgements.iter().any(|name| name == reader)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub id: u32,
    pub name: String,
    pub current: f64,
    pub target: f64,
    pub unit: String,
    #[serde(default, alias = "description")]
    pub notes: String,
    pub updated_at: Option<String>,
}

/// Signed-in user as reported by `/api/auth/me`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl User {
    pub fn display_name(&self) -> String {
        self.name.clone().or_else(|| self.email.clone()).unwrap_or_else(|| "User".to_string())
    }
}

// ========================
// Response envelopes
// ========================

#[derive(Debug, Clone, Deserialize)]
pub struct ActionItemList {
    pub action_items: Vec<ActionItem>,
    #[serde(default)]
    pub total: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeetingList {
    pub meetings: Vec<Meeting>,
    #[serde(default)]
    pub total: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateList {
    pub updates: Vec<Update>,
    #[serde(default)]
    pub total: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhaseDeliverables {
    pub month: u8,
    pub deliverables: Vec<Deliverable>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCreated {
    pub id: u32,
    pub timestamp: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Acknowledged {
    pub update_id: u32,
    pub user: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResearchDocument {
    pub content: String,
    pub filename: String,
}

// ========================
// Request bodies
// ========================

#[derive(Debug, Clone, Serialize)]
pub struct DeliverableProgress {
    pub status: DeliverableStatus,
    pub completion_percentage: f64,
    pub blockers: Vec<String>,
    pub comments: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricRecord {
    pub metric_id: u32,
    pub value: f64,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewUpdate {
    #[serde(rename = "type")]
    pub update_type: UpdateType,
    pub title: String,
    pub content: String,
    pub priority: UpdatePriority,
    pub author_email: String,
}

// ========================
// Jerry
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JerryMetrics {
    pub symbol_accuracy: f64,
    pub estimates_loaded: u32,
    pub total_bid_value: f64,
    pub symbol_types: u32,
    pub time_savings_per_week: f64,
    pub annual_value: f64,
}

impl Default for JerryMetrics {
    /// Figures shown when the status endpoint is unavailable.
    fn default() -> Self {
        Self {
            symbol_accuracy: 99.1,
            estimates_loaded: 28,
            total_bid_value: 71_900_000.0,
            symbol_types: 124,
            time_savings_per_week: 24.5,
            annual_value: 63_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    pub name: String,
    pub status: String,
    pub description: String,
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(default)]
    pub achievement: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeRepository {
    pub name: String,
    pub description: String,
    pub status: String,
    #[serde(default)]
    pub last_updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub detail: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JerryPhase {
    #[serde(default)]
    pub current: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub next_milestones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JerryStatus {
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
    #[serde(default)]
    pub repositories: Vec<CodeRepository>,
    #[serde(default)]
    pub infrastructure: Vec<Service>,
    #[serde(default)]
    pub metrics: JerryMetrics,
    #[serde(default)]
    pub phase: JerryPhase,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoadmapStage {
    #[serde(default)]
    pub status: String,
    pub target: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Roadmap {
    #[serde(default)]
    pub now: RoadmapStage,
    #[serde(default)]
    pub next: RoadmapStage,
    #[serde(default)]
    pub future: RoadmapStage,
}

// ========================
// Sample projects
// ========================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentCounts {
    pub pdfs: Option<u32>,
    pub excel: Option<u32>,
    pub cad: Option<u32>,
    pub word: Option<u32>,
    pub publisher: Option<u32>,
    #[serde(default)]
    pub total: u32,
}

impl DocumentCounts {
    /// Labelled counts for the kinds that are present and non-zero.
    pub fn kinds(&self) -> Vec<(&'static str, u32)> {
        [("PDFs", self.pdfs), ("Excel", self.excel), ("CAD", self.cad), ("Word", self.word), ("Publisher", self.publisher)]
            .into_iter()
            .filter_map(|(label, count)| count.filter(|c| *c > 0).map(|c| (label, c)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyFile {
    pub name: String,
    pub size_mb: Option<f64>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleProject {
    pub id: u32,
    pub name: String,
    pub delivery_method: DeliveryMethod,
    #[serde(rename = "type", default)]
    pub project_type: String,
    pub location: Option<String>,
    pub size_mb: f64,
    pub size_sf: Option<u32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ai_value: String,
    #[serde(default)]
    pub document_counts: DocumentCounts,
    #[serde(default)]
    pub key_features: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    pub key_files: Option<Vec<KeyFile>>,
    pub metrics: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleProjectList {
    pub projects: Vec<SampleProject>,
    #[serde(default)]
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectStats {
    pub total_projects: usize,
    pub total_documents: u64,
    pub total_size_mb: f64,
    pub total_size_gb: f64,
    #[serde(default)]
    pub delivery_methods: BTreeMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_enum_value_is_kept() {
        let status: ActionStatus = serde_json::from_str("\"on_hold\"").unwrap();
        assert_eq!(status, ActionStatus::Other("on_hold".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"on_hold\"");
    }

    #[test]
    fn test_known_enum_round_trip() {
        let status: DeliverableStatus = serde_json::from_str("\"IN_PROGRESS\"").unwrap();
        assert_eq!(status, DeliverableStatus::InProgress);
        assert_eq!(serde_json::to_value(&UpdatePriority::Fyi).unwrap(), "FYI");
    }

    #[test]
    fn test_metric_accepts_description_alias() {
        let metric: Metric = serde_json::from_str(
            r#"{"id":1,"name":"Accuracy","current":1,"target":2,"unit":"percent","description":"legacy","updated_at":null}"#,
        )
        .unwrap();
        assert_eq!(metric.notes, "legacy");
    }

    #[test]
    fn test_jerry_status_falls_back_to_default_metrics() {
        let status: JerryStatus = serde_json::from_str(r#"{"tagline":"Hi"}"#).unwrap();
        assert_eq!(status.metrics, JerryMetrics::default());
    }

    #[test]
    fn test_acknowledged_by_email_local_part() {
        let update: Update = serde_json::from_str(
            r#"{"id":1,"type":"GENERAL","title":"t","content":"c","author":"a","priority":"FYI","created_at":"2025-10-14","acknowledgements":["pat"]}"#,
        )
        .unwrap();
        assert!(update.acknowledged_by("pat@example.com"));
        assert!(!update.acknowledged_by("sam@example.com"));
    }

    #[test]
    fn test_user_display_name() {
        let user = User { email: Some("pat@example.com".into()), ..Default::default() };
        assert_eq!(user.display_name(), "pat@example.com");
    }

    #[test]
    fn test_sample_project_document_kinds() {
        let project: SampleProject = serde_json::from_str(
            r#"{"id":1,"name":"Ambrose","delivery_method":"PLAN_SPEC_BID","type":"School","size_mb":310.5,
                "document_counts":{"pdfs":120,"cad":0,"word":4,"total":130}}"#,
        )
        .unwrap();
        assert_eq!(project.delivery_method, DeliveryMethod::PlanSpecBid);
        assert_eq!(project.document_counts.kinds(), vec![("PDFs", 120), ("Word", 4)]);
        assert!(project.key_files.is_none());
    }
}
