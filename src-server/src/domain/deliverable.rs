//! Deliverable Entity
//!
//! A contracted output due in one of the four project phases.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::entity::{DomainError, DomainResult, Entity};

pub const PHASES: std::ops::RangeInclusive<u8> = 1..=4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Owner {
    Partner,
    Client,
    Joint,
}

impl Owner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Owner::Partner => "PARTNER",
            Owner::Client => "CLIENT",
            Owner::Joint => "JOINT",
        }
    }
}

impl FromStr for Owner {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PARTNER" => Ok(Owner::Partner),
            "CLIENT" => Ok(Owner::Client),
            "JOINT" => Ok(Owner::Joint),
            other => Err(DomainError::InvalidInput(format!("unknown owner '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliverableStatus {
    #[default]
    NotStarted,
    InProgress,
    Review,
    Blocked,
    Completed,
}

impl DeliverableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliverableStatus::NotStarted => "NOT_STARTED",
            DeliverableStatus::InProgress => "IN_PROGRESS",
            DeliverableStatus::Review => "REVIEW",
            DeliverableStatus::Blocked => "BLOCKED",
            DeliverableStatus::Completed => "COMPLETED",
        }
    }
}

impl FromStr for DeliverableStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_STARTED" => Ok(DeliverableStatus::NotStarted),
            "IN_PROGRESS" => Ok(DeliverableStatus::InProgress),
            "REVIEW" => Ok(DeliverableStatus::Review),
            "BLOCKED" => Ok(DeliverableStatus::Blocked),
            "COMPLETED" => Ok(DeliverableStatus::Completed),
            other => Err(DomainError::InvalidInput(format!("unknown status '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deliverable {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub due_date: String,
    pub owner: Owner,
    pub status: DeliverableStatus,
    pub completion_percentage: f64,
    pub phase_id: u8,
    #[serde(default)]
    pub evidence: Vec<String>,
    /// Markdown
    pub comments: Option<String>,
    pub updated_at: Option<String>,
}

impl Entity for Deliverable {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

/// Body of `PUT /api/deliverables/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct DeliverableProgress {
    pub status: DeliverableStatus,
    pub completion_percentage: f64,
    #[serde(default)]
    pub blockers: Vec<String>,
    #[serde(default)]
    pub comments: String,
    /// `updated_at` the editor last saw; a mismatch is a conflict.
    pub expected_updated_at: Option<String>,
}

impl DeliverableProgress {
    pub fn validate(&self) -> DomainResult<()> {
        if !(0.0..=100.0).contains(&self.completion_percentage) {
            return Err(DomainError::InvalidInput(
                "completion_percentage must be between 0 and 100".to_string(),
            ));
        }
        Ok(())
    }
}

impl Deliverable {
    /// Status and percentage always change; comments only when non-empty.
    pub fn apply_progress(&mut self, progress: &DeliverableProgress) {
        self.status = progress.status;
        self.completion_percentage = progress.completion_percentage;
        if !progress.comments.trim().is_empty() {
            self.comments = Some(progress.comments.clone());
        }
    }
}

pub fn validate_phase(phase: i64) -> DomainResult<u8> {
    u8::try_from(phase)
        .ok()
        .filter(|p| PHASES.contains(p))
        .ok_or_else(|| DomainError::InvalidInput("Phase must be 1, 2, 3, or 4".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phase() {
        assert_eq!(validate_phase(1).unwrap(), 1);
        assert_eq!(validate_phase(4).unwrap(), 4);
        assert!(validate_phase(0).is_err());
        assert!(validate_phase(5).is_err());
        assert!(validate_phase(-1).is_err());
        assert!(validate_phase(300).is_err());
    }

    #[test]
    fn test_progress_rejects_out_of_range() {
        let progress = DeliverableProgress {
            status: DeliverableStatus::Review,
            completion_percentage: 120.0,
            blockers: vec![],
            comments: String::new(),
            expected_updated_at: None,
        };
        assert!(progress.validate().is_err());
    }

    #[test]
    fn test_status_wire_names() {
        let status: DeliverableStatus = serde_json::from_str("\"NOT_STARTED\"").unwrap();
        assert_eq!(status, DeliverableStatus::NotStarted);
        assert_eq!(serde_json::to_string(&Owner::Joint).unwrap(), "\"JOINT\"");
    }
}
