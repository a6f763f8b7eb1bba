//! Action Item Entity
//!
//! A follow-up task agreed in a client meeting, owned by one party and
//! due on a target date.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::entity::{require_date, require_text, DomainError, DomainResult, Entity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Blocked,
}

impl ActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionStatus::Pending => "pending",
            ActionStatus::InProgress => "in_progress",
            ActionStatus::Completed => "completed",
            ActionStatus::Blocked => "blocked",
        }
    }
}

impl FromStr for ActionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ActionStatus::Pending),
            "in_progress" => Ok(ActionStatus::InProgress),
            "completed" => Ok(ActionStatus::Completed),
            "blocked" => Ok(ActionStatus::Blocked),
            other => Err(DomainError::InvalidInput(format!("unknown status '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "urgent" => Ok(Priority::Urgent),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(DomainError::InvalidInput(format!("unknown priority '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub responsible_party: String,
    /// `YYYY-MM-DD`
    pub target_date: String,
    pub status: ActionStatus,
    pub priority: Priority,
    pub meeting_id: Option<u32>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Entity for ActionItem {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

/// Body of `POST /api/action-items`
#[derive(Debug, Clone, Deserialize)]
pub struct NewActionItem {
    pub title: String,
    pub description: String,
    pub responsible_party: String,
    pub target_date: String,
    #[serde(default)]
    pub status: ActionStatus,
    #[serde(default)]
    pub priority: Priority,
    pub meeting_id: Option<u32>,
}

impl NewActionItem {
    pub fn into_item(self) -> DomainResult<ActionItem> {
        require_text("title", &self.title)?;
        require_text("responsible_party", &self.responsible_party)?;
        require_date("target_date", &self.target_date)?;
        Ok(ActionItem {
            id: 0,
            title: self.title,
            description: self.description,
            responsible_party: self.responsible_party,
            target_date: self.target_date,
            status: self.status,
            priority: self.priority,
            meeting_id: self.meeting_id,
            notes: None,
            created_at: None,
            updated_at: None,
        })
    }
}

/// Body of `PUT /api/action-items/{id}`; absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub responsible_party: Option<String>,
    pub target_date: Option<String>,
    pub status: Option<ActionStatus>,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
}

impl ActionItem {
    pub fn apply(&mut self, patch: ActionItemPatch) -> DomainResult<()> {
        if let Some(title) = patch.title {
            require_text("title", &title)?;
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(party) = patch.responsible_party {
            require_text("responsible_party", &party)?;
            self.responsible_party = party;
        }
        if let Some(date) = patch.target_date {
            require_date("target_date", &date)?;
            self.target_date = date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
        Ok(())
    }
}

/// Server-side filters. Every field that is set must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionItemFilter {
    pub status: Option<ActionStatus>,
    pub responsible_party: Option<String>,
    pub meeting_id: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item() -> NewActionItem {
        NewActionItem {
            title: "Send drawings".to_string(),
            description: String::new(),
            responsible_party: "Client".to_string(),
            target_date: "2026-02-01".to_string(),
            status: ActionStatus::default(),
            priority: Priority::default(),
            meeting_id: None,
        }
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [ActionStatus::Pending, ActionStatus::InProgress, ActionStatus::Completed, ActionStatus::Blocked] {
            assert_eq!(status.as_str().parse::<ActionStatus>().unwrap(), status);
        }
        assert!("done".parse::<ActionStatus>().is_err());
    }

    #[test]
    fn test_new_item_defaults() {
        let item = new_item().into_item().unwrap();
        assert_eq!(item.status, ActionStatus::Pending);
        assert_eq!(item.priority, Priority::Medium);
    }

    #[test]
    fn test_new_item_rejects_bad_date() {
        let mut raw = new_item();
        raw.target_date = "next week".to_string();
        assert!(matches!(raw.into_item(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_apply_patch_only_touches_given_fields() {
        let mut item = new_item().into_item().unwrap();
        item.apply(ActionItemPatch {
            status: Some(ActionStatus::Completed),
            notes: Some("done on call".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(item.status, ActionStatus::Completed);
        assert_eq!(item.notes.as_deref(), Some("done on call"));
        assert_eq!(item.title, "Send drawings");
    }

    #[test]
    fn test_deserialize_uses_wire_names() {
        let item: NewActionItem = serde_json::from_str(
            r#"{"title":"t","description":"d","responsible_party":"p","target_date":"2026-01-01","status":"in_progress","priority":"urgent"}"#,
        )
        .unwrap();
        assert_eq!(item.status, ActionStatus::InProgress);
        assert_eq!(item.priority, Priority::Urgent);
    }
}
