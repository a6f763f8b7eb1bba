//! Update Entity
//!
//! A communication post on the project feed. Readers acknowledge posts;
//! each reader appears at most once in `acknowledgements`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::entity::{require_text, DomainError, DomainResult, Entity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum UpdateType {
    #[default]
    General,
    Milestone,
    Blocker,
    Success,
}

impl UpdateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateType::General => "GENERAL",
            UpdateType::Milestone => "MILESTONE",
            UpdateType::Blocker => "BLOCKER",
            UpdateType::Success => "SUCCESS",
        }
    }
}

impl FromStr for UpdateType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GENERAL" => Ok(UpdateType::General),
            "MILESTONE" => Ok(UpdateType::Milestone),
            "BLOCKER" => Ok(UpdateType::Blocker),
            "SUCCESS" => Ok(UpdateType::Success),
            other => Err(DomainError::InvalidInput(format!("unknown update type '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum UpdatePriority {
    High,
    #[default]
    Normal,
    Fyi,
}

impl UpdatePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdatePriority::High => "HIGH",
            UpdatePriority::Normal => "NORMAL",
            UpdatePriority::Fyi => "FYI",
        }
    }
}

impl FromStr for UpdatePriority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HIGH" => Ok(UpdatePriority::High),
            "NORMAL" => Ok(UpdatePriority::Normal),
            "FYI" => Ok(UpdatePriority::Fyi),
            other => Err(DomainError::InvalidInput(format!("unknown priority '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub id: u32,
    #[serde(rename = "type")]
    pub update_type: UpdateType,
    pub title: String,
    /// Markdown
    pub content: String,
    pub author: String,
    pub author_email: String,
    pub priority: UpdatePriority,
    pub created_at: String,
    pub acknowledgements: Vec<String>,
}

impl Entity for Update {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

/// Body of `POST /api/updates`
#[derive(Debug, Clone, Deserialize)]
pub struct NewUpdate {
    #[serde(rename = "type")]
    pub update_type: UpdateType,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub priority: UpdatePriority,
    pub author_email: String,
}

impl NewUpdate {
    pub fn into_update(self, created_at: String) -> DomainResult<Update> {
        require_text("title", &self.title)?;
        require_text("content", &self.content)?;
        require_text("author_email", &self.author_email)?;
        Ok(Update {
            id: 0,
            update_type: self.update_type,
            title: self.title,
            content: self.content,
            author: reader_name(&self.author_email),
            author_email: self.author_email,
            priority: self.priority,
            created_at,
            acknowledgements: Vec::new(),
        })
    }
}

/// Name recorded for a reader: the local part of their email.
pub fn reader_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

impl Update {
    /// Records `email` as a reader. Returns false if already present.
    pub fn acknowledge(&mut self, email: &str) -> bool {
        let name = reader_name(email);
        if self.acknowledgements.contains(&name) {
            return false;
        }
        self.acknowledgements.push(name);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Update {
        NewUpdate {
            update_type: UpdateType::Milestone,
            title: "Phase 3 signed off".to_string(),
            content: "**Done**".to_string(),
            priority: UpdatePriority::High,
            author_email: "pm@example.com".to_string(),
        }
        .into_update("2026-01-01T00:00:00.000Z".to_string())
        .unwrap()
    }

    #[test]
    fn test_author_is_email_local_part() {
        assert_eq!(post().author, "pm");
    }

    #[test]
    fn test_acknowledge_is_idempotent() {
        let mut update = post();
        assert!(update.acknowledge("sam@example.com"));
        assert!(!update.acknowledge("sam@example.com"));
        assert!(!update.acknowledge("sam@other.org"));
        assert_eq!(update.acknowledgements, vec!["sam".to_string()]);
    }

    #[test]
    fn test_blank_title_rejected() {
        let result = NewUpdate {
            update_type: UpdateType::General,
            title: "  ".to_string(),
            content: "body".to_string(),
            priority: UpdatePriority::Normal,
            author_email: "a@b.c".to_string(),
        }
        .into_update(String::new());
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_type_field_is_named_type_on_the_wire() {
        let json = serde_json::to_value(post()).unwrap();
        assert_eq!(json["type"], "MILESTONE");
        assert_eq!(json["priority"], "HIGH");
    }
}
