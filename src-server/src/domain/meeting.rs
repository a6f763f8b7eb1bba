//! Meeting Entity
//!
//! Notes from a client meeting, linked to the action items it produced.

use serde::{Deserialize, Serialize};

use super::entity::{require_date, require_text, DomainResult, Entity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: u32,
    pub title: String,
    /// `YYYY-MM-DD`
    pub meeting_date: String,
    pub attendees: Vec<String>,
    pub summary: String,
    pub topics: Vec<String>,
    pub action_item_ids: Vec<u32>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Entity for Meeting {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMeeting {
    pub title: String,
    pub meeting_date: String,
    pub attendees: Vec<String>,
    pub summary: String,
    pub topics: Vec<String>,
    #[serde(default)]
    pub action_item_ids: Vec<u32>,
}

impl NewMeeting {
    pub fn into_meeting(self) -> DomainResult<Meeting> {
        require_text("title", &self.title)?;
        require_date("meeting_date", &self.meeting_date)?;
        Ok(Meeting {
            id: 0,
            title: self.title,
            meeting_date: self.meeting_date,
            attendees: self.attendees,
            summary: self.summary,
            topics: self.topics,
            action_item_ids: self.action_item_ids,
            notes: None,
            created_at: None,
            updated_at: None,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeetingPatch {
    pub title: Option<String>,
    pub meeting_date: Option<String>,
    pub attendees: Option<Vec<String>>,
    pub summary: Option<String>,
    pub topics: Option<Vec<String>>,
    pub action_item_ids: Option<Vec<u32>>,
    pub notes: Option<String>,
}

impl Meeting {
    pub fn apply(&mut self, patch: MeetingPatch) -> DomainResult<()> {
        if let Some(title) = patch.title {
            require_text("title", &title)?;
            self.title = title;
        }
        if let Some(date) = patch.meeting_date {
            require_date("meeting_date", &date)?;
            self.meeting_date = date;
        }
        if let Some(attendees) = patch.attendees {
            self.attendees = attendees;
        }
        if let Some(summary) = patch.summary {
            self.summary = summary;
        }
        if let Some(topics) = patch.topics {
            self.topics = topics;
        }
        if let Some(ids) = patch.action_item_ids {
            self.action_item_ids = ids;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
        Ok(())
    }
}
