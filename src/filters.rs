//! List Derivations
//!
//! Client-side filtering, ordering and counts over fetched collections.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::models::{ActionItem, ActionStatus, Meeting, Priority};

pub fn priority_rank(priority: &Priority) -> u8 {
    match priority {
        Priority::Urgent => 0,
        Priority::High => 1,
        Priority::Medium => 2,
        Priority::Low => 3,
        Priority::Other(_) => 4,
    }
}

fn by_priority_then_date(a: &ActionItem, b: &ActionItem) -> Ordering {
    priority_rank(&a.priority)
        .cmp(&priority_rank(&b.priority))
        .then_with(|| a.target_date.cmp(&b.target_date))
}

/// Stable: equal (priority, date) pairs keep server order.
pub fn sort_action_items(items: &mut [ActionItem]) {
    items.sort_by(by_priority_then_date);
}

/// Priority filter plus ordering for display.
pub fn visible_action_items(items: &[ActionItem], priority: Option<&Priority>) -> Vec<ActionItem> {
    let mut visible: Vec<ActionItem> = items
        .iter()
        .filter(|item| priority.map_or(true, |p| &item.priority == p))
        .cloned()
        .collect();
    sort_action_items(&mut visible);
    visible
}

/// Sorted, de-duplicated responsible parties
pub fn responsible_parties(items: &[ActionItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.responsible_party.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionItemStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub urgent: usize,
}

impl ActionItemStats {
    pub fn from_items(items: &[ActionItem]) -> Self {
        let count = |status: ActionStatus| items.iter().filter(|i| i.status == status).count();
        Self {
            total: items.len(),
            pending: count(ActionStatus::Pending),
            in_progress: count(ActionStatus::InProgress),
            completed: count(ActionStatus::Completed),
            urgent: items.iter().filter(|i| i.priority == Priority::Urgent).count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeetingStats {
    pub meetings: usize,
    /// Attendee slots summed over meetings
    pub attendees: usize,
    pub linked_action_items: usize,
}

impl MeetingStats {
    pub fn from_meetings(meetings: &[Meeting]) -> Self {
        Self {
            meetings: meetings.len(),
            attendees: meetings.iter().map(|m| m.attendees.len()).sum(),
            linked_action_items: meetings.iter().map(|m| m.action_item_ids.len()).sum(),
        }
    }
}

/// Action items listed on a meeting
pub fn items_for_meeting(meeting: &Meeting, items: &[ActionItem]) -> Vec<ActionItem> {
    items
        .iter()
        .filter(|item| meeting.action_item_ids.contains(&item.id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, priority: Priority, target_date: &str, party: &str) -> ActionItem {
        ActionItem {
            id,
            title: format!("Item {}", id),
            description: String::new(),
            responsible_party: party.to_string(),
            target_date: target_date.to_string(),
            status: ActionStatus::Pending,
            priority,
            meeting_id: None,
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_urgent_before_high() {
        let mut items = vec![
            item(1, Priority::High, "2026-02-01", "Client"),
            item(2, Priority::Urgent, "2026-03-01", "Client"),
        ];
        sort_action_items(&mut items);
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn test_date_breaks_ties_and_unknown_sorts_last() {
        let mut items = vec![
            item(1, Priority::Other("someday".into()), "2026-01-01", "A"),
            item(2, Priority::Low, "2026-05-01", "A"),
            item(3, Priority::Low, "2026-04-01", "A"),
            item(4, Priority::Low, "2026-04-01", "A"),
        ];
        sort_action_items(&mut items);
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![3, 4, 2, 1]);
    }

    #[test]
    fn test_priority_filter() {
        let items = vec![
            item(1, Priority::High, "2026-02-01", "A"),
            item(2, Priority::Low, "2026-02-01", "A"),
        ];
        let visible = visible_action_items(&items, Some(&Priority::Low));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);
        assert_eq!(visible_action_items(&items, None).len(), 2);
    }

    #[test]
    fn test_responsible_parties() {
        let items = vec![
            item(1, Priority::High, "2026-02-01", "Partner"),
            item(2, Priority::High, "2026-02-01", "Client"),
            item(3, Priority::High, "2026-02-01", "Partner"),
        ];
        assert_eq!(responsible_parties(&items), vec!["Client".to_string(), "Partner".to_string()]);
    }

    #[test]
    fn test_stats() {
        let mut items = vec![
            item(1, Priority::Urgent, "2026-02-01", "A"),
            item(2, Priority::Low, "2026-02-01", "A"),
        ];
        items[1].status = ActionStatus::Completed;
        let stats = ActionItemStats::from_items(&items);
        assert_eq!(stats, ActionItemStats { total: 2, pending: 1, in_progress: 0, completed: 1, urgent: 1 });
    }

    #[test]
    fn test_meeting_join_and_stats() {
        let meeting = Meeting {
            id: 7,
            title: "Kickoff".into(),
            meeting_date: "2025-10-14".into(),
            attendees: vec!["A".into(), "B".into()],
            summary: String::new(),
            topics: vec![],
            action_item_ids: vec![2],
            notes: None,
        };
        let items = vec![item(1, Priority::Low, "2026-01-01", "A"), item(2, Priority::Low, "2026-01-01", "A")];
        let linked = items_for_meeting(&meeting, &items);
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].id, 2);

        let stats = MeetingStats::from_meetings(&[meeting]);
        assert_eq!(stats, MeetingStats { meetings: 1, attendees: 2, linked_action_items: 1 });
    }
}
