//! Presentation Mapping
//!
//! Enum values to Tailwind classes, icons and labels. Unknown values get
//! the neutral gray style.

use crate::models::{ActionStatus, DeliverableStatus, Owner, Priority, UpdatePriority, UpdateType};

const NEUTRAL: &str = "bg-gray-100 text-gray-800";

// ========================
// Action items
// ========================

pub fn action_status_class(status: &ActionStatus) -> &'static str {
    match status {
        ActionStatus::Completed => "bg-green-100 text-green-800",
        ActionStatus::InProgress => "bg-blue-100 text-blue-800",
        ActionStatus::Pending => "bg-yellow-100 text-yellow-800",
        ActionStatus::Blocked => "bg-red-100 text-red-800",
        ActionStatus::Other(_) => NEUTRAL,
    }
}

pub fn action_status_icon(status: &ActionStatus) -> &'static str {
    match status {
        ActionStatus::Completed => "✓",
        ActionStatus::InProgress => "⟳",
        ActionStatus::Blocked => "✕",
        ActionStatus::Pending | ActionStatus::Other(_) => "○",
    }
}

pub fn priority_class(priority: &Priority) -> &'static str {
    match priority {
        Priority::Urgent => "bg-red-100 text-red-800 border-red-300",
        Priority::High => "bg-orange-100 text-orange-800 border-orange-300",
        Priority::Medium => "bg-yellow-100 text-yellow-800 border-yellow-300",
        Priority::Low | Priority::Other(_) => "bg-gray-100 text-gray-800 border-gray-300",
    }
}

pub fn priority_icon(priority: &Priority) -> &'static str {
    match priority {
        Priority::Urgent => "🔥",
        Priority::High => "⬆",
        Priority::Low => "⬇",
        Priority::Medium | Priority::Other(_) => "→",
    }
}

/// Left border color of an action item card
pub fn priority_border(priority: &Priority) -> &'static str {
    match priority {
        Priority::Urgent => "#dc2626",
        Priority::High => "#ea580c",
        Priority::Medium => "#ca8a04",
        Priority::Low | Priority::Other(_) => "#6b7280",
    }
}

// ========================
// Deliverables
// ========================

pub fn deliverable_status_class(status: &DeliverableStatus) -> &'static str {
    match status {
        DeliverableStatus::Completed => "bg-green-100 text-green-800",
        DeliverableStatus::InProgress => "bg-blue-100 text-blue-800",
        DeliverableStatus::Review => "bg-yellow-100 text-yellow-800",
        DeliverableStatus::Blocked => "bg-red-100 text-red-800",
        DeliverableStatus::NotStarted | DeliverableStatus::Other(_) => NEUTRAL,
    }
}

pub fn owner_class(owner: &Owner) -> &'static str {
    match owner {
        Owner::Partner => "bg-purple-100 text-purple-800",
        Owner::Client => "bg-blue-100 text-blue-800",
        Owner::Joint => "bg-indigo-100 text-indigo-800",
        Owner::Other(_) => NEUTRAL,
    }
}

// ========================
// Updates
// ========================

pub fn update_type_icon(update_type: &UpdateType) -> &'static str {
    match update_type {
        UpdateType::Milestone => "🎯",
        UpdateType::Blocker => "🚫",
        UpdateType::Success => "🎉",
        UpdateType::General => "💬",
        UpdateType::Other(_) => "📝",
    }
}

pub fn update_type_class(update_type: &UpdateType) -> &'static str {
    match update_type {
        UpdateType::Milestone => "bg-green-100 text-green-800 border-green-300",
        UpdateType::Blocker => "bg-red-100 text-red-800 border-red-300",
        UpdateType::Success => "bg-blue-100 text-blue-800 border-blue-300",
        UpdateType::General | UpdateType::Other(_) => "bg-gray-100 text-gray-800 border-gray-300",
    }
}

pub fn update_priority_class(priority: &UpdatePriority) -> &'static str {
    match priority {
        UpdatePriority::High => "bg-red-100 text-red-800",
        UpdatePriority::Normal => "bg-blue-100 text-blue-800",
        UpdatePriority::Fyi | UpdatePriority::Other(_) => NEUTRAL,
    }
}

// ========================
// Jerry
// ========================

/// Badge class and label for a capability or service status
pub fn capability_status(status: &str) -> (&'static str, &'static str) {
    match status {
        "live" | "production" => ("bg-green-100 text-green-800", "✅ Live"),
        "ready" => ("bg-blue-100 text-blue-800", "🔵 Ready"),
        "active" => ("bg-purple-100 text-purple-800", "🟣 Active"),
        "planned" => ("bg-yellow-100 text-yellow-800", "🟡 Planned"),
        _ => (NEUTRAL, "⚪ Unknown"),
    }
}

// ========================
// Progress
// ========================

/// Text color for a percent-of-target value
pub fn progress_text_class(percent: f64) -> &'static str {
    if percent >= 100.0 {
        "text-green-600"
    } else if percent >= 75.0 {
        "text-blue-600"
    } else if percent >= 50.0 {
        "text-yellow-600"
    } else {
        "text-red-600"
    }
}

/// Bar color for a percent-of-target value
pub fn progress_bar_class(percent: f64) -> &'static str {
    if percent >= 100.0 {
        "bg-green-600"
    } else if percent >= 75.0 {
        "bg-blue-600"
    } else if percent >= 50.0 {
        "bg-yellow-600"
    } else {
        "bg-red-600"
    }
}

/// `IN_PROGRESS` -> `IN PROGRESS`, `in_progress` -> `in progress`
pub fn label(raw: &str) -> String {
    raw.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_values_are_neutral() {
        assert_eq!(action_status_class(&ActionStatus::Other("x".into())), NEUTRAL);
        assert_eq!(deliverable_status_class(&DeliverableStatus::Other("x".into())), NEUTRAL);
        assert_eq!(owner_class(&Owner::Other("x".into())), NEUTRAL);
        assert_eq!(update_type_icon(&UpdateType::Other("x".into())), "📝");
        assert_eq!(priority_icon(&Priority::Other("x".into())), "→");
    }

    #[test]
    fn test_known_values() {
        assert_eq!(action_status_icon(&ActionStatus::InProgress), "⟳");
        assert_eq!(priority_border(&Priority::Urgent), "#dc2626");
        assert_eq!(owner_class(&Owner::Joint), "bg-indigo-100 text-indigo-800");
        assert_eq!(update_priority_class(&UpdatePriority::High), "bg-red-100 text-red-800");
        assert_eq!(update_type_class(&UpdateType::Blocker), "bg-red-100 text-red-800 border-red-300");
    }

    #[test]
    fn test_progress_thresholds() {
        assert_eq!(progress_text_class(100.0), "text-green-600");
        assert_eq!(progress_text_class(75.0), "text-blue-600");
        assert_eq!(progress_bar_class(50.0), "bg-yellow-600");
        assert_eq!(progress_bar_class(49.9), "bg-red-600");
    }

    #[test]
    fn test_capability_status() {
        assert_eq!(capability_status("live"), ("bg-green-100 text-green-800", "✅ Live"));
        assert_eq!(capability_status("ready").1, "🔵 Ready");
        assert_eq!(capability_status("planned").1, "🟡 Planned");
        assert_eq!(capability_status("someday"), (NEUTRAL, "⚪ Unknown"));
    }

    #[test]
    fn test_label() {
        assert_eq!(label("NOT_STARTED"), "NOT STARTED");
    }
}
