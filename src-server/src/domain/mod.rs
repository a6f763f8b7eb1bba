//! Domain Layer
//!
//! Portal entities, their wire enums and validation rules.

mod entity;
mod action_item;
mod meeting;
mod deliverable;
mod update;
mod metric;
mod jerry;
mod sample_project;

pub use entity::{check_version, timestamp_now, DomainError, DomainResult, Entity};
pub use action_item::{ActionItem, ActionItemFilter, ActionItemPatch, ActionStatus, NewActionItem, Priority};
pub use meeting::{Meeting, MeetingPatch, NewMeeting};
pub use deliverable::{validate_phase, Deliverable, DeliverableProgress, DeliverableStatus, Owner, PHASES};
pub use update::{reader_name, NewUpdate, Update, UpdatePriority, UpdateType};
pub use metric::{metric_key, Metric, MetricRecord};
pub use jerry::{JerryMetrics, JerryStatus, Roadmap, HEADLINE_METRICS};
pub use sample_project::{DeliveryMethod, DocumentCounts, KeyFile, ProjectStats, SampleProject};
