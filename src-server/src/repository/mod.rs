//! Repository Layer
//!
//! Data access abstractions and their SQLite implementations.

mod traits;
mod db;
mod action_item_repo;
mod meeting_repo;
mod deliverable_repo;
mod update_repo;
mod metric_repo;
mod sample_project_repo;

#[cfg(test)]
mod tests;

pub use traits::Repository;
pub use db::{init_db, DbState, SharedConnection};
pub use action_item_repo::ActionItemRepository;
pub use meeting_repo::MeetingRepository;
pub use deliverable_repo::DeliverableRepository;
pub use update_repo::UpdateRepository;
pub use metric_repo::MetricRepository;
pub use sample_project_repo::SampleProjectRepository;

/// All portal repositories over one shared connection.
pub struct Repositories {
    pub action_items: ActionItemRepository,
    pub meetings: MeetingRepository,
    pub deliverables: DeliverableRepository,
    pub updates: UpdateRepository,
    pub metrics: MetricRepository,
    pub sample_projects: SampleProjectRepository,
}

impl Repositories {
    pub fn new(db: &DbState) -> Self {
        Self {
            action_items: ActionItemRepository::new(db.connection()),
            meetings: MeetingRepository::new(db.connection()),
            deliverables: DeliverableRepository::new(db.connection()),
            updates: UpdateRepository::new(db.connection()),
            metrics: MetricRepository::new(db.connection()),
            sample_projects: SampleProjectRepository::new(db.connection()),
        }
    }
}
