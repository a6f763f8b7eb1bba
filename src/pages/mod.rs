//! Pages
//!
//! One component per route.

mod action_items;
mod communication;
mod dashboard;
mod deliverable_detail;
mod deliverables;
mod home;
mod jerry_mentors;
mod jerry_summary;
mod jerry_tools;
mod meetings;
mod metrics;
mod not_found;
mod research;
mod sample_projects;

pub use action_items::ActionItemsPage;
pub use communication::CommunicationPage;
pub use dashboard::DashboardPage;
pub use deliverable_detail::DeliverableDetailPage;
pub use deliverables::DeliverablesPage;
pub use home::HomePage;
pub use jerry_mentors::JerryMentorsPage;
pub use jerry_summary::JerrySummaryPage;
pub use jerry_tools::JerryToolsPage;
pub use meetings::MeetingsPage;
pub use metrics::MetricsPage;
pub use not_found::NotFoundPage;
pub use research::ResearchPage;
pub use sample_projects::SampleProjectsPage;
