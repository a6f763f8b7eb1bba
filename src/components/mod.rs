//! UI Components
//!
//! Reusable Leptos components.

mod jerry_layout;
mod navigation;
mod protected;
mod status;

pub use jerry_layout::JerryLayout;
pub use navigation::Navigation;
pub use protected::Protected;
pub use status::{Badge, ErrorBanner, Loading, PageError, PageHeader, ProgressBar, StatCard};
