//! Client Routes
//!
//! Every navigation is a full page load; the path picks the page.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JerryTab {
    Summary,
    Tools,
    Mentors,
}

impl JerryTab {
    pub const ALL: [JerryTab; 3] = [JerryTab::Summary, JerryTab::Tools, JerryTab::Mentors];

    pub fn path(&self) -> &'static str {
        match self {
            JerryTab::Summary => "/jerry",
            JerryTab::Tools => "/jerry/tools",
            JerryTab::Mentors => "/jerry/mentors",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JerryTab::Summary => "Summary",
            JerryTab::Tools => "Tools",
            JerryTab::Mentors => "Mentors",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            JerryTab::Summary => "📊",
            JerryTab::Tools => "🔧",
            JerryTab::Mentors => "👨‍🏫",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Dashboard,
    ActionItems,
    Meetings,
    Deliverables,
    DeliverableDetail(u32),
    Metrics,
    Communication,
    Jerry(JerryTab),
    Research,
    SampleProjects,
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["dashboard"] => Route::Dashboard,
            ["action-items"] => Route::ActionItems,
            ["meetings"] => Route::Meetings,
            ["deliverables"] => Route::Deliverables,
            ["deliverables", id] => id.parse().map(Route::DeliverableDetail).unwrap_or(Route::NotFound),
            ["metrics"] => Route::Metrics,
            ["communication"] => Route::Communication,
            ["jerry"] => Route::Jerry(JerryTab::Summary),
            ["jerry", "tools"] => Route::Jerry(JerryTab::Tools),
            ["jerry", "mentors"] => Route::Jerry(JerryTab::Mentors),
            ["research"] => Route::Research,
            ["sample-projects"] => Route::SampleProjects,
            _ => Route::NotFound,
        }
    }

    /// Pages that need a signed-in user
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Home | Route::NotFound)
    }
}

/// Path of the current page
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Full page navigation
pub fn navigate(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(url);
    }
}
