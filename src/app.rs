//! Project Portal App
//!
//! Resolves the session once, then renders the page for the current path
//! under the shared navigation bar.

use leptos::prelude::*;

use crate::components::{Navigation, Protected};
use crate::console;
use crate::context::SessionContext;
use crate::pages::{
    ActionItemsPage, CommunicationPage, DashboardPage, DeliverableDetailPage, DeliverablesPage, HomePage,
    JerryMentorsPage, JerrySummaryPage, JerryToolsPage, MeetingsPage, MetricsPage, NotFoundPage, ResearchPage,
    SampleProjectsPage,
};
use crate::route::{current_path, JerryTab, Route};

#[component]
pub fn App() -> impl IntoView {
    // Provide session to all children
    let session = SessionContext::new();
    provide_context(session);
    session.refresh();

    let route = Route::parse(&current_path());
    console::log(&format!("[APP] Route {:?}", route));

    let page = if route.is_protected() {
        view! { <Protected>{move || page_view(route)}</Protected> }.into_any()
    } else {
        page_view(route)
    };

    view! {
        <div class="min-h-screen bg-gray-50">
            <Navigation />
            <main>{page}</main>
        </div>
    }
}

fn page_view(route: Route) -> AnyView {
    match route {
        Route::Home => view! { <HomePage /> }.into_any(),
        Route::Dashboard => view! { <DashboardPage /> }.into_any(),
        Route::ActionItems => view! { <ActionItemsPage /> }.into_any(),
        Route::Meetings => view! { <MeetingsPage /> }.into_any(),
        Route::Deliverables => view! { <DeliverablesPage /> }.into_any(),
        Route::DeliverableDetail(id) => view! { <DeliverableDetailPage id=id /> }.into_any(),
        Route::Metrics => view! { <MetricsPage /> }.into_any(),
        Route::Communication => view! { <CommunicationPage /> }.into_any(),
        Route::Jerry(JerryTab::Summary) => view! { <JerrySummaryPage /> }.into_any(),
        Route::Jerry(JerryTab::Tools) => view! { <JerryToolsPage /> }.into_any(),
        Route::Jerry(JerryTab::Mentors) => view! { <JerryMentorsPage /> }.into_any(),
        Route::Research => view! { <ResearchPage /> }.into_any(),
        Route::SampleProjects => view! { <SampleProjectsPage /> }.into_any(),
        Route::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}
