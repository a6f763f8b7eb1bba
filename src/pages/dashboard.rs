//! Dashboard Page
//!
//! Section cards, the current phase banner, the phase summary and overall
//! progress computed from the metrics.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{PageError, ProgressBar};
use crate::console;
use crate::context::use_session;
use crate::progress::{overall_progress, OverallProgress};
use crate::session::load_when_authenticated;

const SECTIONS: [(&str, &str, &str, &str); 5] = [
    ("/deliverables", "📋", "Deliverables", "Track progress on SOW deliverables"),
    ("/metrics", "📊", "Success Metrics", "Monitor key performance indicators"),
    ("/communication", "💬", "Communication Hub", "Project updates and team communication"),
    ("/meetings", "🗓️", "Meetings", "Meeting notes, attendees and topics"),
    ("/action-items", "✅", "Action Items", "Follow-ups from every meeting"),
];

/// (phase, name, dates, done)
const PHASES: [(u8, &str, &str, bool); 4] = [
    (1, "Discovery", "Oct - Nov 2025", true),
    (2, "Prototype", "Nov - Dec 2025", true),
    (3, "Foundation", "Dec 2025 - Jan 2026", true),
    (4, "Training", "Jan 2026 - Ongoing", false),
];

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let (overall, set_overall) = signal::<Option<OverallProgress>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        load_when_authenticated(&session.auth.get(), |_| {
            spawn_local(async move {
                match api::client().list_metrics().await {
                    Ok(metrics) => set_overall.set(Some(overall_progress(&metrics))),
                    Err(e) => {
                        console::error(&format!("[Dashboard] Failed to load metrics: {}", e));
                        set_error.set(Some(e.to_string()));
                    }
                }
            });
        });
    });

    let greeting = move || {
        session
            .auth
            .get()
            .user()
            .map(|u| format!("Welcome back, {}", u.display_name()))
            .unwrap_or_default()
    };

    view! {
        <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <div class="mb-8">
                <h1 class="text-3xl font-bold text-gray-900">"Project Dashboard"</h1>
                <p class="text-lg text-gray-600 mt-2">{greeting}</p>
            </div>

            <PageError error=error />

            {move || {
                overall
                    .get()
                    .map(|o| {
                        view! {
                            <div class="bg-white rounded-lg shadow p-6 mb-8">
                                <div class="flex justify-between items-center mb-3">
                                    <h2 class="text-lg font-semibold text-gray-900">"Overall Progress"</h2>
                                    <span class="text-2xl font-bold text-blue-600">{format!("{:.0}%", o.percent)}</span>
                                </div>
                                <ProgressBar percent=o.percent bar_class="bg-blue-600" />
                            </div>
                        }
                    })
            }}

            <div class="grid gap-6 md:grid-cols-2 lg:grid-cols-3">
                {SECTIONS
                    .iter()
                    .map(|(href, icon, title, text)| {
                        view! {
                            <a href=*href class="bg-white rounded-lg shadow-md p-6 hover:shadow-lg transition-shadow cursor-pointer">
                                <div class="text-3xl mb-3">{*icon}</div>
                                <h2 class="text-xl font-bold text-gray-900 mb-2">{*title}</h2>
                                <p class="text-gray-600 text-sm">{*text}</p>
                            </a>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="mt-8 bg-gradient-to-r from-purple-600 to-blue-600 rounded-lg p-6 text-white">
                <div class="flex items-center justify-between flex-wrap gap-4">
                    <div>
                        <div class="flex items-center gap-2 mb-2">
                            <span class="bg-white/20 px-3 py-1 rounded-full text-sm font-medium">"Phase 4"</span>
                            <span class="animate-pulse">"●"</span>
                            <span class="text-sm">"IN PROGRESS"</span>
                        </div>
                        <h2 class="text-2xl font-bold mb-1">"Jerry Training Phase"</h2>
                        <p class="text-purple-100">"Teaching the AI assistant to become a domain expert"</p>
                    </div>
                    <a href="/jerry" class="px-6 py-3 bg-white text-purple-600 font-semibold rounded-lg hover:bg-purple-50">
                        "Meet Jerry →"
                    </a>
                </div>
            </div>

            <div class="mt-6 grid gap-4 md:grid-cols-4">
                {PHASES
                    .iter()
                    .map(|(n, name, dates, done)| {
                        let (border, mark, mark_class) = if *done {
                            ("border-green-500", "✓", "text-green-500")
                        } else {
                            ("border-purple-500", "●", "text-purple-500 animate-pulse")
                        };
                        view! {
                            <div class=format!("bg-white rounded-lg shadow p-4 border-l-4 {}", border)>
                                <div class="flex items-center justify-between">
                                    <span class="text-sm text-gray-600">{format!("Phase {}", n)}</span>
                                    <span class=mark_class>{mark}</span>
                                </div>
                                <div class="font-semibold text-gray-900">{*name}</div>
                                <div class="text-xs text-gray-500">{*dates}</div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
