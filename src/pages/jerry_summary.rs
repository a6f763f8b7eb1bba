//! Jerry Summary Page
//!
//! Headline numbers and the roadmap come from the backend; when the call
//! fails the page still renders with the last published figures.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{JerryLayout, Loading};
use crate::console;
use crate::context::use_session;
use crate::format::{compact_currency, thousands};
use crate::models::{JerryMetrics, Roadmap, RoadmapStage};
use crate::route::JerryTab;
use crate::session::load_when_authenticated;

/// (name, icon, live, summary)
const GLANCE: [(&str, &str, bool, &str); 6] = [
    ("Eyes", "👁️", true, "99.1% symbol detection"),
    ("Ears", "👂", true, "Voice commands"),
    ("Voice", "🗣️", true, "Spoken responses"),
    ("Memory", "🧠", true, "28 estimates, $71.9M"),
    ("Hands", "🖐️", true, "Workstation actions"),
    ("Learning", "📈", false, "SFT/DPO training ready"),
];

const QUICK_LINKS: [(&str, &str, &str, &str, &str); 2] = [
    (
        "/jerry/tools",
        "🔧",
        "Jerry's Tools",
        "Detailed breakdown of Jerry's 6 core capabilities and the technology behind them.",
        "Explore Tools →",
    ),
    (
        "/jerry/mentors",
        "👨‍🏫",
        "Mentors & Learning",
        "How team mentors teach Jerry through corrections and real-world feedback.",
        "Meet the Mentors →",
    ),
];

fn fallback_roadmap() -> Roadmap {
    let stage = |status: &str, items: &[&str]| RoadmapStage {
        status: status.to_string(),
        target: None,
        capabilities: items.iter().map(|s| s.to_string()).collect(),
    };
    Roadmap {
        now: stage(
            "Complete",
            &[
                "See drawings at 99.1% accuracy",
                "Remember 28 estimates ($71.9M)",
                "Talk to team via voice",
                "Take actions on workstation",
            ],
        ),
        next: stage(
            "Training",
            &[
                "Calculate conduit runs",
                "Compare bid vs construction sets",
                "Learn domain pricing methods",
                "Email triage automation",
            ],
        ),
        future: stage(
            "Planned",
            &[
                "Predict project profitability",
                "Flag risky bids",
                "Draft proposals",
                "Full estimation assistance",
            ],
        ),
    }
}

#[component]
pub fn JerrySummaryPage() -> impl IntoView {
    let session = use_session();
    let (metrics, set_metrics) = signal(JerryMetrics::default());
    let (roadmap, set_roadmap) = signal(fallback_roadmap());
    let (loading, set_loading) = signal(true);

    Effect::new(move |_| {
        load_when_authenticated(&session.auth.get(), |_| {
            spawn_local(async move {
                let client = api::client();
                match client.jerry_status().await {
                    Ok(status) => set_metrics.set(status.metrics),
                    Err(e) => console::error(&format!("[Jerry] Error fetching Jerry data: {}", e)),
                }
                match client.jerry_roadmap().await {
                    Ok(loaded) => set_roadmap.set(loaded),
                    Err(e) => console::error(&format!("[Jerry] Error fetching roadmap: {}", e)),
                }
                set_loading.set(false);
            });
        });
    });

    view! {
        <JerryLayout active=JerryTab::Summary>
            {move || {
                if loading.get() {
                    return view! { <Loading message="Loading Jerry status..." /> }.into_any();
                }
                let m = metrics.get();
                view! {
                    <div class="bg-blue-50 border border-blue-200 rounded-lg p-4 mb-6">
                        <p class="text-blue-800">
                            <strong>"January 2026 Status: "</strong>
                            "Foundation complete. Entering Jerry Training Phase. Jerry achieved "
                            {format!("{}%", m.symbol_accuracy)}
                            " symbol detection accuracy, up from 75% when he started, and is ready to learn estimation."
                        </p>
                    </div>

                    <div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-6 gap-4 mb-8">
                        <MetricTile value=format!("{}%", m.symbol_accuracy) label="Symbol Accuracy" class="text-green-600" />
                        <MetricTile value=m.estimates_loaded.to_string() label="Estimates Loaded" class="text-blue-600" />
                        <MetricTile value=compact_currency(m.total_bid_value) label="Total Bid Value" class="text-purple-600" />
                        <MetricTile value=m.symbol_types.to_string() label="Symbol Types" class="text-orange-600" />
                        <MetricTile value=format!("{}h", m.time_savings_per_week) label="Hours Saved/Week" class="text-teal-600" />
                        <MetricTile value=format!("${}", thousands(m.annual_value as u64)) label="Annual Value" class="text-green-600" />
                    </div>
                }
                .into_any()
            }}

            <div class="bg-white rounded-lg shadow-md p-6 mb-8">
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-xl font-bold text-gray-900">"Capabilities at a Glance"</h2>
                    <a href="/jerry/tools" class="text-purple-600 hover:text-purple-800 text-sm font-medium">"View Details →"</a>
                </div>
                <div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-6 gap-4">
                    {GLANCE
                        .iter()
                        .map(|(name, icon, live, summary)| {
                            let (status, status_class) = if *live {
                                ("✅ Live", "text-green-600")
                            } else {
                                ("🔵 Ready", "text-blue-600")
                            };
                            view! {
                                <div class="text-center p-4 bg-gray-50 rounded-lg">
                                    <div class="text-3xl mb-2">{*icon}</div>
                                    <div class="font-semibold text-gray-900">{*name}</div>
                                    <div class="text-xs text-gray-600 mt-1">{*summary}</div>
                                    <div class=format!("mt-2 text-xs font-medium {}", status_class)>{status}</div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            <div class="bg-white rounded-lg shadow-md p-6 mb-8">
                <h2 class="text-xl font-bold text-gray-900 mb-4">"The Jerry Philosophy"</h2>
                <div class="grid md:grid-cols-2 gap-6">
                    <div class="border-l-4 border-red-400 pl-4">
                        <h3 class="font-semibold text-gray-900 mb-2">"Traditional Approach"</h3>
                        <ul class="text-gray-600 space-y-1 text-sm">
                            <li>"• Build software for humans to use"</li>
                            <li>"• Train humans on new tools"</li>
                            <li>"• Software stays static"</li>
                            <li>"• ROI = efficiency gains"</li>
                        </ul>
                    </div>
                    <div class="border-l-4 border-green-400 pl-4">
                        <h3 class="font-semibold text-gray-900 mb-2">"AI-Native Approach"</h3>
                        <ul class="text-gray-600 space-y-1 text-sm">
                            <li>"• Build capabilities for Jerry to use"</li>
                            <li>"• Train Jerry on your way of working"</li>
                            <li>"• Jerry learns and improves over time"</li>
                            <li>"• ROI = intelligence amplification"</li>
                        </ul>
                    </div>
                </div>
            </div>

            <div class="grid md:grid-cols-2 gap-6 mb-8">
                {QUICK_LINKS
                    .iter()
                    .map(|(href, icon, title, text, cta)| {
                        view! {
                            <a href=*href class="bg-white rounded-lg shadow-md p-6 hover:shadow-lg transition-shadow">
                                <div class="text-3xl mb-3">{*icon}</div>
                                <h3 class="text-lg font-bold text-gray-900 mb-2">{*title}</h3>
                                <p class="text-gray-600 text-sm">{*text}</p>
                                <div class="mt-4 text-purple-600 font-medium text-sm">{*cta}</div>
                            </a>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="bg-gradient-to-r from-blue-600 to-purple-600 rounded-lg shadow-md p-6 text-white">
                <h2 class="text-xl font-bold mb-4">"What's Next: Training Jerry"</h2>
                {move || {
                    let r = roadmap.get();
                    view! {
                        <div class="grid md:grid-cols-3 gap-6">
                            <RoadmapColumn title="Now" stage=r.now />
                            <RoadmapColumn title="Next" stage=r.next />
                            <RoadmapColumn title="Future" stage=r.future />
                        </div>
                    }
                }}
            </div>
        </JerryLayout>
    }
}

#[component]
fn MetricTile(#[prop(into)] value: String, label: &'static str, class: &'static str) -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg shadow p-4 text-center">
            <div class=format!("text-3xl font-bold {}", class)>{value}</div>
            <div class="text-sm text-gray-600">{label}</div>
        </div>
    }
}

#[component]
fn RoadmapColumn(title: &'static str, stage: RoadmapStage) -> impl IntoView {
    view! {
        <div>
            <h3 class="font-semibold mb-2">
                {title}
                {stage.target.map(|t| format!(" ({})", t))}
            </h3>
            <ul class="text-sm text-blue-100 space-y-1">
                {stage.capabilities.into_iter().map(|c| view! { <li>"• " {c}</li> }).collect_view()}
            </ul>
        </div>
    }
}
