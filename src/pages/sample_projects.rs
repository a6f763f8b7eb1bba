//! Sample Projects Page
//!
//! The training dataset: aggregate figures, a few featured projects and
//! every project grouped by delivery method. Tabs filter on the client.

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

use crate::api;
use crate::components::{Loading, PageError};
use crate::console;
use crate::context::use_session;
use crate::format::{metric_value, thousands};
use crate::models::{DeliveryMethod, ProjectStats, SampleProject};
use crate::session::load_when_authenticated;

struct MethodInfo {
    method: DeliveryMethod,
    name: &'static str,
    icon: &'static str,
    description: &'static str,
    focus: &'static str,
    banner: &'static str,
    header: &'static str,
    tab: &'static str,
    accent: &'static str,
}

static METHODS: [MethodInfo; 3] = [
    MethodInfo {
        method: DeliveryMethod::Data,
        name: "DATA Delivery",
        icon: "📋",
        description: "Product-focused estimation with specification compliance",
        focus: "Material selection and product data validation",
        banner: "bg-blue-50 border-blue-600",
        header: "from-blue-50 to-blue-100",
        tab: "bg-blue-600 text-white",
        accent: "text-blue-500",
    },
    MethodInfo {
        method: DeliveryMethod::DesignBuild,
        name: "Design Build / Design Assist",
        icon: "🏗️",
        description: "Rate-based estimation with transparent cost methodology",
        focus: "Professional rates and pre-construction services",
        banner: "bg-green-50 border-green-600",
        header: "from-green-50 to-green-100",
        tab: "bg-green-600 text-white",
        accent: "text-green-500",
    },
    MethodInfo {
        method: DeliveryMethod::PlanSpecBid,
        name: "Plan-Spec-Bid",
        icon: "📐",
        description: "Competitive bidding with drawing-based quantity takeoff",
        focus: "Change management and competitive analysis",
        banner: "bg-purple-50 border-purple-600",
        header: "from-purple-50 to-purple-100",
        tab: "bg-purple-600 text-white",
        accent: "text-purple-500",
    },
];

const DATASET_VALUE: [(&str, &str); 8] = [
    ("Real cost data", "from actual projects (not academic exercises)"),
    ("Complete project lifecycles", "from bid to completion"),
    ("269 documented changes", "in SANITIZER ADDITION for change impact analysis"),
    ("Competitive bidding patterns", "with 5 contractor comparison in Ambrose"),
    ("Material takeoff examples", "from real estimates"),
    ("Specification compliance", "documentation and product data"),
    ("Rate transparency", "showing professional staff and O&P structures"),
    ("Multi-discipline coordination", "visible across all project types"),
];

fn projects_for(projects: &[SampleProject], method: &DeliveryMethod) -> Vec<SampleProject> {
    projects.iter().filter(|p| &p.delivery_method == method).cloned().collect()
}

/// A section is shown when no tab is picked or its own tab is.
fn shows_method(selected: Option<&DeliveryMethod>, method: &DeliveryMethod) -> bool {
    selected.map_or(true, |s| s == method)
}

fn tab_class(active: bool, active_class: &str) -> String {
    let state = if active { active_class } else { "bg-white text-gray-700 hover:bg-gray-100" };
    format!("px-4 py-2 rounded-lg font-semibold transition-colors {}", state)
}

fn metric_label(key: &str) -> String {
    key.replace('_', " ")
}

/// Lists are comma-joined and text is shown without quotes.
fn metric_text(value: &Value) -> String {
    match value {
        Value::Array(items) => items.iter().map(metric_text).collect::<Vec<_>>().join(", "),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// The change-order case study and the competitive-bid case study
fn featured(projects: &[SampleProject]) -> (Option<SampleProject>, Option<SampleProject>) {
    let sanitizer = projects.iter().find(|p| p.name == "SANITIZER ADDITION").cloned();
    let ambrose = projects.iter().find(|p| p.name.contains("Ambrose")).cloned();
    (sanitizer, ambrose)
}

#[component]
pub fn SampleProjectsPage() -> impl IntoView {
    let session = use_session();
    let (projects, set_projects) = signal(Vec::<SampleProject>::new());
    let (stats, set_stats) = signal::<Option<ProjectStats>>(None);
    let (selected, set_selected) = signal::<Option<DeliveryMethod>>(None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        load_when_authenticated(&session.auth.get(), |_| {
            spawn_local(async move {
                let client = api::client();
                match client.list_sample_projects().await {
                    Ok(loaded) => {
                        console::log(&format!("[SampleProjects] Loaded {} projects", loaded.len()));
                        set_projects.set(loaded);
                    }
                    Err(e) => {
                        console::error(&format!("[SampleProjects] Failed to load: {}", e));
                        set_error.set(Some(e.to_string()));
                    }
                }
                // The summary card is optional
                match client.sample_project_stats().await {
                    Ok(loaded) => set_stats.set(Some(loaded)),
                    Err(e) => console::error(&format!("[SampleProjects] Failed to load stats: {}", e)),
                }
                set_loading.set(false);
            });
        });
    });

    view! {
        <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <div class="mb-8">
                <h1 class="text-3xl font-bold text-gray-900 mb-2">"AI Training Dataset - Sample Projects"</h1>
                <p class="text-gray-600 mb-4">
                    "Real electrical estimation projects providing comprehensive training data for AI-based estimation analysis."
                </p>
                {move || stats.get().map(|stats| view! { <DatasetSummary stats=stats /> })}
            </div>

            <PageError error=error />

            {move || {
                if loading.get() {
                    return view! { <Loading message="Loading projects..." /> }.into_any();
                }
                let all = projects.get();
                let (sanitizer, ambrose) = featured(&all);
                let has_featured = sanitizer.is_some() || ambrose.is_some();
                let total = all.len();
                view! {
                    {has_featured.then(|| view! {
                        <div class="mb-8">
                            <h2 class="text-2xl font-bold text-gray-900 mb-4">"⭐ Exceptional for AI Training"</h2>
                            <div class="grid md:grid-cols-2 gap-6">
                                {sanitizer.map(|project| {
                                    let facts = vec![
                                        ("269 Change Orders Tracked!".to_string(), "🔥"),
                                        (format!("{} Documents", thousands(u64::from(project.document_counts.total))), "📄"),
                                        ("8 Subcontractors Tracked".to_string(), "👷"),
                                    ];
                                    view! {
                                        <FeaturedCard
                                            project=project
                                            frame="from-purple-50 to-pink-50 border-purple-300"
                                            badge="bg-purple-600"
                                            facts=facts
                                            note="Exceptional change management case study - 269 documented changes from bid to completion."
                                        />
                                    }
                                })}
                                {ambrose.map(|project| {
                                    let mut facts = vec![("5 Competing Contractors!".to_string(), "🏆")];
                                    if let Some(sf) = project.size_sf {
                                        facts.push((format!("{} SF", thousands(u64::from(sf))), "📐"));
                                    }
                                    facts.push(("Complete Bid Evolution".to_string(), "📈"));
                                    view! {
                                        <FeaturedCard
                                            project=project
                                            frame="from-blue-50 to-cyan-50 border-blue-300"
                                            badge="bg-blue-600"
                                            facts=facts
                                            note="Full competitive bidding documentation showing how bids evolve through multiple iterations."
                                        />
                                    }
                                })}
                            </div>
                        </div>
                    })}

                    <div class="mb-6 flex gap-2 flex-wrap">
                        <button
                            class=move || tab_class(selected.get().is_none(), "bg-gray-900 text-white")
                            on:click=move |_| set_selected.set(None)
                        >
                            {format!("All Projects ({})", total)}
                        </button>
                        {METHODS
                            .iter()
                            .map(|info| {
                                let count = projects_for(&all, &info.method).len();
                                view! {
                                    <button
                                        class=move || tab_class(selected.get().as_ref() == Some(&info.method), info.tab)
                                        on:click=move |_| set_selected.set(Some(info.method.clone()))
                                    >
                                        {format!("{} {} ({})", info.icon, info.name, count)}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>

                    {METHODS
                        .iter()
                        .map(|info| {
                            let group = projects_for(&all, &info.method);
                            let visible = move || shows_method(selected.get().as_ref(), &info.method);
                            let empty = group.is_empty();
                            view! {
                                <Show when=move || visible() && !empty>
                                    <MethodSection info=info projects=group.clone() />
                                </Show>
                            }
                        })
                        .collect_view()}
                }
                .into_any()
            }}

            <div class="mt-8 bg-blue-50 border border-blue-200 rounded-lg p-6">
                <h3 class="text-lg font-semibold text-gray-900 mb-2">"🎯 Training Dataset Value"</h3>
                <p class="text-gray-700 mb-3">
                    "This comprehensive collection of real electrical estimation projects provides:"
                </p>
                <div class="grid md:grid-cols-2 gap-4">
                    {DATASET_VALUE
                        .chunks(4)
                        .map(|column| view! {
                            <ul class="space-y-2 text-sm text-gray-600">
                                {column
                                    .iter()
                                    .map(|(lead, rest)| view! {
                                        <li class="flex items-start gap-2">
                                            <span class="text-blue-500">"✓"</span>
                                            <span><strong>{*lead}</strong>" "{*rest}</span>
                                        </li>
                                    })
                                    .collect_view()}
                            </ul>
                        })
                        .collect_view()}
                </div>
            </div>
        </div>
    }
}

#[component]
fn DatasetSummary(stats: ProjectStats) -> impl IntoView {
    let documents = thousands(stats.total_documents);
    let overview = format!(
        "{} complete projects spanning {} delivery methodologies with {} real documents.",
        stats.total_projects,
        METHODS.len(),
        documents,
    );
    view! {
        <div class="bg-gradient-to-r from-blue-50 to-indigo-50 border border-blue-200 rounded-lg p-6">
            <div class="flex items-start gap-4">
                <div class="text-4xl">"📁"</div>
                <div class="flex-1">
                    <h3 class="text-lg font-semibold text-gray-900 mb-2">"Comprehensive Training Dataset"</h3>
                    <p class="text-gray-700 mb-3">{overview}</p>
                    <div class="grid grid-cols-2 sm:grid-cols-4 gap-3 sm:gap-4 text-center">
                        <SummaryFigure value=stats.total_projects.to_string() label="Projects" class="text-blue-600" />
                        <SummaryFigure value=documents label="Documents" class="text-green-600" />
                        <SummaryFigure value=format!("{} GB", stats.total_size_gb) label="Total Size" class="text-purple-600" />
                        <SummaryFigure value=METHODS.len().to_string() label="Delivery Methods" class="text-orange-600" />
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn SummaryFigure(value: String, label: &'static str, class: &'static str) -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg p-3 shadow-sm">
            <div class=format!("text-xl sm:text-2xl font-bold {}", class)>{value}</div>
            <div class="text-xs sm:text-sm text-gray-600">{label}</div>
        </div>
    }
}

#[component]
fn FeaturedCard(
    project: SampleProject,
    frame: &'static str,
    badge: &'static str,
    facts: Vec<(String, &'static str)>,
    note: &'static str,
) -> impl IntoView {
    view! {
        <div class=format!("bg-gradient-to-br border-2 rounded-lg p-6 {}", frame)>
            <div class="flex items-start justify-between mb-3">
                <div>
                    <h3 class="text-xl font-bold text-gray-900">{project.name}</h3>
                    <p class="text-sm text-gray-600">{project.project_type}</p>
                </div>
                <span class=format!("px-3 py-1 text-white text-sm font-semibold rounded-full {}", badge)>
                    {metric_value(project.size_mb, "MB")}
                </span>
            </div>
            <div class="space-y-2 mb-4">
                {facts
                    .into_iter()
                    .map(|(text, icon)| view! {
                        <div class="flex items-center justify-between bg-white rounded p-2">
                            <span class="text-sm font-semibold">{text}</span>
                            <span>{icon}</span>
                        </div>
                    })
                    .collect_view()}
            </div>
            <p class="text-sm text-gray-700 italic">{note}</p>
        </div>
    }
}

#[component]
fn MethodSection(info: &'static MethodInfo, projects: Vec<SampleProject>) -> impl IntoView {
    view! {
        <div class="mb-10">
            <div class=format!("border-l-4 p-4 mb-4 rounded-r-lg {}", info.banner)>
                <div class="flex items-start gap-3">
                    <span class="text-3xl">{info.icon}</span>
                    <div>
                        <h2 class="text-2xl font-bold text-gray-900 mb-1">{info.name}</h2>
                        <p class="text-gray-700 text-sm mb-1">{info.description}</p>
                        <p class="text-gray-600 text-sm italic">{format!("Focus: {}", info.focus)}</p>
                    </div>
                </div>
            </div>
            <div class="grid gap-6">
                {projects
                    .into_iter()
                    .map(|project| view! { <ProjectCard project=project info=info /> })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn ProjectCard(project: SampleProject, info: &'static MethodInfo) -> impl IntoView {
    let kinds = project.document_counts.kinds();
    let key_files = project.key_files.unwrap_or_default();
    let metrics = project.metrics.unwrap_or_default();

    view! {
        <div class="bg-white rounded-lg shadow-md overflow-hidden border border-gray-200">
            <div class=format!("bg-gradient-to-r px-6 py-4 border-b {}", info.header)>
                <div class="flex items-start justify-between">
                    <div class="flex-1">
                        <h3 class="text-xl font-bold text-gray-900 mb-1">{project.name}</h3>
                        <p class="text-gray-600 text-sm mb-2">{project.project_type}</p>
                        {project.location.map(|location| view! { <p class="text-gray-500 text-sm">"📍 " {location}</p> })}
                    </div>
                    <div class="text-right">
                        <div class="text-2xl font-bold text-gray-900">{metric_value(project.size_mb, "MB")}</div>
                        {project.size_sf.map(|sf| view! {
                            <div class="text-sm text-gray-600">{format!("{} SF", thousands(u64::from(sf)))}</div>
                        })}
                        <div class="text-sm text-gray-600 mt-1">
                            {format!("{} docs", thousands(u64::from(project.document_counts.total)))}
                        </div>
                    </div>
                </div>
            </div>

            <div class="p-6 grid md:grid-cols-2 gap-6">
                <div class="space-y-4">
                    <div>
                        <h4 class="text-sm font-semibold text-gray-700 mb-2">"Project Overview"</h4>
                        <p class="text-sm text-gray-600">{project.description}</p>
                    </div>
                    <div>
                        <h4 class="text-sm font-semibold text-gray-700 mb-2">"Document Types"</h4>
                        <div class="grid grid-cols-2 gap-2">
                            {kinds
                                .into_iter()
                                .map(|(kind, count)| view! {
                                    <div class="bg-gray-50 rounded p-2">
                                        <div class="text-sm text-gray-500">{kind}</div>
                                        <div class="font-semibold text-gray-900">{count}</div>
                                    </div>
                                })
                                .collect_view()}
                        </div>
                    </div>
                    <div>
                        <h4 class="text-sm font-semibold text-gray-700 mb-2">"✨ Key Highlights"</h4>
                        <div class="space-y-1">
                            {project
                                .highlights
                                .into_iter()
                                .map(|highlight| view! {
                                    <div class="text-sm text-gray-600 flex items-start gap-2 bg-green-50 rounded p-2">
                                        <span class="text-green-500 mt-0.5">"✓"</span>
                                        {highlight}
                                    </div>
                                })
                                .collect_view()}
                        </div>
                    </div>
                </div>

                <div class="space-y-4">
                    <div class=format!("bg-gradient-to-br rounded-lg p-4 {}", info.header)>
                        <h4 class="text-sm font-semibold text-gray-900 mb-2">"🤖 AI Training Value"</h4>
                        <p class="text-sm text-gray-700">{project.ai_value}</p>
                    </div>
                    <div>
                        <h4 class="text-sm font-semibold text-gray-700 mb-2">"📋 Key Features"</h4>
                        <ul class="space-y-1">
                            {project
                                .key_features
                                .into_iter()
                                .map(|feature| view! {
                                    <li class="text-sm text-gray-600 flex items-start gap-2">
                                        <span class=format!("mt-0.5 {}", info.accent)>"•"</span>
                                        {feature}
                                    </li>
                                })
                                .collect_view()}
                        </ul>
                    </div>
                    {(!key_files.is_empty()).then(|| view! {
                        <div>
                            <h4 class="text-sm font-semibold text-gray-700 mb-2">"📄 Key Files"</h4>
                            <div class="space-y-2">
                                {key_files
                                    .into_iter()
                                    .map(|file| view! {
                                        <div class="bg-gray-50 rounded p-2">
                                            <div class="text-sm font-semibold text-gray-900">{file.name}</div>
                                            <div class="text-xs text-gray-600">{file.description}</div>
                                            {file.size_mb.map(|mb| view! {
                                                <div class="text-xs text-gray-500 mt-1">{metric_value(mb, "MB")}</div>
                                            })}
                                        </div>
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    })}
                    {(!metrics.is_empty()).then(|| view! {
                        <div>
                            <h4 class="text-sm font-semibold text-gray-700 mb-2">"📊 Project Metrics"</h4>
                            <div class="grid grid-cols-2 gap-2">
                                {metrics
                                    .iter()
                                    .map(|(key, value)| view! {
                                        <div class="bg-gray-50 rounded p-2">
                                            <div class="text-xs text-gray-500">{metric_label(key)}</div>
                                            <div class="text-sm font-semibold text-gray-900">{metric_text(value)}</div>
                                        </div>
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    })}
                </div>
            </div>
        </div>
    }
}
