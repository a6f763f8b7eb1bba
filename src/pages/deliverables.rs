//! Deliverables Page
//!
//! One tab per project phase. Switching tabs supersedes any request still
//! in flight for the previous phase.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{Badge, Loading, PageError, PageHeader, ProgressBar};
use crate::console;
use crate::context::use_session;
use crate::format::short_date;
use crate::models::{Deliverable, DeliverableStatus};
use crate::presentation::{deliverable_status_class, label, owner_class};
use crate::sequence::RequestSequencer;
use crate::session::load_when_authenticated;

struct PhaseInfo {
    number: u8,
    name: &'static str,
    dates: &'static str,
    status: DeliverableStatus,
}

static PHASES: [PhaseInfo; 4] = [
    PhaseInfo {
        number: 1,
        name: "Discovery & Foundation",
        dates: "October 14 - November 13, 2025",
        status: DeliverableStatus::Completed,
    },
    PhaseInfo {
        number: 2,
        name: "Prototype & Learning",
        dates: "November 14 - December 14, 2025",
        status: DeliverableStatus::Completed,
    },
    PhaseInfo {
        number: 3,
        name: "Refinement & Roadmap",
        dates: "December 15 - January 14, 2026",
        status: DeliverableStatus::Completed,
    },
    PhaseInfo {
        number: 4,
        name: "Jerry Training",
        dates: "January 15, 2026 - Ongoing",
        status: DeliverableStatus::InProgress,
    },
];

#[component]
pub fn DeliverablesPage() -> impl IntoView {
    let session = use_session();
    let (phase, set_phase) = signal(1u8);
    let (deliverables, set_deliverables) = signal(Vec::<Deliverable>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);
    let sequencer = RequestSequencer::new();

    Effect::new(move |_| {
        let selected = phase.get();
        let ticket = sequencer.next();
        load_when_authenticated(&session.auth.get(), move |_| {
            set_loading.set(true);
            spawn_local(async move {
                let result = api::client().deliverables_for_phase(selected).await;
                if !ticket.is_current() {
                    return;
                }
                match result {
                    Ok(loaded) => {
                        set_deliverables.set(loaded);
                        set_error.set(None);
                    }
                    Err(e) => {
                        console::error(&format!("[Deliverables] Failed to load phase {}: {}", selected, e));
                        set_deliverables.set(Vec::new());
                        set_error.set(Some(e.to_string()));
                    }
                }
                set_loading.set(false);
            });
        });
    });

    let tabs = PHASES
        .iter()
        .map(|info| {
            let number = info.number;
            let class = move || {
                if phase.get() == number {
                    "px-6 py-4 text-left border-b-2 border-blue-500 text-blue-600"
                } else {
                    "px-6 py-4 text-left border-b-2 border-transparent text-gray-500 hover:text-gray-700"
                }
            };
            view! {
                <button class=class on:click=move |_| set_phase.set(number)>
                    <div class="font-semibold">{format!("Phase {}", number)}</div>
                    <div class="text-sm">{info.name}</div>
                    <div class="text-xs text-gray-400">{info.dates}</div>
                    <div class="mt-2">
                        <Badge class=deliverable_status_class(&info.status) text=label(info.status.as_str()) />
                    </div>
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <PageHeader title="Deliverables" subtitle="Statement of work deliverables by phase" />

            <div class="bg-white rounded-lg shadow mb-6">
                <nav class="flex flex-wrap border-b border-gray-200">{tabs}</nav>
            </div>

            <PageError error=error />

            {move || {
                if loading.get() {
                    return view! { <Loading /> }.into_any();
                }
                let list = deliverables.get();
                if list.is_empty() {
                    return view! {
                        <div class="bg-white rounded-lg shadow p-8 text-center text-gray-500">"No deliverables for this phase."</div>
                    }
                    .into_any();
                }
                view! {
                    <div class="grid gap-6 md:grid-cols-2">
                        {list.into_iter().map(|d| view! { <DeliverableCard deliverable=d /> }).collect_view()}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

#[component]
fn DeliverableCard(deliverable: Deliverable) -> impl IntoView {
    let percent = deliverable.completion_percentage;
    view! {
        <a
            href=format!("/deliverables/{}", deliverable.id)
            class="block bg-white rounded-lg shadow p-6 hover:shadow-lg transition-shadow"
        >
            <div class="flex items-start justify-between gap-4 mb-3">
                <h3 class="text-lg font-semibold text-gray-900">{deliverable.name.clone()}</h3>
                <Badge class=deliverable_status_class(&deliverable.status) text=label(deliverable.status.as_str()) />
            </div>
            <p class="text-gray-600 text-sm mb-4 line-clamp-3">{deliverable.description.clone()}</p>
            <div class="flex justify-between text-sm text-gray-600 mb-1">
                <span>"Progress"</span>
                <span class="font-semibold">{format!("{:.0}%", percent)}</span>
            </div>
            <ProgressBar percent=percent bar_class="bg-blue-600" />
            <div class="flex items-center justify-between mt-4 text-sm">
                <Badge class=owner_class(&deliverable.owner) text=deliverable.owner.as_str().to_string() />
                <span class="text-gray-500">"Due: " {short_date(&deliverable.due_date)}</span>
            </div>
        </a>
    }
}
