//! Action Items Page
//!
//! Status and responsible-party filters are applied by the server and
//! combined; the priority filter and ordering are applied here. A filter
//! change supersedes any request still in flight.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{Badge, Loading, PageError, PageHeader, StatCard};
use crate::console;
use crate::context::use_session;
use crate::filters::{responsible_parties, visible_action_items, ActionItemStats};
use crate::format::{is_overdue, short_date, today};
use crate::models::{ActionItem, ActionStatus, Priority};
use crate::presentation::{
    action_status_class, action_status_icon, label, priority_border, priority_class, priority_icon,
};
use crate::sequence::RequestSequencer;
use crate::session::load_when_authenticated;

fn optional<T: From<String>>(raw: String) -> Option<T> {
    (!raw.is_empty()).then(|| T::from(raw))
}

#[component]
pub fn ActionItemsPage() -> impl IntoView {
    let session = use_session();
    let (items, set_items) = signal(Vec::<ActionItem>::new());
    let (parties, set_parties) = signal(Vec::<String>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);

    let (status_filter, set_status_filter) = signal::<Option<ActionStatus>>(None);
    let (party_filter, set_party_filter) = signal::<Option<String>>(None);
    let (priority_filter, set_priority_filter) = signal::<Option<Priority>>(None);

    let sequencer = RequestSequencer::new();

    Effect::new(move |_| {
        let status = status_filter.get();
        let party = party_filter.get();
        let ticket = sequencer.next();
        load_when_authenticated(&session.auth.get(), move |_| {
            set_loading.set(true);
            spawn_local(async move {
                let result = api::client().list_action_items(status.as_ref(), party.as_deref()).await;
                if !ticket.is_current() {
                    return;
                }
                match result {
                    Ok(loaded) => {
                        console::log(&format!("[ActionItems] Loaded {} items", loaded.len()));
                        if status.is_none() && party.is_none() {
                            set_parties.set(responsible_parties(&loaded));
                        }
                        set_items.set(loaded);
                        set_error.set(None);
                    }
                    Err(e) => {
                        console::error(&format!("[ActionItems] Failed to load: {}", e));
                        set_error.set(Some(e.to_string()));
                    }
                }
                set_loading.set(false);
            });
        });
    });

    let stats = Memo::new(move |_| ActionItemStats::from_items(&items.get()));
    let visible = Memo::new(move |_| visible_action_items(&items.get(), priority_filter.get().as_ref()));

    let select_class = "border border-gray-300 rounded-md px-3 py-2 text-sm";

    view! {
        <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <PageHeader title="Action Items" subtitle="Follow-ups and commitments from project meetings" />

            <div class="grid grid-cols-2 md:grid-cols-5 gap-4 mb-8">
                <StatCard label="Total" value=Signal::derive(move || stats.get().total.to_string()) />
                <StatCard label="Pending" value=Signal::derive(move || stats.get().pending.to_string()) value_class="text-yellow-600" />
                <StatCard label="In Progress" value=Signal::derive(move || stats.get().in_progress.to_string()) value_class="text-blue-600" />
                <StatCard label="Completed" value=Signal::derive(move || stats.get().completed.to_string()) value_class="text-green-600" />
                <StatCard label="Urgent" value=Signal::derive(move || stats.get().urgent.to_string()) value_class="text-red-600" />
            </div>

            <div class="bg-white rounded-lg shadow p-4 mb-6 flex flex-wrap gap-4">
                <label class="flex items-center gap-2 text-sm text-gray-700">
                    "Status"
                    <select class=select_class on:change=move |ev| set_status_filter.set(optional(event_target_value(&ev)))>
                        <option value="">"All"</option>
                        {ActionStatus::known()
                            .into_iter()
                            .map(|s| view! { <option value=s.as_str().to_string()>{label(s.as_str())}</option> })
                            .collect_view()}
                    </select>
                </label>
                <label class="flex items-center gap-2 text-sm text-gray-700">
                    "Responsible"
                    <select class=select_class on:change=move |ev| set_party_filter.set(optional(event_target_value(&ev)))>
                        <option value="">"All"</option>
                        {move || {
                            parties
                                .get()
                                .into_iter()
                                .map(|p| view! { <option value=p.clone()>{p.clone()}</option> })
                                .collect_view()
                        }}
                    </select>
                </label>
                <label class="flex items-center gap-2 text-sm text-gray-700">
                    "Priority"
                    <select class=select_class on:change=move |ev| set_priority_filter.set(optional(event_target_value(&ev)))>
                        <option value="">"All"</option>
                        {Priority::known()
                            .into_iter()
                            .map(|p| view! { <option value=p.as_str().to_string()>{label(p.as_str())}</option> })
                            .collect_view()}
                    </select>
                </label>
            </div>

            <PageError error=error />

            {move || {
                if loading.get() {
                    return view! { <Loading /> }.into_any();
                }
                let shown = visible.get();
                if shown.is_empty() {
                    return view! {
                        <div class="bg-white rounded-lg shadow p-8 text-center text-gray-500">"No action items match these filters."</div>
                    }
                    .into_any();
                }
                let today = today();
                view! {
                    <div class="space-y-4">
                        {shown.into_iter().map(|item| view! { <ActionItemCard item=item today=today.clone() /> }).collect_view()}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

#[component]
fn ActionItemCard(item: ActionItem, today: String) -> impl IntoView {
    let overdue = item.status != ActionStatus::Completed && is_overdue(&item.target_date, &today);
    let due_class = if overdue { "text-red-600 font-semibold" } else { "text-gray-500" };

    view! {
        <div
            class="bg-white rounded-lg shadow p-6 border-l-4"
            style=format!("border-left-color: {}", priority_border(&item.priority))
        >
            <div class="flex items-start justify-between gap-4">
                <div>
                    <h3 class="text-lg font-semibold text-gray-900">{item.title.clone()}</h3>
                    <p class="text-gray-600 mt-1">{item.description.clone()}</p>
                </div>
                <div class="flex gap-2 shrink-0">
                    <Badge
                        class=priority_class(&item.priority)
                        text=format!("{} {}", priority_icon(&item.priority), label(item.priority.as_str()))
                    />
                    <Badge
                        class=action_status_class(&item.status)
                        text=format!("{} {}", action_status_icon(&item.status), label(item.status.as_str()))
                    />
                </div>
            </div>
            <div class="mt-4 flex flex-wrap gap-6 text-sm">
                <span class="text-gray-500">"👤 " {item.responsible_party.clone()}</span>
                <span class=due_class>"📅 Due: " {short_date(&item.target_date)} {overdue.then_some(" (overdue)")}</span>
            </div>
            {item
                .notes
                .clone()
                .filter(|n| !n.is_empty())
                .map(|notes| view! { <p class="mt-3 text-sm text-gray-600 bg-gray-50 rounded p-3">{notes}</p> })}
        </div>
    }
}
