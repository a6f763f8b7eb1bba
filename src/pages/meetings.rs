//! Meetings Page
//!
//! Meetings newest first, each with the action items it produced.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::components::{Loading, PageError, PageHeader, StatCard};
use crate::console;
use crate::context::use_session;
use crate::filters::{items_for_meeting, MeetingStats};
use crate::format::{long_date, short_date};
use crate::models::{ActionItem, Meeting};
use crate::presentation::{action_status_class, action_status_icon, label};
use crate::session::load_when_authenticated;

#[component]
pub fn MeetingsPage() -> impl IntoView {
    let session = use_session();
    let (meetings, set_meetings) = signal(Vec::<Meeting>::new());
    let (items, set_items) = signal(Vec::<ActionItem>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        load_when_authenticated(&session.auth.get(), |_| {
            spawn_local(async move {
                let client = api::client();
                let result: Result<_, ApiError> = async {
                    let meetings = client.list_meetings().await?;
                    let items = client.list_action_items(None, None).await?;
                    Ok((meetings, items))
                }
                .await;
                match result {
                    Ok((loaded_meetings, loaded_items)) => {
                        console::log(&format!("[Meetings] Loaded {} meetings", loaded_meetings.len()));
                        set_meetings.set(loaded_meetings);
                        set_items.set(loaded_items);
                    }
                    Err(e) => {
                        console::error(&format!("[Meetings] Failed to load: {}", e));
                        set_error.set(Some(e.to_string()));
                    }
                }
                set_loading.set(false);
            });
        });
    });

    let stats = Memo::new(move |_| MeetingStats::from_meetings(&meetings.get()));

    view! {
        <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <PageHeader title="Meetings" subtitle="Meeting notes, decisions and follow-ups" />

            <div class="grid grid-cols-1 md:grid-cols-3 gap-4 mb-8">
                <StatCard label="Meetings" value=Signal::derive(move || stats.get().meetings.to_string()) />
                <StatCard label="Attendees" value=Signal::derive(move || stats.get().attendees.to_string()) value_class="text-blue-600" />
                <StatCard
                    label="Linked Action Items"
                    value=Signal::derive(move || stats.get().linked_action_items.to_string())
                    value_class="text-purple-600"
                />
            </div>

            <PageError error=error />

            {move || {
                if loading.get() {
                    return view! { <Loading /> }.into_any();
                }
                let all_items = items.get();
                view! {
                    <div class="space-y-6">
                        {meetings
                            .get()
                            .into_iter()
                            .map(|meeting| {
                                let linked = items_for_meeting(&meeting, &all_items);
                                view! { <MeetingCard meeting=meeting linked=linked /> }
                            })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

#[component]
fn MeetingCard(meeting: Meeting, linked: Vec<ActionItem>) -> impl IntoView {
    let (expanded, set_expanded) = signal(false);
    let Meeting { title, meeting_date, attendees, summary, topics, notes, .. } = meeting;
    let has_details = !linked.is_empty() || notes.as_deref().is_some_and(|n| !n.is_empty());

    view! {
        <div class="bg-white rounded-lg shadow p-6">
            <div class="flex items-start justify-between">
                <div>
                    <h2 class="text-xl font-semibold text-gray-900">{title}</h2>
                    <div class="flex items-center gap-4 text-sm text-gray-600 mt-1">
                        <span>"📅 " {long_date(&meeting_date)}</span>
                        <span>"👥 " {format!("{} attendees", attendees.len())}</span>
                    </div>
                </div>
                {has_details.then(|| view! {
                    <button
                        class="text-sm text-blue-600 hover:underline"
                        on:click=move |_| set_expanded.update(|e| *e = !*e)
                    >
                        {move || if expanded.get() { "Hide details" } else { "Show details" }}
                    </button>
                })}
            </div>

            <p class="text-gray-700 mt-4">{summary}</p>

            <div class="mt-4 flex flex-wrap gap-2">
                {topics
                    .into_iter()
                    .map(|t| view! { <span class="px-2 py-1 bg-gray-100 text-gray-700 rounded text-xs">{t}</span> })
                    .collect_view()}
            </div>

            <div class="mt-3 text-sm text-gray-500">{attendees.join(", ")}</div>

            <Show when=move || expanded.get()>
                {notes.clone().filter(|n| !n.is_empty()).map(|n| view! {
                    <div class="mt-4 bg-gray-50 rounded p-3 text-sm text-gray-700 whitespace-pre-wrap">{n}</div>
                })}
                <div class="mt-4 space-y-2">
                    <h3 class="font-semibold text-gray-900">"Action Items"</h3>
                    {linked
                        .iter()
                        .map(|item| {
                            view! {
                                <div class="flex items-center justify-between border border-gray-200 rounded p-3">
                                    <div>
                                        <div class="font-medium text-gray-900">{item.title.clone()}</div>
                                        <div class="text-xs text-gray-500">
                                            {item.responsible_party.clone()} " · Due: " {short_date(&item.target_date)}
                                        </div>
                                    </div>
                                    <span class=format!("px-2 py-1 rounded-full text-xs font-semibold {}", action_status_class(&item.status))>
                                        {format!("{} {}", action_status_icon(&item.status), label(item.status.as_str()))}
                                    </span>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}
