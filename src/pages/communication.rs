//! Communication Hub Page
//!
//! Project updates with a type filter, a post form and read receipts.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{Badge, Loading, PageError, PageHeader};
use crate::console;
use crate::context::use_session;
use crate::format::date_time;
use crate::markdown::render_markdown;
use crate::models::{NewUpdate, Update as UpdatePost, UpdatePriority, UpdateType};
use crate::presentation::{update_priority_class, update_type_class, update_type_icon};
use crate::sequence::RequestSequencer;
use crate::session::load_when_authenticated;

/// Filter buttons: `None` is every type
const FILTERS: [(Option<UpdateType>, &str); 4] = [
    (None, "All Updates"),
    (Some(UpdateType::Milestone), "🎯 Milestones"),
    (Some(UpdateType::Blocker), "🚫 Blockers"),
    (Some(UpdateType::Success), "🎉 Successes"),
];

#[component]
pub fn CommunicationPage() -> impl IntoView {
    let session = use_session();
    let (updates, set_updates) = signal(Vec::<UpdatePost>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);
    let (type_filter, set_type_filter) = signal::<Option<UpdateType>>(None);
    let (reload, set_reload) = signal(0u32);
    let (show_form, set_show_form) = signal(false);
    let sequencer = RequestSequencer::new();

    let email = Memo::new(move |_| {
        session.auth.get().user().and_then(|u| u.email.clone()).unwrap_or_default()
    });

    Effect::new(move |_| {
        let _ = reload.get();
        let filter = type_filter.get();
        let ticket = sequencer.next();
        load_when_authenticated(&session.auth.get(), move |_| {
            spawn_local(async move {
                let result = api::client().list_updates(filter.as_ref()).await;
                if !ticket.is_current() {
                    return;
                }
                match result {
                    Ok(loaded) => {
                        set_updates.set(loaded);
                        set_error.set(None);
                    }
                    Err(e) => {
                        console::error(&format!("[Communication] Failed to load updates: {}", e));
                        set_error.set(Some(e.to_string()));
                    }
                }
                set_loading.set(false);
            });
        });
    });

    let acknowledge = move |id: u32| {
        let email = email.get_untracked();
        if email.is_empty() {
            return;
        }
        spawn_local(async move {
            match api::client().acknowledge_update(id, &email).await {
                Ok(ack) => {
                    console::log(&format!("[Communication] Update {} acknowledged by {}", ack.update_id, ack.user));
                    set_reload.update(|n| *n += 1);
                }
                Err(e) => {
                    console::error(&format!("[Communication] Failed to acknowledge {}: {}", id, e));
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    };

    let on_posted = Callback::new(move |_: ()| {
        set_show_form.set(false);
        set_reload.update(|n| *n += 1);
    });

    let filter_buttons = FILTERS
        .into_iter()
        .map(|(filter, text)| {
            let active = filter.clone();
            let chosen = filter.clone();
            let class = move || {
                if type_filter.get() == active {
                    "px-4 py-2 rounded-lg font-medium text-sm bg-blue-600 text-white"
                } else {
                    "px-4 py-2 rounded-lg font-medium text-sm bg-white text-gray-700 hover:bg-gray-100"
                }
            };
            let is_all = filter.is_none();
            view! {
                <button class=class on:click=move |_| set_type_filter.set(chosen.clone())>
                    {text}
                    {is_all.then(|| move || format!(" ({})", updates.get().len()))}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <PageHeader title="Communication Hub" subtitle="Project updates, milestones, blockers, and team communication" />

            <div class="flex items-center justify-between mb-6 gap-4 flex-wrap">
                <div class="flex items-center gap-2 flex-wrap">{filter_buttons}</div>
                <button
                    class="px-6 py-2 bg-blue-600 text-white font-medium rounded-lg hover:bg-blue-700"
                    on:click=move |_| set_show_form.update(|s| *s = !*s)
                >
                    {move || if show_form.get() { "Cancel" } else { "+ New Update" }}
                </button>
            </div>

            <Show when=move || show_form.get()>
                <NewUpdateForm email=email on_posted=on_posted set_error=set_error />
            </Show>

            <PageError error=error />

            {move || {
                if loading.get() {
                    return view! { <Loading /> }.into_any();
                }
                let list = updates.get();
                if list.is_empty() {
                    return view! {
                        <div class="bg-white rounded-lg shadow p-8 text-center text-gray-500">"No updates yet."</div>
                    }
                    .into_any();
                }
                let me = email.get();
                view! {
                    <div class="space-y-6">
                        {list
                            .into_iter()
                            .map(|update| {
                                let read = update.acknowledged_by(&me);
                                view! { <UpdateCard update=update read=read on_acknowledge=acknowledge /> }
                            })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

/// "✓ Read by N: a, b" or nothing when unread
fn read_by(readers: &[String]) -> Option<String> {
    (!readers.is_empty()).then(|| format!("✓ Read by {}: {}", readers.len(), readers.join(", ")))
}

#[component]
fn UpdateCard<F>(update: UpdatePost, read: bool, on_acknowledge: F) -> impl IntoView
where
    F: Fn(u32) + Copy + Send + Sync + 'static,
{
    let id = update.id;
    let content = render_markdown(&update.content);
    let readers = update.acknowledgements.clone();

    view! {
        <div class=format!("bg-white rounded-lg shadow-md p-6 border-l-4 {}", update_type_class(&update.update_type))>
            <div class="flex items-start gap-3 mb-4">
                <div class="text-3xl">{update_type_icon(&update.update_type)}</div>
                <div class="flex-1">
                    <div class="flex items-center gap-2 flex-wrap mb-1">
                        <h2 class="text-xl font-bold text-gray-900">{update.title.clone()}</h2>
                        <Badge class=update_priority_class(&update.priority) text=update.priority.as_str().to_string() />
                    </div>
                    <div class="text-sm text-gray-500">
                        "Posted by " <span class="font-medium">{update.author.clone()}</span> " • " {date_time(&update.created_at)}
                    </div>
                </div>
            </div>

            <div class="prose prose-slate max-w-none mb-4" inner_html=content></div>

            <div class="flex items-center justify-between pt-4 border-t">
                <div class="text-sm text-gray-600">
                    {read_by(&readers)}
                </div>
                {if read {
                    view! { <span class="text-sm text-green-600 font-medium">"✓ You've read this"</span> }.into_any()
                } else {
                    view! {
                        <button
                            class="px-4 py-2 bg-blue-50 text-blue-600 font-medium rounded-lg hover:bg-blue-100"
                            on:click=move |_| on_acknowledge(id)
                        >
                            "Mark as Read"
                        </button>
                    }
                    .into_any()
                }}
            </div>
        </div>
    }
}

#[component]
fn NewUpdateForm(
    email: Memo<String>,
    on_posted: Callback<()>,
    set_error: WriteSignal<Option<String>>,
) -> impl IntoView {
    let (update_type, set_update_type) = signal(UpdateType::General);
    let (priority, set_priority) = signal(UpdatePriority::Normal);
    let (title, set_title) = signal(String::new());
    let (content, set_content) = signal(String::new());
    let (posting, set_posting) = signal(false);
    let (invalid, set_invalid) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let author_email = email.get_untracked();
        if title.get_untracked().trim().is_empty() || content.get_untracked().trim().is_empty() || author_email.is_empty() {
            set_invalid.set(true);
            return;
        }
        set_invalid.set(false);
        let update = NewUpdate {
            update_type: update_type.get_untracked(),
            title: title.get_untracked(),
            content: content.get_untracked(),
            priority: priority.get_untracked(),
            author_email,
        };
        set_posting.set(true);
        spawn_local(async move {
            match api::client().post_update(&update).await {
                Ok(created) => {
                    console::log(&format!("[Communication] Posted update {}", created.id));
                    set_title.set(String::new());
                    set_content.set(String::new());
                    on_posted.run(());
                }
                Err(e) => {
                    console::error(&format!("[Communication] Failed to post update: {}", e));
                    set_error.set(Some(format!("Failed to post update: {}", e)));
                }
            }
            set_posting.set(false);
        });
    };

    let field = "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500";

    view! {
        <form class="bg-white rounded-lg shadow-md p-6 mb-6 space-y-4" on:submit=submit>
            <h2 class="text-xl font-bold text-gray-900">"Post New Update"</h2>
            <div class="grid grid-cols-2 gap-4">
                <label class="block text-sm font-medium text-gray-700">
                    "Type"
                    <select class=field on:change=move |ev| set_update_type.set(UpdateType::from(event_target_value(&ev)))>
                        {UpdateType::known()
                            .into_iter()
                            .map(|t| {
                                let text = format!("{} {}", update_type_icon(&t), t.as_str());
                                let selected = t.clone();
                                view! {
                                    <option value=t.as_str().to_string() selected=move || update_type.get() == selected>
                                        {text}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
                <label class="block text-sm font-medium text-gray-700">
                    "Priority"
                    <select class=field on:change=move |ev| set_priority.set(UpdatePriority::from(event_target_value(&ev)))>
                        {UpdatePriority::known()
                            .into_iter()
                            .map(|p| {
                                let selected = p.clone();
                                view! {
                                    <option value=p.as_str().to_string() selected=move || priority.get() == selected>
                                        {p.as_str().to_string()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
            </div>
            <label class="block text-sm font-medium text-gray-700">
                "Title"
                <input
                    type="text"
                    class=field
                    placeholder="Brief summary of the update"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
            </label>
            <label class="block text-sm font-medium text-gray-700">
                "Details"
                <textarea
                    class=field
                    rows="4"
                    placeholder="Detailed information about the update (markdown supported)"
                    prop:value=move || content.get()
                    on:input=move |ev| set_content.set(event_target_value(&ev))
                ></textarea>
            </label>
            <Show when=move || invalid.get()>
                <p class="text-sm text-red-600">"Please fill in all fields"</p>
            </Show>
            <button
                type="submit"
                class="px-6 py-2 bg-blue-600 text-white font-medium rounded-lg hover:bg-blue-700 disabled:opacity-50"
                disabled=move || posting.get()
            >
                {move || if posting.get() { "Posting..." } else { "Post Update" }}
            </button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(acknowledgements: &[&str]) -> UpdatePost {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "type": "GENERAL",
            "title": "Weekly",
            "content": "Notes",
            "author": "Pat",
            "priority": "NORMAL",
            "created_at": "2025-10-14T15:05:00",
            "acknowledgements": acknowledgements,
        }))
        .unwrap()
    }

    #[test]
    fn test_read_by_lists_readers() {
        let update = post(&["alice", "bob"]);
        assert_eq!(read_by(&update.acknowledgements).as_deref(), Some("✓ Read by 2: alice, bob"));
        assert_eq!(read_by(&post(&[]).acknowledgements), None);
    }

    #[test]
    fn test_reader_matches_email_local_part() {
        let update = post(&["alice"]);
        assert!(update.acknowledged_by("alice@example.com"));
        assert!(!update.acknowledged_by("bob@example.com"));
    }

    #[test]
    fn test_all_filter_comes_first() {
        assert!(FILTERS[0].0.is_none());
        assert!(FILTERS[1..].iter().all(|(f, _)| f.is_some()));
    }
}
