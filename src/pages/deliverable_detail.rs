//! Deliverable Detail Page
//!
//! Shows one deliverable and lets the team move its status and
//! percentage. The save carries the `updated_at` the form was loaded with;
//! if someone saved in between, the latest version is loaded instead.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::components::{Badge, Loading, PageError, ProgressBar};
use crate::console;
use crate::context::use_session;
use crate::format::{date_time, short_date};
use crate::markdown::render_markdown;
use crate::models::{Deliverable, DeliverableProgress, DeliverableStatus};
use crate::presentation::{deliverable_status_class, label, owner_class};
use crate::progress::clamp_percent;
use crate::session::load_when_authenticated;

const CONFLICT_MESSAGE: &str = "Someone else updated this deliverable. The latest version has been loaded; review it and save again.";

/// A failed save keeps the form as the user left it; success and conflicts
/// load the stored version.
fn reload_after_save(result: &Result<(), ApiError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => e.is_conflict(),
    }
}

#[component]
pub fn DeliverableDetailPage(id: u32) -> impl IntoView {
    let session = use_session();
    let (deliverable, set_deliverable) = signal::<Option<Deliverable>>(None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (reload, set_reload) = signal(0u32);

    // Form state
    let (status, set_status) = signal(DeliverableStatus::NotStarted);
    let (percent, set_percent) = signal(0.0f64);
    let (comments, set_comments) = signal(String::new());
    let (saving, set_saving) = signal(false);

    Effect::new(move |_| {
        let _ = reload.get();
        load_when_authenticated(&session.auth.get(), |_| {
            spawn_local(async move {
                match api::client().get_deliverable(id).await {
                    Ok(loaded) => {
                        set_status.set(loaded.status.clone());
                        set_percent.set(loaded.completion_percentage);
                        set_comments.set(String::new());
                        set_deliverable.set(Some(loaded));
                        set_error.set(None);
                    }
                    Err(e) => {
                        console::error(&format!("[Deliverable] Failed to load {}: {}", id, e));
                        set_error.set(Some(e.to_string()));
                    }
                }
                set_loading.set(false);
            });
        });
    });

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = deliverable.get_untracked() else {
            return;
        };
        let progress = DeliverableProgress {
            status: status.get_untracked(),
            completion_percentage: percent.get_untracked(),
            blockers: Vec::new(),
            comments: comments.get_untracked(),
            expected_updated_at: current.updated_at.clone(),
        };
        set_saving.set(true);
        set_notice.set(None);
        spawn_local(async move {
            let result = api::client().update_deliverable(id, &progress).await;
            match &result {
                Ok(()) => {
                    console::log(&format!("[Deliverable] Saved {}", id));
                    set_notice.set(Some("Saved.".to_string()));
                    set_error.set(None);
                }
                Err(e) if e.is_conflict() => {
                    console::log(&format!("[Deliverable] Conflict saving {}", id));
                    set_notice.set(Some(CONFLICT_MESSAGE.to_string()));
                }
                Err(e) => {
                    console::error(&format!("[Deliverable] Failed to save {}: {}", id, e));
                    set_error.set(Some(e.to_string()));
                }
            }
            set_saving.set(false);
            if reload_after_save(&result) {
                set_reload.update(|n| *n += 1);
            }
        });
    };

    view! {
        <div class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <a href="/deliverables" class="text-blue-600 hover:underline text-sm">"← Back to Deliverables"</a>

            <div class="mt-4">
                <PageError error=error />
                {move || notice.get().map(|n| view! {
                    <div class="bg-blue-50 border border-blue-200 text-blue-800 rounded-lg p-4 mb-6">{n}</div>
                })}
            </div>

            {move || {
                let Some(d) = deliverable.get() else {
                    return if loading.get() { view! { <Loading /> }.into_any() } else { ().into_any() };
                };
                let description = render_markdown(&d.description);
                let evidence = d.evidence.clone();
                view! {
                    <div class="bg-white rounded-lg shadow p-8 mb-6">
                        <div class="flex items-start justify-between gap-4 mb-4">
                            <h1 class="text-3xl font-bold text-gray-900">{d.name.clone()}</h1>
                            <Badge class=deliverable_status_class(&d.status) text=label(d.status.as_str()) />
                        </div>
                        <div class="flex flex-wrap gap-6 text-sm text-gray-600 mb-6">
                            <span>{format!("Phase {}", d.phase_id)}</span>
                            <span>"Due: " {short_date(&d.due_date)}</span>
                            <Badge class=owner_class(&d.owner) text=d.owner.as_str().to_string() />
                            {d.updated_at.clone().map(|u| view! { <span>"Last updated: " {date_time(&u)}</span> })}
                        </div>
                        <div class="prose max-w-none mb-6" inner_html=description></div>
                        <div class="flex justify-between text-sm text-gray-600 mb-1">
                            <span>"Completion"</span>
                            <span class="font-semibold">{format!("{:.0}%", clamp_percent(d.completion_percentage))}</span>
                        </div>
                        <ProgressBar percent=d.completion_percentage bar_class="bg-blue-600" />
                    </div>

                    <div class="grid gap-6 md:grid-cols-2">
                        <div class="bg-white rounded-lg shadow p-6">
                            <h2 class="text-xl font-bold text-gray-900 mb-4">"Evidence"</h2>
                            {if evidence.is_empty() {
                                view! { <p class="text-gray-500">"No evidence items yet"</p> }.into_any()
                            } else {
                                view! {
                                    <ul class="list-disc pl-5 space-y-1 text-gray-700">
                                        {evidence.into_iter().map(|e| view! { <li>{e}</li> }).collect_view()}
                                    </ul>
                                }
                                .into_any()
                            }}
                        </div>
                        <div class="bg-white rounded-lg shadow p-6">
                            <h2 class="text-xl font-bold text-gray-900 mb-4">"Comments"</h2>
                            {match d.comments.clone().filter(|c| !c.is_empty()) {
                                Some(c) => view! { <p class="text-gray-700 whitespace-pre-wrap">{c}</p> }.into_any(),
                                None => view! { <p class="text-gray-500">"No comments yet"</p> }.into_any(),
                            }}
                        </div>
                    </div>
                }
                .into_any()
            }}

            <Show when=move || deliverable.with(Option::is_some)>
                <form class="bg-white rounded-lg shadow p-6 mt-6 space-y-4" on:submit=save>
                    <h2 class="text-xl font-bold text-gray-900">"Update Progress"</h2>
                    <label class="block text-sm text-gray-700">
                        "Status"
                        <select
                            class="mt-1 block w-full border border-gray-300 rounded-md px-3 py-2"
                            on:change=move |ev| set_status.set(DeliverableStatus::from(event_target_value(&ev)))
                        >
                            {DeliverableStatus::known()
                                .into_iter()
                                .map(|s| {
                                    let value = s.as_str().to_string();
                                    let selected = s.clone();
                                    view! {
                                        <option value=value selected=move || status.get() == selected>
                                            {label(s.as_str())}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <label class="block text-sm text-gray-700">
                        {move || format!("Completion: {:.0}%", percent.get())}
                        <input
                            type="range"
                            min="0"
                            max="100"
                            step="5"
                            class="mt-1 block w-full"
                            prop:value=move || percent.get().to_string()
                            on:input=move |ev| {
                                if let Ok(v) = event_target_value(&ev).parse::<f64>() {
                                    set_percent.set(v);
                                }
                            }
                        />
                    </label>
                    <label class="block text-sm text-gray-700">
                        "Comment"
                        <textarea
                            class="mt-1 block w-full border border-gray-300 rounded-md px-3 py-2"
                            rows="3"
                            prop:value=move || comments.get()
                            on:input=move |ev| set_comments.set(event_target_value(&ev))
                        ></textarea>
                    </label>
                    <button
                        type="submit"
                        class="px-6 py-2 bg-blue-600 text-white rounded-md hover:bg-blue-700 disabled:opacity-50"
                        disabled=move || saving.get()
                    >
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </button>
                </form>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_success_and_conflict_reload() {
        assert!(reload_after_save(&Ok(())));
        assert!(reload_after_save(&Err(ApiError::Status { status: 409, body: String::new() })));
        assert!(!reload_after_save(&Err(ApiError::Status { status: 500, body: String::new() })));
        assert!(!reload_after_save(&Err(ApiError::Network("offline".to_string()))));
    }
}
