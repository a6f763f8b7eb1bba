//! Metrics Page
//!
//! Overall progress, per-metric progress charts and inline value editing.

use std::f64::consts::PI;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{Loading, PageError, PageHeader, ProgressBar};
use crate::console;
use crate::context::use_session;
use crate::format::{date_time, metric_value};
use crate::models::{Metric, MetricRecord};
use crate::presentation::progress_text_class;
use crate::progress::{chart_label, overall_progress, percent_of_target, radial_points, raw_percent, RadialPoint};
use crate::session::load_when_authenticated;

const CONFLICT_MESSAGE: &str = "This metric was updated by someone else. The latest value has been loaded.";

#[component]
pub fn MetricsPage() -> impl IntoView {
    let session = use_session();
    let (metrics, set_metrics) = signal(Vec::<Metric>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (reload, set_reload) = signal(0u32);
    let (editing, set_editing) = signal::<Option<u32>>(None);
    let (draft, set_draft) = signal(String::new());
    let (updating, set_updating) = signal(false);

    Effect::new(move |_| {
        let _ = reload.get();
        load_when_authenticated(&session.auth.get(), |_| {
            spawn_local(async move {
                match api::client().list_metrics().await {
                    Ok(loaded) => {
                        console::log(&format!("[Metrics] Loaded {} metrics", loaded.len()));
                        set_metrics.set(loaded);
                        set_error.set(None);
                    }
                    Err(e) => {
                        console::error(&format!("[Metrics] Failed to load: {}", e));
                        set_error.set(Some(e.to_string()));
                    }
                }
                set_loading.set(false);
            });
        });
    });

    let start_edit = move |metric: &Metric| {
        set_draft.set(metric.current.to_string());
        set_editing.set(Some(metric.id));
        set_notice.set(None);
    };

    let submit = move |metric: Metric| {
        let value = match draft.get_untracked().trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                set_error.set(Some("Enter a number".to_string()));
                return;
            }
        };
        let record = MetricRecord {
            metric_id: metric.id,
            value,
            notes: String::new(),
            expected_updated_at: metric.updated_at.clone(),
        };
        set_updating.set(true);
        spawn_local(async move {
            match api::client().record_metric(&record).await {
                Ok(()) => {
                    set_editing.set(None);
                    set_notice.set(Some(format!("{} updated.", metric.name)));
                    set_error.set(None);
                }
                Err(e) if e.is_conflict() => {
                    set_editing.set(None);
                    set_notice.set(Some(CONFLICT_MESSAGE.to_string()));
                }
                Err(e) => {
                    console::error(&format!("[Metrics] Failed to update {}: {}", metric.id, e));
                    set_error.set(Some(format!("Failed to update metric: {}", e)));
                }
            }
            set_updating.set(false);
            set_reload.update(|n| *n += 1);
        });
    };

    let overall = Memo::new(move |_| overall_progress(&metrics.get()));

    view! {
        <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <PageHeader title="Success Metrics" subtitle="Key performance indicators against their targets" />
            <PageError error=error />
            {move || notice.get().map(|n| view! {
                <div class="bg-blue-50 border border-blue-200 text-blue-800 rounded-lg p-4 mb-6">{n}</div>
            })}

            {move || {
                if loading.get() {
                    return view! { <Loading /> }.into_any();
                }
                let list = metrics.get();
                let o = overall.get();
                view! {
                    <div class="bg-white rounded-lg shadow p-6 mb-8">
                        <div class="flex justify-between items-center mb-3">
                            <h2 class="text-xl font-bold text-gray-900">"Overall Project Progress"</h2>
                            <span class="text-3xl font-bold text-blue-600">{format!("{:.1}%", o.percent)}</span>
                        </div>
                        <ProgressBar percent=o.percent bar_class="bg-blue-600" />
                    </div>

                    <div class="grid gap-6 lg:grid-cols-2 mb-8">
                        <div class="bg-white rounded-lg shadow p-6">
                            <h2 class="text-xl font-bold text-gray-900 mb-4">"Progress to Target"</h2>
                            <ProgressChart metrics=list.clone() />
                        </div>
                        <div class="bg-white rounded-lg shadow p-6">
                            <h2 class="text-xl font-bold text-gray-900 mb-4">"Accuracy Metrics"</h2>
                            <RadialChart points=radial_points(&list) />
                        </div>
                    </div>

                    <div class="grid gap-6 md:grid-cols-2 lg:grid-cols-3">
                        {list
                            .into_iter()
                            .map(|metric| {
                                let id = metric.id;
                                let for_edit = metric.clone();
                                let for_submit = metric.clone();
                                let ratio = raw_percent(metric.current, metric.target);
                                let percent = percent_of_target(metric.current, metric.target);
                                let percent_class = ratio.map(progress_text_class).unwrap_or("text-gray-600");
                                view! {
                                    <div class="bg-white rounded-lg shadow p-6">
                                        <h3 class="font-semibold text-gray-900 mb-2">{metric.name.clone()}</h3>
                                        <div class="flex items-baseline gap-2 mb-2">
                                            <span class="text-2xl font-bold text-gray-900">{metric_value(metric.current, &metric.unit)}</span>
                                            <span class="text-sm text-gray-500">"/ " {metric_value(metric.target, &metric.unit)}</span>
                                        </div>
                                        <ProgressBar percent=ratio.unwrap_or(0.0) />
                                        <div class=format!("text-sm font-semibold mt-1 {}", percent_class)>
                                            {format!("{:.0}% of target", percent)}
                                        </div>
                                        {(!metric.notes.is_empty()).then(|| view! { <p class="text-sm text-gray-600 mt-2">{metric.notes.clone()}</p> })}
                                        {metric.updated_at.clone().map(|u| view! {
                                            <div class="text-xs text-gray-400 mt-3">"Last updated: " {date_time(&u)}</div>
                                        })}
                                        <Show
                                            when=move || editing.get() == Some(id)
                                            fallback={
                                                let for_edit = for_edit.clone();
                                                move || {
                                                    let for_edit = for_edit.clone();
                                                    view! {
                                                        <button
                                                            class="mt-4 text-sm text-blue-600 hover:underline"
                                                            on:click=move |_| start_edit(&for_edit)
                                                        >
                                                            "Update value"
                                                        </button>
                                                    }
                                                }
                                            }
                                        >
                                            {
                                                let for_submit = for_submit.clone();
                                                view! {
                                                    <div class="mt-4 flex gap-2">
                                                        <input
                                                            type="number"
                                                            step="any"
                                                            class="flex-1 border border-gray-300 rounded-md px-3 py-1"
                                                            prop:value=move || draft.get()
                                                            on:input=move |ev| set_draft.set(event_target_value(&ev))
                                                        />
                                                        <button
                                                            class="px-3 py-1 bg-blue-600 text-white rounded-md disabled:opacity-50"
                                                            disabled=move || updating.get()
                                                            on:click=move |_| submit(for_submit.clone())
                                                        >
                                                            "Save"
                                                        </button>
                                                        <button
                                                            class="px-3 py-1 border border-gray-300 rounded-md"
                                                            on:click=move |_| set_editing.set(None)
                                                        >
                                                            "Cancel"
                                                        </button>
                                                    </div>
                                                }
                                            }
                                        </Show>
                                    </div>
                                }
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
fn ProgressChart(metrics: Vec<Metric>) -> impl IntoView {
    metrics
        .into_iter()
        .map(|m| {
            let percent = percent_of_target(m.current, m.target);
            view! {
                <div class="mb-3">
                    <div class="flex justify-between text-sm text-gray-700 mb-1">
                        <span>{chart_label(&m.name)}</span>
                        <span>{format!("{:.0}%", percent)}</span>
                    </div>
                    <ProgressBar percent=percent bar_class="bg-blue-500" />
                </div>
            }
        })
        .collect_view()
}

/// Concentric rings, one per percent-unit metric
#[component]
fn RadialChart(points: Vec<RadialPoint>) -> impl IntoView {
    if points.is_empty() {
        return view! { <p class="text-gray-500">"No percentage metrics yet"</p> }.into_any();
    }
    let size = 120.0 + points.len() as f64 * 28.0;
    let center = size / 2.0;
    let legend = points.clone();

    let rings = points
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            let radius = 40.0 + i as f64 * 14.0;
            let circumference = 2.0 * PI * radius;
            let filled = circumference * p.value / 100.0;
            let (c, r) = (center.to_string(), radius.to_string());
            view! {
                <circle cx=c.clone() cy=c.clone() r=r.clone() fill="none" stroke="#e5e7eb" stroke-width="10" />
                <circle
                    cx=c.clone()
                    cy=c.clone()
                    r=r
                    fill="none"
                    stroke=p.color
                    stroke-width="10"
                    stroke-linecap="round"
                    stroke-dasharray=format!("{:.2} {:.2}", filled, circumference)
                    transform=format!("rotate(-90 {} {})", center, center)
                />
            }
        })
        .collect_view();

    view! {
        <div class="flex flex-col items-center">
            <svg width=size.to_string() height=size.to_string() viewBox=format!("0 0 {} {}", size, size)>{rings}</svg>
            <div class="flex flex-wrap gap-4 mt-4 text-sm">
                {legend
                    .into_iter()
                    .map(|p| view! {
                        <span class="flex items-center gap-1">
                            <span class="inline-block w-3 h-3 rounded-full" style=format!("background-color: {}", p.color)></span>
                            {format!("{} {:.0}%", p.name, p.value)}
                        </span>
                    })
                    .collect_view()}
            </div>
        </div>
    }
    .into_any()
}
