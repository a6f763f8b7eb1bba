//! Status Components
//!
//! Loading spinner, inline error banner, badges and progress bars shared
//! by every page.

use leptos::prelude::*;

use crate::presentation::progress_bar_class;
use crate::progress::clamp_percent;

#[component]
pub fn Loading(#[prop(optional, into)] message: Option<String>) -> impl IntoView {
    let message = message.unwrap_or_else(|| "Loading...".to_string());
    view! {
        <div class="flex items-center justify-center py-16">
            <div class="text-xl text-gray-600">{message}</div>
        </div>
    }
}

#[component]
pub fn ErrorBanner(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-red-50 border border-red-200 text-red-800 rounded-lg p-4 mb-6">
            <strong>"Error: "</strong>
            {message}
        </div>
    }
}

/// Error banner bound to a page-local error signal
#[component]
pub fn PageError(error: ReadSignal<Option<String>>) -> impl IntoView {
    move || error.get().map(|message| view! { <ErrorBanner message=message /> })
}

#[component]
pub fn Badge(class: &'static str, #[prop(into)] text: String) -> impl IntoView {
    view! {
        <span class=format!("px-3 py-1 rounded-full text-xs font-semibold {}", class)>{text}</span>
    }
}

/// Horizontal bar; the width is clamped to 0..=100.
#[component]
pub fn ProgressBar(
    percent: f64,
    #[prop(optional)] bar_class: Option<&'static str>,
) -> impl IntoView {
    let width = clamp_percent(percent);
    let bar_class = bar_class.unwrap_or_else(|| progress_bar_class(percent));
    view! {
        <div class="w-full bg-gray-200 rounded-full h-2.5">
            <div
                class=format!("h-2.5 rounded-full transition-all {}", bar_class)
                style=format!("width: {}%", width)
            ></div>
        </div>
    }
}

#[component]
pub fn StatCard(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(optional)] value_class: Option<&'static str>,
) -> impl IntoView {
    let value_class = value_class.unwrap_or("text-gray-900");
    view! {
        <div class="bg-white rounded-lg shadow p-6">
            <div class=format!("text-3xl font-bold {}", value_class)>{value}</div>
            <div class="text-sm text-gray-600 mt-1">{label}</div>
        </div>
    }
}

/// Page heading with a subtitle
#[component]
pub fn PageHeader(title: &'static str, subtitle: &'static str) -> impl IntoView {
    view! {
        <div class="mb-8">
            <h1 class="text-3xl font-bold text-gray-900">{title}</h1>
            <p class="text-lg text-gray-600 mt-2">{subtitle}</p>
        </div>
    }
}
