//! Jerry Section Layout
//!
//! Shared header and sub-navigation tabs for the Jerry pages.

use leptos::prelude::*;

use crate::route::JerryTab;

#[component]
pub fn JerryLayout(active: JerryTab, children: Children) -> impl IntoView {
    let tabs = JerryTab::ALL
        .iter()
        .map(|&tab| {
            let class = if tab == active {
                "flex items-center gap-2 px-6 py-4 text-sm font-medium border-b-2 border-purple-500 text-purple-600"
            } else {
                "flex items-center gap-2 px-6 py-4 text-sm font-medium border-b-2 border-transparent text-gray-500 hover:text-gray-700 hover:border-gray-300"
            };
            view! {
                <a href=tab.path() class=class>
                    <span>{tab.icon()}</span>
                    <span>{tab.label()}</span>
                </a>
            }
        })
        .collect_view();

    view! {
        <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <div class="flex items-center gap-4 mb-6">
                <div class="text-5xl">"🤖"</div>
                <div>
                    <h1 class="text-3xl font-bold text-gray-900">"Jerry"</h1>
                    <p class="text-lg text-gray-600">"Your AI Apprentice - Learning to Work Alongside Your Team"</p>
                </div>
            </div>
            <div class="bg-white rounded-lg shadow mb-6">
                <nav class="flex -mb-px border-b border-gray-200">{tabs}</nav>
            </div>
            {children()}
        </div>
    }
}
