//! Jerry Tools Page
//!
//! Capability cards, deployed services and code repositories as reported
//! by the status endpoint.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{Badge, JerryLayout, Loading, PageError};
use crate::console;
use crate::context::use_session;
use crate::format::short_date;
use crate::models::{Capability, JerryStatus};
use crate::presentation::capability_status;
use crate::route::JerryTab;
use crate::session::load_when_authenticated;

#[component]
pub fn JerryToolsPage() -> impl IntoView {
    let session = use_session();
    let (status, set_status) = signal::<Option<JerryStatus>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        load_when_authenticated(&session.auth.get(), |_| {
            spawn_local(async move {
                match api::client().jerry_status().await {
                    Ok(loaded) => set_status.set(Some(loaded)),
                    Err(e) => {
                        console::error(&format!("[JerryTools] Failed to load status: {}", e));
                        set_error.set(Some(e.to_string()));
                    }
                }
            });
        });
    });

    view! {
        <JerryLayout active=JerryTab::Tools>
            <div class="bg-purple-50 border border-purple-200 rounded-lg p-4 mb-6">
                <p class="text-purple-800">
                    <strong>"Jerry's Tools: "</strong>
                    "These are the core capabilities that power Jerry. Tools marked \"Live\" are in production; \"Ready\" means the infrastructure is complete and awaiting training data."
                </p>
            </div>

            <PageError error=error />

            {move || {
                let Some(s) = status.get() else {
                    return if error.with(Option::is_none) {
                        view! { <Loading /> }.into_any()
                    } else {
                        ().into_any()
                    };
                };
                view! {
                    <div class="space-y-6 mb-8">
                        {s.capabilities.into_iter().map(|c| view! { <CapabilityCard capability=c /> }).collect_view()}
                    </div>

                    <div class="bg-white rounded-lg shadow-md p-6 mb-8">
                        <h2 class="text-xl font-bold text-gray-900 mb-4">"Production Infrastructure"</h2>
                        <div class="grid md:grid-cols-3 gap-4">
                            {s.infrastructure
                                .into_iter()
                                .map(|svc| {
                                    let (class, text) = capability_status(&svc.status);
                                    view! {
                                        <div class="border border-gray-200 rounded-lg p-4">
                                            <div class="flex items-center justify-between">
                                                <span class="font-semibold text-gray-900">{svc.name}</span>
                                                <Badge class=class text=text />
                                            </div>
                                            <div class="text-sm text-gray-600 mt-1">{svc.detail}</div>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>

                    <div class="bg-white rounded-lg shadow-md p-6">
                        <h2 class="text-xl font-bold text-gray-900 mb-4">
                            {format!("Software Foundation ({} Repositories)", s.repositories.len())}
                        </h2>
                        <table class="w-full text-sm">
                            <thead>
                                <tr class="text-left text-gray-500 border-b">
                                    <th class="py-2">"Repository"</th>
                                    <th class="py-2">"Purpose"</th>
                                    <th class="py-2">"Status"</th>
                                    <th class="py-2">"Updated"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {s.repositories
                                    .into_iter()
                                    .map(|repo| {
                                        let (class, _) = capability_status(&repo.status);
                                        view! {
                                            <tr class="border-b border-gray-100">
                                                <td class="py-2 font-mono text-gray-900">{repo.name}</td>
                                                <td class="py-2 text-gray-600">{repo.description}</td>
                                                <td class="py-2"><Badge class=class text=repo.status /></td>
                                                <td class="py-2 text-gray-500">{short_date(&repo.last_updated)}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    </div>
                }
                .into_any()
            }}
        </JerryLayout>
    }
}

#[component]
fn CapabilityCard(capability: Capability) -> impl IntoView {
    let (class, text) = capability_status(&capability.status);
    view! {
        <div class="bg-white rounded-lg shadow-md p-6">
            <div class="flex items-center justify-between mb-2">
                <h2 class="text-xl font-bold text-gray-900">{capability.name}</h2>
                <Badge class=class text=text />
            </div>
            <p class="text-gray-600 mb-4">{capability.description}</p>
            <ul class="grid md:grid-cols-2 gap-2 text-sm text-gray-700 mb-4">
                {capability.details.into_iter().map(|d| view! { <li>"• " {d}</li> }).collect_view()}
            </ul>
            {(!capability.achievement.is_empty()).then(|| view! {
                <div class="bg-green-50 text-green-800 rounded p-3 text-sm">
                    <strong>"Achievement: "</strong>
                    {capability.achievement}
                </div>
            })}
        </div>
    }
}
