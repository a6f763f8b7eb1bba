//! Home Page
//!
//! Public landing page: sign in, or go to the dashboard when signed in.

use leptos::prelude::*;

use crate::config::PortalConfig;
use crate::context::use_session;
use crate::session::{login_url, AuthState};

const FEATURES: [(&str, &str); 3] = [
    ("Real-time Updates", "Live project metrics and deliverable tracking"),
    ("AI-Powered Insights", "Automated weekly digests and summaries"),
    ("Transparent Communication", "Single source of truth for project status"),
];

#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session();
    let sign_in = login_url(&PortalConfig::from_env());
    let button = "px-8 py-3 bg-blue-600 text-white rounded-lg hover:bg-blue-700 transition-colors font-semibold";

    let action = move || match session.auth.get() {
        AuthState::Authenticated(_) => view! { <a href="/dashboard" class=button>"Go to Dashboard"</a> }.into_any(),
        AuthState::Anonymous => view! { <a href=sign_in.clone() class=button>"Sign In"</a> }.into_any(),
        AuthState::Loading => view! { <span class="text-gray-400">"..."</span> }.into_any(),
        AuthState::Unavailable(_) => view! { <span class="text-red-600">"Sign-in is unavailable right now"</span> }.into_any(),
    };

    view! {
        <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-16 text-center">
            <h1 class="text-5xl font-bold text-gray-900 mb-6">"Project Portal"</h1>
            <p class="text-xl text-gray-600 mb-8">"Real-time project tracking and transparency"</p>
            <div class="flex gap-4 justify-center">{action}</div>
            <div class="mt-16 grid md:grid-cols-3 gap-8">
                {FEATURES
                    .iter()
                    .map(|(title, text)| {
                        view! {
                            <div class="bg-white p-6 rounded-lg shadow-md">
                                <h3 class="text-lg font-semibold text-gray-900 mb-2">{*title}</h3>
                                <p class="text-gray-600">{*text}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
