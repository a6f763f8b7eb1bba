//! Protected Page Wrapper
//!
//! Renders its children only for a signed-in user. While the session is
//! resolving a spinner is shown; a signed-out visitor is sent to the login
//! endpoint and nothing inside is mounted, so no backend call is made.

use leptos::prelude::*;

use crate::components::{ErrorBanner, Loading};
use crate::config::PortalConfig;
use crate::console;
use crate::context::use_session;
use crate::route::navigate;
use crate::session::{guard, GuardOutcome};

#[component]
pub fn Protected(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let config = PortalConfig::from_env();
    let outcome = Memo::new(move |_| guard(&session.auth.get(), &config));

    Effect::new(move |_| {
        if let GuardOutcome::Redirect(url) = outcome.get() {
            console::log(&format!("[GUARD] Not signed in, redirecting to {}", url));
            navigate(&url);
        }
    });

    move || match outcome.get() {
        GuardOutcome::Wait => view! { <Loading /> }.into_any(),
        GuardOutcome::Redirect(_) => view! { <Loading message="Redirecting to sign in..." /> }.into_any(),
        GuardOutcome::Failed(message) => view! {
            <div class="max-w-3xl mx-auto px-4 py-8">
                <ErrorBanner message=format!("Could not check your sign-in: {}", message) />
                <button class="text-sm text-blue-600 hover:underline" on:click=move |_| session.refresh()>
                    "Try again"
                </button>
            </div>
        }
        .into_any(),
        GuardOutcome::Render(_) => children().into_any(),
    }
}
