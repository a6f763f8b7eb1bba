//! Navigation Bar
//!
//! Brand link, dashboard link, hover dropdowns and the user block. A
//! dropdown closes 150 ms after the pointer leaves it so the pointer can
//! cross the gap between button and menu.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::config::PortalConfig;
use crate::context::use_session;
use crate::models::User;
use crate::route::JerryTab;
use crate::sequence::RequestSequencer;
use crate::session::{login_url, AuthState};

const CLOSE_DELAY_MS: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Menu {
    Project,
    Jerry,
    Resources,
    MeetingsActions,
}

impl Menu {
    const ALL: [Menu; 4] = [Menu::Project, Menu::Jerry, Menu::Resources, Menu::MeetingsActions];

    fn label(&self) -> &'static str {
        match self {
            Menu::Project => "Project",
            Menu::Jerry => "Jerry (AI)",
            Menu::Resources => "Resources",
            Menu::MeetingsActions => "Meetings & Actions",
        }
    }

    fn links(&self) -> Vec<(&'static str, &'static str)> {
        match self {
            Menu::Project => vec![
                ("/deliverables", "Deliverables"),
                ("/metrics", "Metrics"),
                ("/communication", "Updates"),
            ],
            Menu::Jerry => JerryTab::ALL.iter().map(|tab| (tab.path(), tab.label())).collect(),
            Menu::Resources => vec![("/research", "Research"), ("/sample-projects", "Sample Projects")],
            Menu::MeetingsActions => vec![("/meetings", "Meetings"), ("/action-items", "Action Items")],
        }
    }
}

#[component]
pub fn Navigation() -> impl IntoView {
    let (open, set_open) = signal::<Option<Menu>>(None);
    // Any newer enter/leave cancels a pending close
    let closer = RequestSequencer::new();

    let dropdowns = Menu::ALL
        .iter()
        .map(|&menu| {
            let on_enter = {
                let closer = closer.clone();
                move |_| {
                    closer.next();
                    set_open.set(Some(menu));
                }
            };
            let on_leave = {
                let closer = closer.clone();
                move |_| {
                    let ticket = closer.next();
                    spawn_local(async move {
                        TimeoutFuture::new(CLOSE_DELAY_MS).await;
                        if ticket.is_current() {
                            set_open.set(None);
                        }
                    });
                }
            };

            view! {
                <div class="relative" on:mouseenter=on_enter on:mouseleave=on_leave>
                    <button class="px-3 py-2 rounded-md text-sm font-medium text-gray-700 hover:text-gray-900 hover:bg-gray-100">
                        {menu.label()}
                        " ▾"
                    </button>
                    <Show when=move || open.get() == Some(menu)>
                        <div class="absolute left-0 mt-1 w-48 bg-white rounded-md shadow-lg py-1 z-50">
                            {menu
                                .links()
                                .into_iter()
                                .map(|(href, label)| {
                                    view! {
                                        <a href=href class="block px-4 py-2 text-sm text-gray-700 hover:bg-gray-100">
                                            {label}
                                        </a>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </Show>
                </div>
            }
        })
        .collect_view();

    view! {
        <nav class="bg-white shadow-sm border-b border-gray-200">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between h-16 items-center">
                    <div class="flex items-center gap-6">
                        <a href="/" class="text-xl font-bold text-blue-600">"Project Portal"</a>
                        <a
                            href="/dashboard"
                            class="px-3 py-2 rounded-md text-sm font-medium text-gray-700 hover:text-gray-900 hover:bg-gray-100"
                        >
                            "Dashboard"
                        </a>
                        {dropdowns}
                    </div>
                    <UserBlock />
                </div>
            </div>
        </nav>
    }
}

#[component]
fn UserBlock() -> impl IntoView {
    let session = use_session();
    let sign_in = login_url(&PortalConfig::from_env());

    move || match session.auth.get() {
        AuthState::Loading => view! { <span class="text-sm text-gray-400">"..."</span> }.into_any(),
        AuthState::Unavailable(_) => view! { <span class="text-sm text-red-600">"Offline"</span> }.into_any(),
        AuthState::Anonymous => view! {
            <a
                href=sign_in.clone()
                class="px-4 py-2 rounded-md text-sm font-medium text-white bg-blue-600 hover:bg-blue-700"
            >
                "Sign In"
            </a>
        }
        .into_any(),
        AuthState::Authenticated(user) => view! { <SignedInUser user=user /> }.into_any(),
    }
}

#[component]
fn SignedInUser(user: User) -> impl IntoView {
    let session = use_session();
    let initial = user.display_name().chars().next().unwrap_or('U').to_uppercase().to_string();
    let avatar = match user.picture.clone() {
        Some(src) => view! { <img src=src alt="" class="w-8 h-8 rounded-full" /> }.into_any(),
        None => view! {
            <div class="w-8 h-8 rounded-full bg-blue-600 text-white flex items-center justify-center text-sm font-semibold">
                {initial}
            </div>
        }
        .into_any(),
    };

    view! {
        <div class="flex items-center gap-3">
            {avatar}
            <div class="text-right hidden sm:block">
                <div class="text-sm font-medium text-gray-900">{user.display_name()}</div>
                <div class="text-xs text-gray-500">{user.email.clone().unwrap_or_default()}</div>
            </div>
            <button
                class="px-3 py-2 rounded-md text-sm font-medium text-gray-700 hover:bg-gray-100"
                on:click=move |_| session.logout()
            >
                "Logout"
            </button>
        </div>
    }
}
