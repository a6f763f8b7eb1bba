//! Session Context
//!
//! Identity state provided once at application start via the Leptos
//! Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::console;
use crate::route::navigate;
use crate::session::{AuthState, LOGOUT_PATH};

#[derive(Clone, Copy)]
pub struct SessionContext {
    /// Current identity state - read
    pub auth: ReadSignal<AuthState>,
    /// Current identity state - write
    set_auth: WriteSignal<AuthState>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (auth, set_auth) = signal(AuthState::Loading);
        Self { auth, set_auth }
    }

    /// Re-resolve the user from the session cookie.
    pub fn refresh(&self) {
        let set_auth = self.set_auth;
        set_auth.set(AuthState::Loading);
        spawn_local(async move {
            let state = AuthState::from_lookup(api::client().current_user().await);
            match &state {
                AuthState::Authenticated(user) => {
                    console::log(&format!("[SESSION] Signed in as {}", user.display_name()))
                }
                AuthState::Unavailable(message) => {
                    console::error(&format!("[SESSION] Failed to load user: {}", message))
                }
                _ => {}
            }
            set_auth.set(state);
        });
    }

    /// Clears the local identity, then ends the server session.
    pub fn logout(&self) {
        self.set_auth.set(AuthState::Anonymous);
        navigate(LOGOUT_PATH);
    }
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
