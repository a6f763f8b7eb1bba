//! Session Guard
//!
//! Decides what a protected page does for the current identity state.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::api::ApiError;
use crate::config::PortalConfig;
use crate::models::User;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const LOGOUT_PATH: &str = "/api/auth/logout";

#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// `/api/auth/me` has not answered yet
    Loading,
    Anonymous,
    Authenticated(User),
    /// The session endpoint failed for a reason other than 401
    Unavailable(String),
}

impl AuthState {
    /// Only a 401 means signed out; any other failure leaves the
    /// identity unknown.
    pub fn from_lookup(result: Result<User, ApiError>) -> Self {
        match result {
            Ok(user) => AuthState::Authenticated(user),
            Err(ApiError::Unauthenticated) => AuthState::Anonymous,
            Err(e) => AuthState::Unavailable(e.to_string()),
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// Show a placeholder; fetch nothing
    Wait,
    /// Leave the page for this URL
    Redirect(String),
    /// Identity could not be checked; show the error, stay on the page
    Failed(String),
    Render(User),
}

pub fn login_url(config: &PortalConfig) -> String {
    match &config.organization {
        Some(org) => format!("{}?organization={}", LOGIN_PATH, utf8_percent_encode(org, NON_ALPHANUMERIC)),
        None => LOGIN_PATH.to_string(),
    }
}

pub fn guard(state: &AuthState, config: &PortalConfig) -> GuardOutcome {
    match state {
        AuthState::Loading => GuardOutcome::Wait,
        AuthState::Anonymous => GuardOutcome::Redirect(login_url(config)),
        AuthState::Authenticated(user) => GuardOutcome::Render(user.clone()),
        AuthState::Unavailable(message) => GuardOutcome::Failed(message.clone()),
    }
}

/// Runs `fetch` only once a user is confirmed. Returns whether it ran.
pub fn load_when_authenticated<F: FnOnce(&User)>(state: &AuthState, fetch: F) -> bool {
    match state.user() {
        Some(user) => {
            fetch(user);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(org: Option<&str>) -> PortalConfig {
        PortalConfig::from_values(None, org)
    }

    #[test]
    fn test_login_url_carries_organization() {
        assert_eq!(login_url(&config(None)), "/api/auth/login");
        assert_eq!(login_url(&config(Some("org_abc"))), "/api/auth/login?organization=org%5Fabc");
    }

    #[test]
    fn test_guard_outcomes() {
        assert_eq!(guard(&AuthState::Loading, &config(None)), GuardOutcome::Wait);
        assert_eq!(
            guard(&AuthState::Anonymous, &config(Some("acme"))),
            GuardOutcome::Redirect("/api/auth/login?organization=acme".to_string())
        );
        let user = User { name: Some("Pat".into()), ..Default::default() };
        assert_eq!(guard(&AuthState::Authenticated(user.clone()), &config(None)), GuardOutcome::Render(user));
    }

    #[test]
    fn test_lookup_failure_is_not_a_sign_out() {
        assert_eq!(AuthState::from_lookup(Err(ApiError::Unauthenticated)), AuthState::Anonymous);

        let outage = AuthState::from_lookup(Err(ApiError::Status { status: 502, body: "Bad Gateway".into() }));
        assert_eq!(outage, AuthState::Unavailable("API returned 502: Bad Gateway".to_string()));
        assert_eq!(guard(&outage, &config(None)), GuardOutcome::Failed("API returned 502: Bad Gateway".to_string()));

        let offline = AuthState::from_lookup(Err(ApiError::Network("offline".into())));
        assert!(matches!(guard(&offline, &config(None)), GuardOutcome::Failed(_)));
        assert!(!load_when_authenticated(&offline, |_| panic!("fetched without a user")));

        let user = User { name: Some("Pat".into()), ..Default::default() };
        assert_eq!(AuthState::from_lookup(Ok(user.clone())), AuthState::Authenticated(user));
    }

    #[test]
    fn test_anonymous_dashboard_fetches_nothing() {
        let mut calls = 0;
        assert!(!load_when_authenticated(&AuthState::Anonymous, |_| calls += 1));
        assert!(!load_when_authenticated(&AuthState::Loading, |_| calls += 1));
        assert_eq!(calls, 0);

        assert!(load_when_authenticated(&AuthState::Authenticated(User::default()), |_| calls += 1));
        assert_eq!(calls, 1);
    }
}
