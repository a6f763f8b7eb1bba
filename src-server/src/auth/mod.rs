//! Authentication
//!
//! Login sessions against the OIDC provider and bearer checks for the API.

mod session;
mod provider;
mod verifier;
mod extractor;
pub mod routes;

pub use session::{purge_loop, Session, SessionStore, UserProfile};
pub use provider::{IdentityProvider, LoginOptions};
pub use verifier::{Claims, JwksVerifier, SessionVerifier, TokenVerifier};
pub use extractor::AuthenticatedUser;
pub use routes::SESSION_COOKIE;
