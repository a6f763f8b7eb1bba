//! Server configuration
//!
//! Settings come from CLI flags, each backed by an environment variable.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Identity provider (OIDC tenant) settings
#[derive(Debug, Clone, Default)]
pub struct IdentityConfig {
    /// Tenant host, e.g. `example.us.auth0.com`
    pub domain: String,
    pub client_id: String,
    pub client_secret: String,
    /// When set, bearer tokens are verified as RS256 JWTs for this audience.
    pub audience: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub database: PathBuf,
    /// Built client (index.html + wasm bundle)
    pub static_dir: PathBuf,
    pub research_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Externally visible origin, used for the login callback and logout return
    pub public_url: String,
    pub seed: Option<PathBuf>,
    pub session_ttl: Duration,
    /// Extra allowed CORS origin, or `*` for any
    pub cors_origin: Option<String>,
    pub identity: IdentityConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
            database: PathBuf::from("portal.db"),
            static_dir: PathBuf::from("dist"),
            research_dir: PathBuf::from("public/research"),
            log_dir: PathBuf::from("logs"),
            public_url: "http://localhost:8000".to_string(),
            seed: None,
            session_ttl: Duration::from_secs(24 * 3600),
            cors_origin: None,
            identity: IdentityConfig::default(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "portal-server")]
#[command(about = "Project portal backend", long_about = None)]
pub struct Cli {
    #[arg(long, env = "PORTAL_BIND")]
    pub bind: Option<SocketAddr>,

    /// SQLite database file
    #[arg(long, env = "PORTAL_DATABASE")]
    pub database: Option<PathBuf>,

    #[arg(long, env = "PORTAL_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    #[arg(long, env = "PORTAL_RESEARCH_DIR")]
    pub research_dir: Option<PathBuf>,

    #[arg(long, env = "PORTAL_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[arg(long, env = "PORTAL_PUBLIC_URL")]
    pub public_url: Option<String>,

    /// JSON seed applied to empty tables at startup
    #[arg(long, env = "PORTAL_SEED")]
    pub seed: Option<PathBuf>,

    #[arg(long, env = "PORTAL_SESSION_TTL_SECS")]
    pub session_ttl_secs: Option<u64>,

    #[arg(long, env = "CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    #[arg(long, env = "AUTH0_DOMAIN")]
    pub auth0_domain: Option<String>,

    #[arg(long, env = "AUTH0_CLIENT_ID")]
    pub auth0_client_id: Option<String>,

    #[arg(long, env = "AUTH0_CLIENT_SECRET")]
    pub auth0_client_secret: Option<String>,

    #[arg(long, env = "AUTH0_AUDIENCE")]
    pub auth0_audience: Option<String>,
}

impl Config {
    /// Load configuration from CLI args and environment
    pub fn from_env() -> Result<Self> {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> Result<Self> {
        let mut config = Self::default();

        if let Some(bind) = cli.bind {
            config.bind = bind;
        }
        if let Some(database) = cli.database {
            config.database = database;
        }
        if let Some(static_dir) = cli.static_dir {
            config.static_dir = static_dir;
        }
        if let Some(research_dir) = cli.research_dir {
            config.research_dir = research_dir;
        }
        if let Some(log_dir) = cli.log_dir {
            config.log_dir = log_dir;
        }
        if let Some(public_url) = cli.public_url {
            config.public_url = public_url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = cli.session_ttl_secs {
            config.session_ttl = Duration::from_secs(secs);
        }
        config.seed = cli.seed;
        config.cors_origin = cli.cors_origin.filter(|o| !o.is_empty());

        config.identity = IdentityConfig {
            domain: cli.auth0_domain.unwrap_or_default(),
            client_id: cli.auth0_client_id.unwrap_or_default(),
            client_secret: cli.auth0_client_secret.unwrap_or_default(),
            audience: cli.auth0_audience.filter(|a| !a.is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.identity.domain.trim().is_empty() {
            anyhow::bail!("AUTH0_DOMAIN must be set");
        }
        if self.identity.client_id.trim().is_empty() {
            anyhow::bail!("AUTH0_CLIENT_ID must be set");
        }
        if self.identity.client_secret.is_empty() {
            tracing::warn!("AUTH0_CLIENT_SECRET is empty; code exchange will fail");
        }
        if self.session_ttl.is_zero() {
            anyhow::bail!("session ttl must be greater than 0");
        }
        Ok(())
    }

    /// Where the identity provider sends the browser after login.
    pub fn callback_url(&self) -> String {
        format!("{}/api/auth/callback", self.public_url)
    }
}
