//! Client Configuration
//!
//! Values baked in at build time (`PORTAL_API_URL=... trunk build`).

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortalConfig {
    /// Backend origin prepended to API paths; empty means same origin.
    pub api_base_url: String,
    /// Identity provider organization passed to the login endpoint
    pub organization: Option<String>,
}

impl PortalConfig {
    pub fn from_env() -> Self {
        Self::from_values(option_env!("PORTAL_API_URL"), option_env!("PORTAL_AUTH_ORGANIZATION"))
    }

    pub fn from_values(api_base_url: Option<&str>, organization: Option<&str>) -> Self {
        Self {
            api_base_url: api_base_url.unwrap_or_default().trim_end_matches('/').to_string(),
            organization: organization.map(str::trim).filter(|o| !o.is_empty()).map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_same_origin() {
        let config = PortalConfig::from_values(None, None);
        assert_eq!(config.api_base_url, "");
        assert_eq!(config.organization, None);
    }

    #[test]
    fn test_trims_values() {
        let config = PortalConfig::from_values(Some("http://localhost:8000/"), Some("  "));
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.organization, None);
    }
}
