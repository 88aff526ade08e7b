//! Client configuration

use std::time::Duration;

/// Which staff role a feed serves - determines the default poll cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedRole {
    /// Cashier terminal, shortest interval
    #[default]
    Cashier,
    /// Admin dashboard
    Admin,
    /// Customer menu (reference data only)
    Menu,
}

/// Client configuration for connecting to the backend gateway
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// API key for the hosted backend, sent as a bearer token
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Poll interval for cashier feeds
    pub cashier_refresh: Duration,

    /// Poll interval for admin feeds
    pub admin_refresh: Duration,

    /// Poll interval for customer menu reference data
    pub menu_refresh: Duration,

    /// Whether alert sounds are enabled
    pub sound_enabled: bool,
}

impl ClientConfig {
    /// Create a new configuration with defaults
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: 30,
            cashier_refresh: Duration::from_secs(30),
            admin_refresh: Duration::from_secs(60),
            menu_refresh: Duration::from_secs(300),
            sound_enabled: true,
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the poll interval for a role
    pub fn with_refresh(mut self, role: FeedRole, interval: Duration) -> Self {
        match role {
            FeedRole::Cashier => self.cashier_refresh = interval,
            FeedRole::Admin => self.admin_refresh = interval,
            FeedRole::Menu => self.menu_refresh = interval,
        }
        self
    }

    /// Enable or disable alert sounds
    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    /// Poll interval for the given role
    pub fn refresh_interval(&self, role: FeedRole) -> Duration {
        match role {
            FeedRole::Cashier => self.cashier_refresh,
            FeedRole::Admin => self.admin_refresh,
            FeedRole::Menu => self.menu_refresh,
        }
    }

    /// Create an HTTP gateway from this configuration
    pub fn build_http_gateway(&self) -> crate::gateway::HttpGateway {
        crate::gateway::HttpGateway::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
