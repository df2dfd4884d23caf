use crate::errors::LookupError;
use std::time::Duration;
use url::Url;

/// Upstream lookup service.
pub const DEFAULT_BASE_URL: &str = "https://lookup.binlist.net";
/// Per-request timeout used unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// How long an idle pooled connection is kept.
pub const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Settings for the HTTP transport behind a `BinLookupClient`.
///
/// Read-only once a client is built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub pool_idle_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
            pool_max_idle_per_host: usize::MAX,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_pool_idle_timeout(mut self, idle: Duration) -> Self {
        self.pool_idle_timeout = idle;
        self
    }

    pub fn with_pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Base URL without a trailing slash, so `<base>/<bin>` never doubles it.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Check the settings a client cannot work without.
    pub fn validate(&self) -> Result<(), LookupError> {
        self.validate_base_url()?;
        if self.timeout.is_zero() {
            return Err(LookupError::Config("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }

    /// Check that `base_url` is an absolute http(s) URL.
    pub fn validate_base_url(&self) -> Result<(), LookupError> {
        let url = Url::parse(self.normalized_base_url()).map_err(|e| {
            LookupError::Config(format!("base URL {:?} is not a valid URL: {}", self.base_url, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(LookupError::Config(format!(
                "base URL must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Load settings from the environment (and `.env`), falling back to defaults.
    ///
    /// Recognized variables: `BINLOOKUP_BASE_URL`, `BINLOOKUP_TIMEOUT_SECS`,
    /// `BINLOOKUP_POOL_IDLE_TIMEOUT_SECS`, `BINLOOKUP_POOL_MAX_IDLE_PER_HOST`,
    /// `BINLOOKUP_USER_AGENT`.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let config = Self {
            base_url: var("BINLOOKUP_BASE_URL")
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("BINLOOKUP_BASE_URL must start with http:// or https://");
                    }
                    Ok(url)
                })
                .transpose()?
                .unwrap_or(defaults.base_url),
            timeout: var("BINLOOKUP_TIMEOUT_SECS")
                .map(|secs| {
                    let secs: u64 = secs.trim().parse().map_err(|_| {
                        anyhow::anyhow!("BINLOOKUP_TIMEOUT_SECS must be a whole number of seconds")
                    })?;
                    if secs == 0 {
                        anyhow::bail!("BINLOOKUP_TIMEOUT_SECS must be greater than zero");
                    }
                    Ok(Duration::from_secs(secs))
                })
                .transpose()?
                .unwrap_or(defaults.timeout),
            pool_idle_timeout: var("BINLOOKUP_POOL_IDLE_TIMEOUT_SECS")
                .map(|secs| {
                    secs.trim().parse().map(Duration::from_secs).map_err(|_| {
                        anyhow::anyhow!(
                            "BINLOOKUP_POOL_IDLE_TIMEOUT_SECS must be a whole number of seconds"
                        )
                    })
                })
                .transpose()?
                .unwrap_or(defaults.pool_idle_timeout),
            pool_max_idle_per_host: var("BINLOOKUP_POOL_MAX_IDLE_PER_HOST")
                .map(|max| {
                    max.trim().parse().map_err(|_| {
                        anyhow::anyhow!("BINLOOKUP_POOL_MAX_IDLE_PER_HOST must be a valid number")
                    })
                })
                .transpose()?
                .unwrap_or(defaults.pool_max_idle_per_host),
            user_agent: var("BINLOOKUP_USER_AGENT").unwrap_or(defaults.user_agent),
        };

        config.validate()?;

        tracing::info!("BIN lookup configuration loaded");
        tracing::debug!("Base URL: {}", config.base_url);
        tracing::debug!("Timeout: {:?}", config.timeout);

        Ok(config)
    }
}
