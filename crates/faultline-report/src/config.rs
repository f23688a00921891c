//! Reporting configuration
//!
//! Settings are built with `with_*` methods or read from `FAULTLINE_*`
//! environment variables. A process may install one configuration globally.

use crate::dsn::Dsn;
use crate::error::{ReportError, ReportResult};
use once_cell::sync::OnceCell;
use serde_json::{Map, Value};

/// Logger name used when none is configured
pub const DEFAULT_LOGGER: &str = "root";

static GLOBAL_CONFIG: OnceCell<ReportConfig> = OnceCell::new();

/// Settings applied to every reported event
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Monitoring service endpoint; events are only logged when unset
    pub dsn: Option<Dsn>,
    /// Deployment environment, e.g. `production`
    pub environment: Option<String>,
    pub release: Option<String>,
    pub server_name: Option<String>,
    /// Logger name, also the first fingerprint component
    pub logger: String,
    /// Tags added to every event, in insertion order
    pub tags: Vec<(String, String)>,
    /// Extra data added to every event
    pub default_extra: Map<String, Value>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            release: None,
            server_name: None,
            logger: DEFAULT_LOGGER.to_string(),
            tags: Vec::new(),
            default_extra: Map::new(),
        }
    }
}

impl ReportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from the process environment
    pub fn from_env() -> ReportResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`.
    ///
    /// `FAULTLINE_DSN` takes precedence over `SENTRY_DSN`. Empty values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> ReportResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dsn) = get("FAULTLINE_DSN").or_else(|| get("SENTRY_DSN")) {
            config.dsn = Some(Dsn::parse(&dsn)?);
        }
        config.environment = get("FAULTLINE_ENVIRONMENT");
        config.release = get("FAULTLINE_RELEASE");
        config.server_name = get("FAULTLINE_SERVER_NAME");
        if let Some(logger) = get("FAULTLINE_LOGGER") {
            config.logger = logger;
        }

        tracing::debug!(
            has_dsn = config.dsn.is_some(),
            environment = ?config.environment,
            "Loaded reporting configuration from environment"
        );
        Ok(config)
    }

    pub fn with_dsn(mut self, dsn: Dsn) -> Self {
        self.dsn = Some(dsn);
        self
    }

    /// Parse and set the DSN
    pub fn with_dsn_str(self, dsn: &str) -> ReportResult<Self> {
        Ok(self.with_dsn(Dsn::parse(dsn)?))
    }

    pub fn with_env(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_release(mut self, release: impl Into<String>) -> Self {
        self.release = Some(release.into());
        self
    }

    pub fn with_server_name(mut self, server_name: impl Into<String>) -> Self {
        self.server_name = Some(server_name.into());
        self
    }

    pub fn with_logger(mut self, logger: impl Into<String>) -> Self {
        self.logger = logger.into();
        self
    }

    /// Add a tag, replacing an earlier tag with the same key
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.tags.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.tags.push((key, value)),
        }
        self
    }

    pub fn with_tags<K, V>(self, tags: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        tags.into_iter()
            .fold(self, |config, (k, v)| config.with_tag(k, v))
    }

    pub fn with_default_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.default_extra.insert(key.into(), value.into());
        self
    }

    /// Install this configuration for the whole process.
    ///
    /// Only the first call succeeds.
    pub fn install_global(self) -> ReportResult<()> {
        GLOBAL_CONFIG
            .set(self)
            .map_err(|_| ReportError::AlreadyConfigured)?;
        tracing::info!("Installed global reporting configuration");
        Ok(())
    }
}

/// The globally installed configuration, if any
pub fn global() -> Option<&'static ReportConfig> {
    GLOBAL_CONFIG.get()
}
