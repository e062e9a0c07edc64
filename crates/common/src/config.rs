//! Integration configuration table

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::env::{EnvSource, ProcessEnv};
use crate::error::{Error, Result};

/// An external service this system can connect to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Integration {
    Gmail,
    Github,
    Slack,
    Calendar,
    Zapier,
    Telegram,
    Monobank,
}

impl Integration {
    /// Every integration, in table order
    pub const ALL: [Integration; 7] = [
        Integration::Gmail,
        Integration::Github,
        Integration::Slack,
        Integration::Calendar,
        Integration::Zapier,
        Integration::Telegram,
        Integration::Monobank,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Integration::Gmail => "gmail",
            Integration::Github => "github",
            Integration::Slack => "slack",
            Integration::Calendar => "calendar",
            Integration::Zapier => "zapier",
            Integration::Telegram => "telegram",
            Integration::Monobank => "monobank",
        }
    }

    /// Prefix of the `<NAME>_ENABLED` variable
    pub fn env_prefix(self) -> &'static str {
        match self {
            Integration::Gmail => "GMAIL",
            Integration::Github => "GITHUB",
            Integration::Slack => "SLACK",
            Integration::Calendar => "CALENDAR",
            Integration::Zapier => "ZAPIER",
            Integration::Telegram => "TELEGRAM",
            Integration::Monobank => "MONOBANK",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Where each field of this integration's record comes from
    fn source(self) -> Source {
        match self {
            Integration::Gmail => Source {
                api_key: "GMAIL_API_KEY",
                api_secret: None,
                webhook_url: None,
                base_url: "https://www.googleapis.com/gmail/v1",
                timeout_ms: Some(30_000),
                retry_attempts: Some(3),
            },
            Integration::Github => Source {
                api_key: "GITHUB_TOKEN",
                api_secret: None,
                webhook_url: None,
                base_url: "https://api.github.com",
                timeout_ms: Some(30_000),
                retry_attempts: None,
            },
            Integration::Slack => Source {
                api_key: "SLACK_BOT_TOKEN",
                api_secret: Some("SLACK_SIGNING_SECRET"),
                webhook_url: Some("SLACK_WEBHOOK_URL"),
                base_url: "https://slack.com/api",
                timeout_ms: None,
                retry_attempts: None,
            },
            Integration::Calendar => Source {
                api_key: "CALENDAR_API_KEY",
                api_secret: None,
                webhook_url: None,
                base_url: "https://www.googleapis.com/calendar/v3",
                timeout_ms: None,
                retry_attempts: None,
            },
            Integration::Zapier => Source {
                api_key: "ZAPIER_API_KEY",
                api_secret: None,
                webhook_url: Some("ZAPIER_WEBHOOK_URL"),
                base_url: "https://hooks.zapier.com",
                timeout_ms: None,
                retry_attempts: None,
            },
            Integration::Telegram => Source {
                api_key: "TELEGRAM_BOT_TOKEN",
                api_secret: None,
                webhook_url: Some("TELEGRAM_WEBHOOK_URL"),
                base_url: "https://api.telegram.org",
                timeout_ms: None,
                retry_attempts: None,
            },
            Integration::Monobank => Source {
                api_key: "MONOBANK_API_TOKEN",
                api_secret: None,
                webhook_url: None,
                base_url: "https://api.monobank.ua",
                timeout_ms: None,
                retry_attempts: None,
            },
        }
    }
}

impl fmt::Display for Integration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Integration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Integration::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| Error::UnknownIntegration(s.to_string()))
    }
}

/// Variable names and literal defaults for one integration
struct Source {
    api_key: &'static str,
    api_secret: Option<&'static str>,
    webhook_url: Option<&'static str>,
    base_url: &'static str,
    timeout_ms: Option<u64>,
    retry_attempts: Option<u32>,
}

/// Connection parameters for a single integration
#[derive(Clone, PartialEq, Eq)]
pub struct IntegrationConfig {
    pub enabled: bool,
    pub api_key: Option<String>,
    /// Only slack carries a second secret (its signing secret)
    pub api_secret: Option<String>,
    pub base_url: Option<String>,
    /// Endpoint the external service pushes inbound events to
    pub webhook_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub retry_attempts: Option<u32>,
    /// Reserved; no integration sets it
    pub retry_delay_ms: Option<u64>,
}

impl IntegrationConfig {
    fn load(integration: Integration, env: &impl EnvSource) -> Self {
        let source = integration.source();
        let enabled_var = format!("{}_ENABLED", integration.env_prefix());

        Self {
            enabled: env.var(&enabled_var).as_deref() == Some("true"),
            api_key: env.var(source.api_key),
            api_secret: source.api_secret.and_then(|key| env.var(key)),
            base_url: Some(source.base_url.to_string()),
            webhook_url: source.webhook_url.and_then(|key| env.var(key)),
            timeout_ms: source.timeout_ms,
            retry_attempts: source.retry_attempts,
            retry_delay_ms: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn retry_delay(&self) -> Option<Duration> {
        self.retry_delay_ms.map(Duration::from_millis)
    }

    /// Enabled and holding an API key, i.e. a client can be built from it
    pub fn is_ready(&self) -> bool {
        self.enabled && self.api_key.is_some()
    }

    /// Redacted view, safe to log or print
    pub fn status(&self, integration: Integration) -> IntegrationStatus {
        IntegrationStatus {
            integration,
            enabled: self.enabled,
            has_api_key: self.api_key.is_some(),
            has_api_secret: self.api_secret.is_some(),
            base_url: self.base_url.clone(),
            webhook_url: self.webhook_url.clone(),
            timeout_ms: self.timeout_ms,
            retry_attempts: self.retry_attempts,
            retry_delay_ms: self.retry_delay_ms,
        }
    }
}

fn redact(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| "<redacted>")
}

impl fmt::Debug for IntegrationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegrationConfig")
            .field("enabled", &self.enabled)
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .field("base_url", &self.base_url)
            .field("webhook_url", &self.webhook_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("retry_attempts", &self.retry_attempts)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .finish()
    }
}

/// Integration config with secrets reduced to presence flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrationStatus {
    pub integration: Integration,
    pub enabled: bool,
    pub has_api_key: bool,
    pub has_api_secret: bool,
    pub base_url: Option<String>,
    pub webhook_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

/// One record per integration, built once and never mutated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationsConfig {
    entries: [IntegrationConfig; 7],
}

impl IntegrationsConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_source(&ProcessEnv)
    }

    /// Load configuration from an arbitrary variable source
    ///
    /// Never fails: unset variables leave the flag `false` and optional
    /// fields `None`.
    pub fn from_source(env: &impl EnvSource) -> Self {
        let entries = Integration::ALL.map(|integration| {
            let config = IntegrationConfig::load(integration, env);
            debug!(
                integration = %integration,
                enabled = config.enabled,
                has_api_key = config.api_key.is_some(),
                "Loaded integration config"
            );
            if config.enabled && config.api_key.is_none() {
                warn!(
                    "Integration {} is enabled but {} is not set",
                    integration,
                    integration.source().api_key
                );
            }
            config
        });

        let table = Self { entries };
        info!(
            "🔌 {} of {} integrations enabled",
            table.enabled().count(),
            Integration::ALL.len()
        );
        table
    }

    pub fn get(&self, integration: Integration) -> &IntegrationConfig {
        &self.entries[integration.index()]
    }

    /// Look up a record by its lowercase identifier
    pub fn lookup(&self, name: &str) -> Result<&IntegrationConfig> {
        let integration: Integration = name.parse()?;
        Ok(self.get(integration))
    }

    /// All records in table order
    pub fn iter(&self) -> impl Iterator<Item = (Integration, &IntegrationConfig)> + '_ {
        Integration::ALL
            .into_iter()
            .map(move |integration| (integration, self.get(integration)))
    }

    /// Only the records whose flag is set
    pub fn enabled(&self) -> impl Iterator<Item = (Integration, &IntegrationConfig)> + '_ {
        self.iter().filter(|(_, config)| config.enabled)
    }

    pub fn gmail(&self) -> &IntegrationConfig {
        self.get(Integration::Gmail)
    }

    pub fn github(&self) -> &IntegrationConfig {
        self.get(Integration::Github)
    }

    pub fn slack(&self) -> &IntegrationConfig {
        self.get(Integration::Slack)
    }

    pub fn calendar(&self) -> &IntegrationConfig {
        self.get(Integration::Calendar)
    }

    pub fn zapier(&self) -> &IntegrationConfig {
        self.get(Integration::Zapier)
    }

    pub fn telegram(&self) -> &IntegrationConfig {
        self.get(Integration::Telegram)
    }

    pub fn monobank(&self) -> &IntegrationConfig {
        self.get(Integration::Monobank)
    }
}

static INTEGRATIONS: OnceLock<IntegrationsConfig> = OnceLock::new();

/// Process-wide table, read from the environment on first access
///
/// Later changes to the environment are not picked up.
pub fn integrations() -> &'static IntegrationsConfig {
    INTEGRATIONS.get_or_init(IntegrationsConfig::from_env)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
