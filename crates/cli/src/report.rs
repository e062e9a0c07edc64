//! Rendering of the integration table

use anyhow::{bail, Result};
use common::{Integration, IntegrationStatus, IntegrationsConfig};

/// Parsed command line
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub json: bool,
    pub only: Option<Integration>,
}

impl Args {
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Args::default();
        for arg in args {
            match arg.as_ref() {
                "--json" => parsed.json = true,
                flag if flag.starts_with('-') => bail!("Unknown flag: {}", flag),
                name => {
                    if parsed.only.is_some() {
                        bail!("Only one integration name may be given");
                    }
                    parsed.only = Some(name.parse()?);
                }
            }
        }
        Ok(parsed)
    }
}

/// Statuses selected by `args`, in table order
pub fn select(table: &IntegrationsConfig, args: &Args) -> Vec<IntegrationStatus> {
    table
        .iter()
        .filter(|(integration, _)| args.only.map_or(true, |only| only == *integration))
        .map(|(integration, config)| config.status(integration))
        .collect()
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn mark(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// One line per integration
pub fn render_text(statuses: &[IntegrationStatus]) -> String {
    let mut out = String::new();
    for status in statuses {
        out.push_str(&format!(
            "{:<9} enabled={:<3} key={:<3} secret={:<3} base={} webhook={} timeout_ms={} retries={}\n",
            status.integration.as_str(),
            mark(status.enabled),
            mark(status.has_api_key),
            mark(status.has_api_secret),
            opt(status.base_url.as_deref()),
            opt(status.webhook_url.as_deref()),
            opt(status.timeout_ms),
            opt(status.retry_attempts),
        ));
    }
    out
}

pub fn render_json(statuses: &[IntegrationStatus]) -> Result<String> {
    Ok(serde_json::to_string_pretty(statuses)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn table(vars: &[(&str, &str)]) -> IntegrationsConfig {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        IntegrationsConfig::from_source(&env)
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(Args::parse(Vec::<String>::new()).unwrap(), Args::default());

        let args = Args::parse(["slack", "--json"]).unwrap();
        assert!(args.json);
        assert_eq!(args.only, Some(Integration::Slack));
    }

    #[test]
    fn test_parse_rejects_unknown_input() {
        assert!(Args::parse(["jira"]).is_err());
        assert!(Args::parse(["--yaml"]).is_err());
        assert!(Args::parse(["gmail", "github"]).is_err());
    }

    #[test]
    fn test_select_filters_single_integration() {
        let table = table(&[]);

        assert_eq!(select(&table, &Args::default()).len(), 7);

        let args = Args {
            json: false,
            only: Some(Integration::Telegram),
        };
        let statuses = select(&table, &args);
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].integration, Integration::Telegram);
    }

    #[test]
    fn test_text_report_never_shows_secrets() {
        let table = table(&[
            ("GITHUB_ENABLED", "true"),
            ("GITHUB_TOKEN", "ghp_secret"),
        ]);
        let text = render_text(&select(&table, &Args::default()));

        assert_eq!(text.lines().count(), 7);
        assert!(text.starts_with("gmail"));
        assert!(text.contains("https://api.github.com"));
        assert!(!text.contains("ghp_secret"));
    }

    #[test]
    fn test_json_report() {
        let table = table(&[("SLACK_WEBHOOK_URL", "https://hooks.example/abc")]);
        let args = Args {
            json: true,
            only: Some(Integration::Slack),
        };
        let json = render_json(&select(&table, &args)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["integration"], "slack");
        assert_eq!(value[0]["webhook_url"], "https://hooks.example/abc");
        assert_eq!(value[0]["timeout_ms"], serde_json::Value::Null);
    }
}
