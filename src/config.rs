use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::api::client::DEFAULT_API_URL;
use crate::api::pacer;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy, so a local
/// setup only needs `EVENTINTEL_API_URL` there if the backend isn't on the
/// default port.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the event intelligence backend
    pub api_url: String,
    /// Default `max_results` for event discovery
    pub max_events: u32,
    /// Default `max_results` for attendee discovery
    pub max_attendees: u32,
    /// Optional client-side limit on API calls per second
    pub max_qps: Option<f64>,
    /// Where `export` writes the markdown report
    pub report_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables. Every value has a default.
    pub fn load() -> Result<Self> {
        Ok(Self {
            api_url: env::var("EVENTINTEL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            max_events: parse_var("EVENTINTEL_MAX_EVENTS")?.unwrap_or(10),
            max_attendees: parse_var("EVENTINTEL_MAX_ATTENDEES")?.unwrap_or(20),
            max_qps: checked_rate(parse_var("EVENTINTEL_MAX_QPS")?)?,
            report_path: env::var("EVENTINTEL_REPORT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("output/eventintel-report.md")),
        })
    }

    /// Check that the backend URL is usable.
    /// Call this before building the API client.
    pub fn require_api_url(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            anyhow::bail!(
                "EVENTINTEL_API_URL is empty. Set it in your .env file \
                 (e.g. EVENTINTEL_API_URL={DEFAULT_API_URL})."
            );
        }
        reqwest::Url::parse(&self.api_url)
            .with_context(|| format!("EVENTINTEL_API_URL is not a valid URL: {}", self.api_url))?;
        Ok(())
    }
}

/// A rate of zero turns pacing off; unusable rates fail at startup.
fn checked_rate(max_qps: Option<f64>) -> Result<Option<f64>> {
    let Some(qps) = max_qps else {
        return Ok(None);
    };
    let interval = pacer::min_interval(qps).context("EVENTINTEL_MAX_QPS is not a usable rate")?;
    Ok((!interval.is_zero()).then_some(qps))
}

/// Parse an optional environment variable, failing loudly on garbage.
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{name} must be a number, got '{raw}'")),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_url(url: &str) -> Config {
        Config {
            api_url: url.to_string(),
            max_events: 10,
            max_attendees: 20,
            max_qps: None,
            report_path: PathBuf::from("report.md"),
        }
    }

    #[test]
    fn default_url_is_valid() {
        assert!(config_with_url(DEFAULT_API_URL).require_api_url().is_ok());
    }

    #[test]
    fn pacing_rate_is_checked_at_load() {
        assert_eq!(checked_rate(None).unwrap(), None);
        assert_eq!(checked_rate(Some(0.0)).unwrap(), None);
        assert_eq!(checked_rate(Some(2.0)).unwrap(), Some(2.0));

        let err = checked_rate(Some(1e-30)).unwrap_err();
        assert!(format!("{err:#}").contains("EVENTINTEL_MAX_QPS"));
        assert!(checked_rate(Some(-3.0)).is_err());
    }

    #[test]
    fn empty_or_malformed_url_is_rejected() {
        assert!(config_with_url("").require_api_url().is_err());
        assert!(config_with_url("not a url").require_api_url().is_err());
    }
}
