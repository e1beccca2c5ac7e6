use std::time::Duration;

use tracing::warn;
use url::Url;

use crate::error::ConfigError;

/// Content delivery API configuration shared by both content paths
#[derive(Debug, Clone)]
pub struct ContentfulConfig {
    pub space_id: String,
    pub environment_id: String,
    /// Read-only token for published content
    pub delivery_token: String,
    pub graphql_host: Url,
    pub cdn_host: Url,
    /// Per-request timeout for outbound calls. `None` leaves it to the network stack.
    pub timeout: Option<Duration>,
}

impl ContentfulConfig {
    pub const DEFAULT_GRAPHQL_HOST: &'static str = "https://graphql.contentful.com";
    pub const DEFAULT_CDN_HOST: &'static str = "https://cdn.contentful.com";

    /// Build a config against the public delivery hosts.
    pub fn new(
        space_id: impl Into<String>,
        environment_id: impl Into<String>,
        delivery_token: impl Into<String>,
    ) -> Self {
        Self {
            space_id: space_id.into(),
            environment_id: environment_id.into(),
            delivery_token: delivery_token.into(),
            graphql_host: Url::parse(Self::DEFAULT_GRAPHQL_HOST).expect("valid default host"),
            cdn_host: Url::parse(Self::DEFAULT_CDN_HOST).expect("valid default host"),
            timeout: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Credential env vars (missing ones are logged, and the outbound call fails later):
    /// - `CONTENTFUL_SPACE_ID`
    /// - `CONTENTFUL_ENV_ID`
    /// - `CONTENTFUL_DELIVERY_KEY`
    ///
    /// Optional env vars:
    /// - `CONTENTFUL_GRAPHQL_HOST`: GraphQL host (default: https://graphql.contentful.com)
    /// - `CONTENTFUL_CDN_HOST`: REST delivery host (default: https://cdn.contentful.com)
    /// - `CFBLOG_HTTP_TIMEOUT_SECS`: outbound request timeout in seconds (default: none)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = |var: &'static str| {
            lookup(var).filter(|v| !v.is_empty()).unwrap_or_else(|| {
                warn!(var, "content API credential not set, requests will fail");
                String::new()
            })
        };

        let space_id = credential("CONTENTFUL_SPACE_ID");
        let environment_id = credential("CONTENTFUL_ENV_ID");
        let delivery_token = credential("CONTENTFUL_DELIVERY_KEY");

        let graphql_host = parse_host(
            lookup("CONTENTFUL_GRAPHQL_HOST")
                .unwrap_or_else(|| Self::DEFAULT_GRAPHQL_HOST.to_string()),
        )?;
        let cdn_host = parse_host(
            lookup("CONTENTFUL_CDN_HOST").unwrap_or_else(|| Self::DEFAULT_CDN_HOST.to_string()),
        )?;

        let timeout = match lookup("CFBLOG_HTTP_TIMEOUT_SECS") {
            Some(value) => {
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidNumber {
                        var: "CFBLOG_HTTP_TIMEOUT_SECS",
                        value,
                    })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            space_id,
            environment_id,
            delivery_token,
            graphql_host,
            cdn_host,
            timeout,
        })
    }

    /// `{graphql_host}/content/v1/spaces/{space}/environments/{env}`
    pub fn graphql_endpoint(&self) -> Result<Url, ConfigError> {
        with_segments(
            &self.graphql_host,
            &[
                "content",
                "v1",
                "spaces",
                &self.space_id,
                "environments",
                &self.environment_id,
            ],
        )
    }

    /// `{cdn_host}/spaces/{space}/environments/{env}/entries`
    pub fn entries_endpoint(&self) -> Result<Url, ConfigError> {
        with_segments(
            &self.cdn_host,
            &[
                "spaces",
                &self.space_id,
                "environments",
                &self.environment_id,
                "entries",
            ],
        )
    }
}

fn parse_host(raw: String) -> Result<Url, ConfigError> {
    Url::parse(&raw).map_err(|e| ConfigError::UrlParse {
        url: raw,
        message: e.to_string(),
    })
}

fn with_segments(base: &Url, segments: &[&str]) -> Result<Url, ConfigError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ConfigError::UrlBase {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
