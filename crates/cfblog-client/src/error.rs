use cfblog_common::ConfigError;
use miette::Diagnostic;
use thiserror::Error;

/// Errors fetching a post from the content API
#[derive(Debug, Error, Diagnostic)]
pub enum FetchError {
    #[error("failed to build HTTP client")]
    #[diagnostic(code(fetch::client_build))]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed")]
    #[diagnostic(
        code(fetch::transport),
        help("check network access to the content API host")
    )]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("content API returned {status} for {url}: {body}")]
    #[diagnostic(
        code(fetch::status),
        help("401/404 usually mean CONTENTFUL_SPACE_ID, CONTENTFUL_ENV_ID or CONTENTFUL_DELIVERY_KEY is missing or wrong")
    )]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("GraphQL query failed: {}", messages.join("; "))]
    #[diagnostic(code(fetch::graphql))]
    GraphQl { messages: Vec<String> },

    #[error("failed to decode content API response: {message}")]
    #[diagnostic(code(fetch::decode))]
    Decode { message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

impl FetchError {
    pub(crate) fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}
