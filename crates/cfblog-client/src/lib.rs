//! Content API clients for cfblog
//!
//! [`GraphQlClient`] and [`RestClient`] both implement [`PostSource`]: look a
//! post up by slug and hand back a [`Post`](cfblog_common::Post) ready for the
//! renderer, `None` when nothing matches, or a [`FetchError`].

mod error;
pub mod graphql;
mod http;
pub mod rest;
mod source;

pub use error::FetchError;
pub use graphql::GraphQlClient;
pub use http::build_http_client;
pub use rest::RestClient;
pub use source::{FetchOutcome, PostSource};

use std::sync::Arc;

use cfblog_common::{ContentVariant, ContentfulConfig};

/// Build the client for `variant`, sharing one HTTP connection pool.
pub fn source_for(
    variant: ContentVariant,
    config: &ContentfulConfig,
    http: reqwest::Client,
) -> Result<Arc<dyn PostSource>, FetchError> {
    let source: Arc<dyn PostSource> = match variant {
        ContentVariant::GraphQl => Arc::new(GraphQlClient::with_http(config, http)?),
        ContentVariant::Rest => Arc::new(RestClient::with_http(config, http)?),
    };
    Ok(source)
}
