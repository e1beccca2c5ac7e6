use cfblog_common::ContentfulConfig;

use crate::error::FetchError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build the shared HTTP client. Connection pooling is reqwest's own.
pub fn build_http_client(config: &ContentfulConfig) -> Result<reqwest::Client, FetchError> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|source| FetchError::ClientBuild { source })
}

/// Send `request` and return the body text of a 2xx response.
pub(crate) async fn send(
    http: &reqwest::Client,
    request: reqwest::Request,
) -> Result<String, FetchError> {
    let url = request.url().to_string();
    let response = http
        .execute(request)
        .await
        .map_err(|source| FetchError::Transport {
            url: url.clone(),
            source,
        })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.clone(),
            source,
        })?;

    if !status.is_success() {
        return Err(FetchError::Status {
            url,
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}
