//! HTTP front end for cfblog
//!
//! Serves each blog post as a full HTML page, fetched through either the
//! GraphQL or the REST content path.

mod config;
mod error;

#[cfg(test)]
mod tests;

pub use config::ServerConfig;
pub use error::ServerError;

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use cfblog_client::{FetchOutcome, PostSource};
use cfblog_renderer::{page::render_post_page, render_post};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub graphql: Arc<dyn PostSource>,
    pub rest: Arc<dyn PostSource>,
}

/// Build the axum router with the blog and health routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/blog/graphql/{slug}", get(graphql_post))
        .route("/blog/rest/{slug}", get(rest_post))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn graphql_post(State(state): State<AppState>, Path(slug): Path<String>) -> impl IntoResponse {
    post_page(state.graphql.as_ref(), &slug).await
}

async fn rest_post(State(state): State<AppState>, Path(slug): Path<String>) -> impl IntoResponse {
    post_page(state.rest.as_ref(), &slug).await
}

/// Fetch and render one post. Failures still answer with the empty page shell.
async fn post_page(source: &dyn PostSource, slug: &str) -> (StatusCode, Html<String>) {
    let variant = source.variant();
    match source.fetch_outcome(slug).await {
        FetchOutcome::Found(post) => {
            let body = render_post(&post, variant);
            (
                StatusCode::OK,
                Html(render_post_page(Some(&post.title), &body)),
            )
        }
        FetchOutcome::NotFound => {
            info!(%variant, slug, "no blog post with this slug");
            (StatusCode::NOT_FOUND, Html(render_post_page(None, "")))
        }
        FetchOutcome::Failed(err) => {
            error!(%variant, slug, error = ?err, "failed to fetch blog post");
            (StatusCode::BAD_GATEWAY, Html(render_post_page(None, "")))
        }
    }
}

/// Run the HTTP server
pub async fn run(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.addr();
    let app = router(state);

    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr.as_str())
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|source| ServerError::Serve { source })?;

    Ok(())
}
