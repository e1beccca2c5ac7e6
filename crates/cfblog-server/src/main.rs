use std::sync::Arc;

use cfblog_client::{GraphQlClient, RestClient, build_http_client};
use cfblog_common::ContentfulConfig;
use cfblog_common::telemetry::{self, TelemetryConfig};
use cfblog_server::{AppState, ServerConfig};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "cfblog-server")]
#[command(about = "Serve Contentful blog posts as HTML")]
struct Args {
    /// Address to listen on (overrides SERVER_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides SERVER_PORT)
    #[arg(long, short)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    dotenvy::dotenv().ok();

    telemetry::init(TelemetryConfig::from_env("cfblog-server"));

    let args = Args::parse();
    let mut server_config = ServerConfig::from_env();
    if let Some(host) = args.host {
        server_config.host = host;
    }
    if let Some(port) = args.port {
        server_config.port = port;
    }

    let contentful = ContentfulConfig::from_env()?;
    info!(
        space = %contentful.space_id,
        environment = %contentful.environment_id,
        graphql = %contentful.graphql_host,
        cdn = %contentful.cdn_host,
        "content API configured"
    );

    let http = build_http_client(&contentful)?;
    let state = AppState {
        graphql: Arc::new(GraphQlClient::with_http(&contentful, http.clone())?),
        rest: Arc::new(RestClient::with_http(&contentful, http)?),
    };

    cfblog_server::run(state, server_config).await?;
    Ok(())
}
