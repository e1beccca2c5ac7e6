use std::io::Write;
use std::path::PathBuf;

use cfblog_client::{FetchOutcome, build_http_client, source_for};
use cfblog_common::telemetry::{self, TelemetryConfig};
use cfblog_common::{ContentVariant, ContentfulConfig};
use cfblog_renderer::page::render_post_page;
use cfblog_renderer::render_post;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing::Level;

#[derive(Parser)]
#[command(version, about = "Render a Contentful blog post to HTML", long_about = None)]
struct Cli {
    /// Slug of the post to render
    slug: String,

    /// Content path to fetch through: graphql or rest
    #[arg(long, short, default_value = "graphql", env = "CFBLOG_SOURCE")]
    source: ContentVariant,

    /// Wrap the body in the full page shell
    #[arg(long)]
    page: bool,

    /// Write to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_miette();
    dotenvy::dotenv().ok();
    telemetry::init(TelemetryConfig::from_env("cfblog").with_level(Level::WARN));

    let cli = Cli::parse();

    let config = ContentfulConfig::from_env()?;
    let source = source_for(cli.source, &config, build_http_client(&config)?)?;

    let post = match source.fetch_outcome(&cli.slug).await {
        FetchOutcome::Found(post) => post,
        FetchOutcome::NotFound => {
            eprintln!("No {} blog post with slug '{}'", cli.source, cli.slug);
            return Ok(());
        }
        FetchOutcome::Failed(err) => return Err(err.into()),
    };

    let body = render_post(&post, cli.source);
    let html = if cli.page {
        render_post_page(Some(&post.title), &body)
    } else {
        body
    };

    match cli.output {
        Some(path) => std::fs::write(&path, html).into_diagnostic()?,
        None => std::io::stdout()
            .lock()
            .write_all(html.as_bytes())
            .into_diagnostic()?,
    }
    Ok(())
}

fn init_miette() {
    let _ = miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .with_cause_chain()
                .context_lines(3)
                .break_words(true)
                .build(),
        )
    }));
    miette::set_panic_hook();
}
