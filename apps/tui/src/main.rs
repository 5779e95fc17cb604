mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use forensic_dash::config::AppConfig;
use forensic_dash::routing::{OsrmClient, RouteService, StraightLines};
use forensic_dash::source::build_source;
use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = AppConfig::from_env()?;

    // Check if we're running in a terminal
    let headless = args.headless || !is_terminal();
    init_tracing(&config, args.debug, headless)?;

    let client = config.http_client()?;
    let source = build_source(&config, client.clone());
    // Headless output never shows the map, so it skips the router.
    let routes: Arc<dyn RouteService> = if config.routing_enabled && !headless {
        Arc::new(OsrmClient::new(client, &config.routing_url))
    } else {
        Arc::new(StraightLines)
    };
    info!(
        "starting: source={}, api={}, layout={}, headless={headless}",
        config.source.as_str(),
        config.api_url,
        config.layout.as_str()
    );

    let mut app = App::new(config, source, routes);

    if headless {
        return event::run_headless(&mut app, args.image.as_deref(), args.json).await;
    }

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup(true, true);

    result
}

/// Logs go to stderr in headless mode and to the log file otherwise, so they
/// never draw over the UI.
fn init_tracing(config: &AppConfig, debug: bool, headless: bool) -> Result<()> {
    let default_filter = if debug {
        "forensic_dash=debug"
    } else {
        "forensic_dash=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if headless {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    }

    Ok(())
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
