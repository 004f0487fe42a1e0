mod app_state;
mod cli;

use std::path::Path;

use handset_common::{ConfigError, Orientation};
use handset_config::HandsetConfig;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

const DEFAULT_LOG_DIRECTIVE: &str = "handset=info";

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(%info, "panic");

        eprintln!("\n--- Handset crashed ---");
        eprintln!("{info}");
        eprintln!("-----------------------\n");

        default_hook(info);
    }));
}

fn init_logging(directive: &str) {
    let filter = EnvFilter::from_default_env();
    let filter = match directive.parse() {
        Ok(d) => filter.add_directive(d),
        Err(e) => {
            eprintln!("invalid log directive '{directive}': {e}");
            filter.add_directive(LevelFilter::INFO.into())
        }
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(args: &cli::Args) -> Result<HandsetConfig, ConfigError> {
    match &args.config {
        Some(path) => handset_config::load_config_from(Path::new(path)),
        None => handset_config::load_config(),
    }
}

fn main() {
    install_panic_hook();

    let args = cli::parse();

    // Config first so its log level applies; failures are reported once
    // logging is up.
    let loaded = load_config(&args);
    let directive = match (&args.log_level, &loaded) {
        (Some(level), _) => level.clone(),
        (None, Ok(config)) => config.logging.directive(),
        (None, Err(_)) => DEFAULT_LOG_DIRECTIVE.to_string(),
    };
    init_logging(&directive);

    tracing::info!("Handset v{} starting", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        HandsetConfig::default()
    });
    if args.dev {
        config.security.dev_mode = true;
    }
    if args.landscape {
        config.window.orientation = Orientation::Landscape;
    }

    if let Err(e) = handset_config::paths::ensure_dirs() {
        tracing::warn!("Failed to create directories: {e}");
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    let mut app = app_state::HandsetApp::new(config, args.url);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
