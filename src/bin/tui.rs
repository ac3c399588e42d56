// TUI binary entrypoint: argument handling, logging, config loading with
// first-run onboarding, then the dashboard loop.
use anyhow::Result;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use taskdeck::cli;
use taskdeck::config::Config;
use taskdeck::context::{AppContext, StandardContext};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        cli::print_help(&args[0]);
        return Ok(());
    }

    let override_root = args
        .iter()
        .position(|a| a == "--root" || a == "-r")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from);
    let ctx: Arc<dyn AppContext> = Arc::new(StandardContext::new(override_root));

    init_logging(ctx.as_ref());

    let config = match Config::load(ctx.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            // A syntax/permission error is not a fresh install; report and exit.
            if !Config::is_missing_config_error(&e) {
                eprintln!("Error loading configuration:\n{}", e);
                std::process::exit(1);
            }
            onboard(ctx.as_ref())?
        }
    };

    taskdeck::tui::run(config).await
}

/// The terminal belongs to the TUI, so logs go to a file in the data dir.
fn init_logging(ctx: &dyn AppContext) {
    use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};
    if let Ok(path) = ctx.get_log_file_path()
        && let Ok(file) = std::fs::File::create(&path)
    {
        let _ = WriteLogger::init(LevelFilter::Info, LogConfig::default(), file);
    }
}

/// Interactive first-run setup: ask for the server URL and save the config.
fn onboard(ctx: &dyn AppContext) -> Result<Config> {
    println!("Welcome to Taskdeck (TUI). No configuration file found.");
    println!("Let's point the dashboard at your task server.\n");

    let mut config = Config::default();
    print!("Task server URL (e.g. http://localhost:8080): ");
    io::stdout().flush()?;
    let mut url = String::new();
    io::stdin().read_line(&mut url)?;
    config.server_url = url.trim().trim_end_matches('/').to_string();

    if let Err(e) = config.save(ctx) {
        eprintln!("Warning: Could not save config file: {}", e);
    } else if let Ok(path) = Config::get_path_string(ctx) {
        println!("Configuration saved to: {}", path);
    }
    Ok(config)
}
