//! `tboard` - CLI for tallyboard
//!
//! This binary provides the command-line interface for running the dashboard
//! and managing its configuration and login session.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tracing::info;

use tallyboard::cli::{Cli, Command, ConfigCommand, RunCommand, SessionCommand};
use tallyboard::clock::ClockTicker;
use tallyboard::nav;
use tallyboard::notify::{LogReporter, NotificationEmitter};
use tallyboard::rng::{RandomSource, StdRandom};
use tallyboard::session::{Auth, AuthStatus, SqliteSessionStore};
use tallyboard::simulator::{PeriodicSimulator, SimulatorTicker};
use tallyboard::term::TermView;
use tallyboard::ticker::{Dashboard, SharedView};
use tallyboard::view::MemoryView;
use tallyboard::{init_logging, Config, Error};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Run(run_cmd) => handle_run(&config, &run_cmd),
        Command::Status(status_cmd) => handle_status(&config, status_cmd.json),
        Command::Session(session_cmd) => handle_session(&config, &session_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn handle_run(config: &Config, cmd: &RunCommand) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_dashboard(config, cmd))
}

async fn run_dashboard(
    config: &Config,
    cmd: &RunCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let view = build_view(config, cmd.headless);
    let auth = open_auth(config)?;

    // Page-load wiring: paint the auth state and the default section once
    // before the timers take over.
    {
        let mut guard = view
            .lock()
            .map_err(|_| Error::internal("view lock poisoned"))?;
        nav::refresh_auth_state(&mut *guard, &auth)?;
        if let Some(first) = config.display.nav_links.first() {
            nav::navigate(&mut *guard, &first.target, &first.label);
        }
    }

    let mut dashboard = Dashboard::new();

    let simulator = PeriodicSimulator::from_config(config, make_rng(cmd.seed, 0))?;
    dashboard.spawn(
        Box::new(SimulatorTicker::new(simulator, view.clone())),
        config.simulator_interval(),
    );

    let emitter =
        NotificationEmitter::from_config(config, Box::new(LogReporter), make_rng(cmd.seed, 1))?;
    dashboard.spawn(Box::new(emitter), config.notifier_interval());

    dashboard.spawn(
        Box::new(ClockTicker::new(
            view.clone(),
            config.display.time_format.clone(),
        )),
        config.clock_interval(),
    );

    match cmd.duration {
        Some(secs) => {
            info!("dashboard running for {secs}s");
            tokio::time::sleep(Duration::from_secs(secs)).await;
        }
        None => {
            info!("dashboard running; press Ctrl-C to stop");
            tokio::signal::ctrl_c().await?;
        }
    }

    dashboard.shutdown().await;
    Ok(())
}

/// Build the shared view: terminal-rendered by default, in-memory when
/// running headless.
fn build_view(config: &Config, headless: bool) -> SharedView {
    if headless {
        let mut view = MemoryView::new();
        for spec in &config.catalogs.metrics {
            view = view.with_metric_slot(spec.slot.clone());
        }
        for link in &config.display.nav_links {
            view = view.with_nav_link(link.target.clone(), link.label.clone());
        }
        Arc::new(Mutex::new(view))
    } else {
        Arc::new(Mutex::new(TermView::from_config(config)))
    }
}

fn open_auth(config: &Config) -> Result<Auth, Error> {
    let store = SqliteSessionStore::open(config.session_store_path())?;
    Ok(Auth::new(
        Box::new(store),
        config.session.token_key.clone(),
    ))
}

fn make_rng(seed: Option<u64>, stream: u64) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(StdRandom::seeded(seed.wrapping_add(stream))),
        None => Box::new(StdRandom::from_entropy()),
    }
}

fn handle_status(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session_path = config.session_store_path();
    let status = if session_path.exists() {
        open_auth(config)?.status()?
    } else {
        AuthStatus::Anonymous
    };

    if json {
        let status = serde_json::json!({
            "session": status.to_string(),
            "session_store": session_path,
            "simulator_interval_ms": config.simulator.tick_interval_ms,
            "notifier_interval_ms": config.notifier.interval_ms,
            "feed_capacity": config.simulator.feed_capacity,
            "activities": config.catalogs.activities.len(),
            "notifications": config.catalogs.notifications.len(),
            "metrics": config.catalogs.metrics.len(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("tboard status");
        println!("-------------");
        println!("Session:        {status}");
        println!("Session store:  {}", session_path.display());
        println!(
            "Simulator:      every {}ms, feed capacity {}",
            config.simulator.tick_interval_ms, config.simulator.feed_capacity
        );
        println!("Notifier:       every {}ms", config.notifier.interval_ms);
        println!(
            "Catalogs:       {} activities, {} notifications, {} metrics",
            config.catalogs.activities.len(),
            config.catalogs.notifications.len(),
            config.catalogs.metrics.len()
        );
    }
    Ok(())
}

fn handle_session(
    config: &Config,
    cmd: &SessionCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut auth = open_auth(config)?;

    match cmd {
        SessionCommand::Login => {
            let token = auth.login()?;
            println!("Logged in.");
            println!("Token: {token}");
        }
        SessionCommand::Logout => {
            if auth.logout()? {
                println!("Logged out.");
            } else {
                println!("No active session.");
            }
        }
        SessionCommand::Status { json } => {
            let status = auth.status()?;
            if *json {
                let status = serde_json::json!({ "session": status.to_string() });
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("Session: {status}");
            }
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Simulator]");
                println!("  Tick interval (ms): {}", config.simulator.tick_interval_ms);
                println!("  Feed capacity:      {}", config.simulator.feed_capacity);
                println!();
                println!("[Notifier]");
                println!("  Interval (ms):      {}", config.notifier.interval_ms);
                println!();
                println!("[Display]");
                println!("  Clock interval:     {}ms", config.display.clock_interval_ms);
                println!("  Time format:        {}", config.display.time_format);
                println!("  Nav links:          {}", config.display.nav_links.len());
                println!();
                println!("[Session]");
                println!(
                    "  Store path:         {}",
                    config.session_store_path().display()
                );
                println!("  Token key:          {}", config.session.token_key);
                println!();
                println!("[Catalogs]");
                println!(
                    "  Activities:         {}",
                    config.catalogs.activities.len()
                );
                println!(
                    "  Notifications:      {}",
                    config.catalogs.notifications.len()
                );
                println!(
                    "  Aging captions:     {}",
                    config.catalogs.aging_captions.len()
                );
                println!("  Metrics:            {}", config.catalogs.metrics.len());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
