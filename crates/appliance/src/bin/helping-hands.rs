//! helping-hands: caregiving reminder appliance.
//!
//! Shows periodic and time-of-day reminders with a matching light color,
//! and a clock face in between. Runs until Ctrl-C.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::sync::Notify;
use tracing::{info, warn};

use helping_appliance::{
    build_clock, build_sink, load_schedule, ClockKind, LoopSettings, ReminderLoop, Schedule,
    Simulation, SinkKind, TimeOfDay,
};
use helping_core::config::load_dotenv;
use helping_core::Config;
use helping_notify::Dispatcher;
use helping_rules::Scheduler;

// ── CLI ─────────────────────────────────────────────────────────────

/// Caregiving reminder appliance.
#[derive(Parser, Debug)]
#[command(name = "helping-hands", version, about)]
struct Cli {
    /// Reminder YAML file (default: built-in schedule).
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Time source.
    #[arg(long, value_enum, env = "HELPING_CLOCK", default_value_t = ClockKind::System)]
    clock: ClockKind,

    /// HTTP time authority for `--clock network`.
    #[arg(long)]
    time_url: Option<String>,

    /// Start time of the simulated clock.
    #[arg(long, default_value = "08:25")]
    simulate_from: TimeOfDay,

    /// Speed-up factor of the simulated clock.
    #[arg(long, default_value_t = 60)]
    speed: u32,

    /// Where reminders are shown.
    #[arg(long, value_enum, env = "HELPING_SINK", default_value_t = SinkKind::Console)]
    sink: SinkKind,

    /// Config profile (overrides HELPING_PROFILE).
    #[arg(long)]
    profile: Option<String>,

    /// Validate the reminder file, print a JSON summary and exit.
    #[arg(long)]
    check: bool,
}

fn check_summary(config: &Config, schedule: &Schedule) -> serde_json::Value {
    let tasks: serde_json::Map<String, serde_json::Value> = schedule
        .catalog
        .iter()
        .map(|(task, display)| {
            (
                task.to_string(),
                serde_json::json!({ "message": display.message, "color": display.color }),
            )
        })
        .collect();
    let missing: Vec<String> = schedule
        .catalog
        .missing_for(&schedule.rules)
        .iter()
        .map(ToString::to_string)
        .collect();
    serde_json::json!({
        "valid": true,
        "config": config.summary_json(),
        "rules": schedule.rules,
        "tasks": tasks,
        "missing_tasks": missing,
    })
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match cli.profile.as_deref() {
        Some(profile) => Config::for_profile(profile),
        None => Config::from_env(),
    };
    if let Some(rules) = cli.rules {
        config.rules.file = Some(rules);
    }
    if let Some(url) = cli.time_url {
        config.clock.time_url = Some(url);
    }

    let schedule = load_schedule(config.rules.file.as_deref())
        .context("failed to load reminder schedule")?;

    if cli.check {
        let summary = check_summary(&config, &schedule);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    config.log_summary();

    let simulation = Simulation {
        start: cli.simulate_from,
        speed: cli.speed,
    };
    let clock = build_clock(cli.clock, &config, simulation).context("failed to set up clock")?;
    let sink = build_sink(cli.sink, &config);

    let mut reminder_loop = ReminderLoop::new(
        clock,
        Scheduler::new(schedule.rules),
        Dispatcher::new(schedule.catalog, sink),
        LoopSettings::from(&config),
    );

    let shutdown = Arc::new(Notify::new());
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => trigger.notify_one(),
            Err(e) => warn!(error = %e, "cannot listen for Ctrl-C"),
        }
    });

    info!("helping-hands starting");
    reminder_loop.run(shutdown).await;
    info!(
        stats = %serde_json::to_string(reminder_loop.stats())?,
        "helping-hands exited cleanly"
    );

    Ok(())
}
