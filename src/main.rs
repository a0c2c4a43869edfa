mod repl;

use almg_analytics::{ReportGenerator, TrajectoryPlot};
use almg_core::config::AppConfig;
use almg_core::store;
use anyhow::Result;
use clap::{ArgGroup, CommandFactory, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "almg-tracker",
    about = "Track AI conversation trajectories in ALMG coordinate space",
    version,
    author,
    after_help = "Examples:\n  almg-tracker --interactive\n  almg-tracker --analyze session.json\n  almg-tracker --visualize session.json"
)]
#[command(group(ArgGroup::new("mode").args(["interactive", "analyze", "visualize"])))]
struct Cli {
    /// Start an interactive tracking session
    #[arg(short, long)]
    interactive: bool,

    /// Analyze a trajectory JSON file
    #[arg(short, long, value_name = "FILE")]
    analyze: Option<PathBuf>,

    /// ASCII visualization of a trajectory JSON file
    #[arg(short, long, value_name = "FILE")]
    visualize: Option<PathBuf>,

    /// Path to config file (default: ~/.config/almg-tracker/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model being tracked (skips the interactive prompt)
    #[arg(short, long)]
    model: Option<String>,

    /// Disable ANSI zone colors
    #[arg(long)]
    no_color: bool,

    /// Print the resolved configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up tracing.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "almg_tracker=info,warn".into()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config.
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Apply CLI overrides.
    if let Some(model) = &cli.model {
        config.tracker.default_model = Some(model.clone());
    }
    if cli.no_color {
        config.tracker.color = false;
    }
    tracing::debug!(
        "model: {}, export dir: {}",
        config.tracker.default_model.as_deref().unwrap_or("(prompt)"),
        config.tracker.export_dir().display()
    );

    if cli.print_config {
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    if cli.interactive {
        repl::run(&config)?;
    } else if let Some(path) = &cli.analyze {
        let session = store::load(path)?;
        print!(
            "{}",
            ReportGenerator::analysis_report(&session, config.tracker.color)
        );
    } else if let Some(path) = &cli.visualize {
        let session = store::load(path)?;
        print!("{}", TrajectoryPlot::from_config(&config.plot).render(&session));
    } else {
        Cli::command().print_help()?;
    }

    Ok(())
}
