use almg_analytics::ReportGenerator;
use almg_core::config::AppConfig;
use almg_core::session::Session;
use almg_core::store;
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::{Config as RlConfig, DefaultEditor};
use std::path::PathBuf;

const BANNER: &str = r#"
  ╔═══════════════════════════════════════════╗
  ║          ALMG Conversation Tracker        ║
  ║   Entropy / Ambiguity / Legitimacy        ║
  ╚═══════════════════════════════════════════╝
"#;

const HELP: &str = "  add <x> <y> <z> [topic]  — Add a point (0-1 scale each)
  summary                  — Show session summary
  export                   — Export to JSON
  help                     — Show this help
  quit                     — End session";

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add {
        x: f64,
        y: f64,
        z: f64,
        topic: Option<String>,
    },
    Summary,
    Export,
    Help,
    Quit,
}

impl Command {
    /// Parse a non-empty input line. The error is a message for the user.
    pub fn parse(input: &str) -> std::result::Result<Self, String> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let action = parts.first().map(|s| s.to_lowercase()).unwrap_or_default();

        match action.as_str() {
            "add" => {
                if parts.len() < 4 {
                    return Err("Usage: add <x> <y> <z> [topic]".into());
                }
                let coord = |s: &str| {
                    s.parse::<f64>()
                        .map_err(|_| format!("Coordinates must be numbers 0-1, got '{}'", s))
                };
                let topic = parts[4..].join(" ");
                Ok(Command::Add {
                    x: coord(parts[1])?,
                    y: coord(parts[2])?,
                    z: coord(parts[3])?,
                    topic: (!topic.is_empty()).then_some(topic),
                })
            }
            "summary" => Ok(Command::Summary),
            "export" => Ok(Command::Export),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err("Unknown command. Try: add <x> <y> <z> [topic]".into()),
        }
    }
}

/// Settings the command handlers need; the session itself is passed separately.
pub struct ReplContext {
    pub color: bool,
    pub export_dir: PathBuf,
}

impl ReplContext {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            color: config.tracker.color,
            export_dir: config.tracker.export_dir(),
        }
    }
}

/// Run the interactive REPL.
pub fn run(config: &AppConfig) -> Result<()> {
    println!("{}", BANNER);

    // Set up rustyline.
    let rl_config = RlConfig::builder().auto_add_history(true).build();
    let history_path = config
        .tracker
        .history_file
        .then(|| AppConfig::data_dir().join("repl_history.txt"));
    let mut rl = DefaultEditor::with_config(rl_config)?;
    if let Some(path) = &history_path {
        let _ = rl.load_history(path);
    }

    let model = match &config.tracker.default_model {
        Some(model) => Some(model.clone()),
        None => {
            match model_from_prompt(rl.readline("Model being tracked (e.g., GPT-4, Claude): "))? {
                Some(model) => model,
                None => {
                    println!("\nSession ended.");
                    return Ok(());
                }
            }
        }
    };

    let mut session = Session::new(model);
    let ctx = ReplContext::from_config(config);
    println!(
        "\nSession {} initialized for {}",
        session.session_id(),
        session.model().unwrap_or("Unknown")
    );
    println!("\nCommands:\n{}\n", HELP);

    loop {
        let prompt = format!("[Turn {}] > ", session.next_turn());
        match rl.readline(&prompt) {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                match Command::parse(input) {
                    Ok(command) => {
                        if !handle_command(command, &mut session, &ctx)? {
                            break;
                        }
                    }
                    Err(msg) => println!("  {}", msg),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    println!("\nSession ended.");
    if !session.is_empty() {
        println!("{}", store::to_json(&session)?);
    }

    // Save history.
    if let Some(path) = &history_path {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let _ = rl.save_history(path);
    }

    Ok(())
}

/// Interpret the answer to the model prompt.
///
/// `Ok(None)` means the user cancelled (Ctrl-C / Ctrl-D) and the run should end;
/// a blank answer is `Ok(Some(None))`.
fn model_from_prompt(
    input: std::result::Result<String, ReadlineError>,
) -> Result<Option<Option<String>>> {
    match input {
        Ok(line) => Ok(Some(Some(line.trim().to_string()).filter(|m| !m.is_empty()))),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Apply one command to the session. Returns `true` to continue the loop, `false` to exit.
///
/// Classification and export failures are reported and the loop carries on.
pub fn handle_command(command: Command, session: &mut Session, ctx: &ReplContext) -> Result<bool> {
    match command {
        Command::Add { x, y, z, topic } => match session.add_point(x, y, z, topic) {
            Ok(point) => print!("{}", ReportGenerator::point_feedback(point, ctx.color)),
            Err(e) => report_error(&e),
        },
        Command::Summary => {
            print!("{}", ReportGenerator::summary_block(session.summary(), ctx.color));
        }
        Command::Export => {
            let path = ctx.export_dir.join(store::export_file_name(session));
            match store::save(session, &path) {
                Ok(()) => println!("  Exported to {}", path.display()),
                Err(e) => report_error(&e),
            }
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn report_error(e: &dyn std::fmt::Display) {
    println!("  \x1b[0;31mError: {}\x1b[0m", e);
}
