use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use coordination::debate::{render_transcript, workflow_dot};
use debate_agents::config::{check_endpoint, CliOverrides, DebateConfig};
use debate_agents::prompts::PROMPT_VERSION;
use debate_agents::sink::ConsoleSink;
use debate_agents::{telemetry, AgentSet, DebateController, DebateError};
use tracing::{info, warn};

/// Scientist vs Philosopher debate with running memory and a final judge.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Debate topic (prompted on stdin when omitted)
    #[arg(long)]
    topic: Option<String>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of arguments before the judge takes over (overrides DEBATE_ROUND_LIMIT)
    #[arg(long)]
    rounds: Option<u32>,

    /// Model name (overrides DEBATE_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Where to write the workflow diagram (Graphviz DOT)
    #[arg(long)]
    diagram: Option<PathBuf>,

    /// Also write the readable transcript to this file
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// Log file path
    #[arg(long, conflicts_with = "no_log_file")]
    log_file: Option<PathBuf>,

    /// Disable the log file; log to stderr only
    #[arg(long, default_value_t = false)]
    no_log_file: bool,

    /// Print the final debate state as JSON on stdout
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Probe the completion endpoint before starting
    #[arg(long, default_value_t = false)]
    preflight: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            rounds: self.rounds,
            model: self.model.clone(),
            diagram: self.diagram.clone(),
            transcript: self.transcript.clone(),
            log_file: self.log_file.clone(),
            no_log_file: self.no_log_file,
        }
    }
}

/// Report a fatal error and exit with the code its kind maps to.
fn abort(err: &DebateError) -> ! {
    eprintln!("Debate aborted ({}): {err}", err.kind());
    std::process::exit(err.exit_code());
}

fn read_topic() -> Result<String, DebateError> {
    print!("Enter topic for debate: ");
    let mut line = String::new();
    io::stdout()
        .flush()
        .and_then(|_| io::stdin().lock().read_line(&mut line))
        .map_err(|e| DebateError::Input(format!("failed to read topic from stdin: {e}")))?;
    Ok(line.trim().to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = DebateConfig::resolve(
        args.config.as_deref(),
        |key| std::env::var(key).ok(),
        &args.overrides(),
    )
    .unwrap_or_else(|e| abort(&e));

    telemetry::init_tracing(config.log_path.as_deref())?;
    info!(
        model = %config.provider.model,
        base_url = %config.provider.base_url,
        round_limit = config.policy.round_limit,
        prompt_version = PROMPT_VERSION,
        "Debate starting"
    );

    if args.preflight && !check_endpoint(&config.provider.base_url).await {
        warn!(url = %config.provider.base_url, "Completion endpoint did not answer /models");
    }

    let topic = match args.topic.clone() {
        Some(topic) => topic,
        None => read_topic().unwrap_or_else(|e| abort(&e)),
    };

    let agents = AgentSet::from_provider(&config.provider).unwrap_or_else(|e| abort(&e));
    let controller = DebateController::new(config.policy, agents, Box::new(ConsoleSink));

    let state = controller.run(&topic).await.unwrap_or_else(|e| abort(&e));

    std::fs::write(&config.diagram_path, workflow_dot(state.winner)).with_context(|| {
        format!("Failed to write diagram to {}", config.diagram_path.display())
    })?;
    println!("\nDAG diagram saved as {}", config.diagram_path.display());

    if let Some(path) = &config.transcript_path {
        std::fs::write(path, render_transcript(&state))
            .with_context(|| format!("Failed to write transcript to {}", path.display()))?;
        info!(path = %path.display(), "Transcript written");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    }

    info!("{}", state.status_line());
    Ok(())
}
