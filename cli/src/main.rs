//! CLI entrypoint for classroom-sim
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use classroom_application::ports::session_store::{SessionRecord, SessionRepository};
use classroom_application::use_cases::run_round::RunRoundUseCase;
use classroom_application::use_cases::session_report::SessionReportUseCase;
use classroom_application::use_cases::start_session::{StartSessionInput, StartSessionUseCase};
use classroom_domain::SessionId;
use classroom_infrastructure::config::{ConfigLoader, FileConfig, Severity};
use classroom_infrastructure::llm::{ChatClient, LlmReactor, LlmSelector};
use classroom_infrastructure::logging::JsonlTranscriptLogger;
use classroom_infrastructure::persistence::{FileSessionRepository, load_roster};
use classroom_presentation::{Cli, Command, ConsoleFormatter, ReportFormat, SessionRepl};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("cannot load configuration: {}", e))?
    };

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => eprintln!("config error: {}: {}", issue.field, issue.message),
            Severity::Warning => eprintln!("config warning: {}: {}", issue.field, issue.message),
        }
    }
    if FileConfig::has_errors(&issues) {
        bail!("configuration has errors, aborting");
    }

    let sessions_dir = config
        .storage
        .sessions_dir
        .clone()
        .unwrap_or_else(ConfigLoader::default_sessions_dir);
    let repository: Arc<dyn SessionRepository> =
        Arc::new(FileSessionRepository::open(&sessions_dir).with_context(|| {
            format!("cannot open sessions directory {}", sessions_dir.display())
        })?);
    info!("Using sessions directory {}", sessions_dir.display());

    match cli.command {
        Command::Start {
            roster,
            topic,
            transcript,
            quiet,
        } => {
            let personas = load_roster(&roster)
                .with_context(|| format!("cannot load roster {}", roster.display()))?;
            let record = StartSessionUseCase::new(Arc::clone(&repository))
                .with_policy(config.simulation.clone())
                .execute(StartSessionInput::new(topic, personas))
                .await?;
            println!("Started session {}", record.session_id());
            run_session(record, repository, &config, transcript, quiet).await
        }
        Command::Resume {
            session_id,
            transcript,
            quiet,
        } => {
            let id = parse_session_id(&session_id)?;
            let record = repository.get(&id).await?;
            run_session(record, repository, &config, transcript, quiet).await
        }
        Command::Report { session_id, output } => {
            let id = parse_session_id(&session_id)?;
            let report = SessionReportUseCase::new(repository).execute(&id).await?;
            let formatted = match output {
                ReportFormat::Text => ConsoleFormatter::format_report(&report),
                ReportFormat::Json => ConsoleFormatter::format_report_json(&report),
            };
            println!("{}", formatted);
            Ok(())
        }
        Command::List => {
            let summaries = repository.list().await?;
            println!("{}", ConsoleFormatter::format_session_list(&summaries));
            Ok(())
        }
        Command::Delete { session_id } => {
            let id = parse_session_id(&session_id)?;
            repository.delete(&id).await?;
            println!("Deleted {}", id);
            Ok(())
        }
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId> {
    SessionId::try_new(raw).context("session id cannot be empty")
}

/// Build the capability adapters and enter the interactive round loop.
/// The LLM client is only constructed here, so report/list/delete work
/// without an API key.
async fn run_session(
    record: SessionRecord,
    repository: Arc<dyn SessionRepository>,
    config: &FileConfig,
    transcript: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let client = ChatClient::from_config(&config.llm)?;
    info!("Using model {}", client.model());

    let selector = Arc::new(LlmSelector::new(client.clone()));
    let reactor = Arc::new(LlmReactor::new(client));

    let mut run_round = RunRoundUseCase::new(selector, reactor)
        .with_policy(config.simulation.clone())
        .with_reactor_timeout(Duration::from_secs(config.llm.timeout_secs.max(1)));

    if let Some(path) = transcript.or_else(|| config.storage.transcript.clone())
        && let Some(logger) = JsonlTranscriptLogger::new(&path)
    {
        info!("Writing transcript to {}", logger.path().display());
        run_round = run_round.with_transcript_logger(Arc::new(logger));
    }

    let repl = SessionRepl::new(run_round, repository, record).with_progress(!quiet);
    repl.run().await?;
    Ok(())
}
