//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for session reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable KPI summary
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for classroom-sim
#[derive(Parser, Debug)]
#[command(name = "classroom-sim")]
#[command(author, version, about = "Classroom simulator - LLM students react to your teaching")]
#[command(long_about = r#"
Classroom-sim runs a simulated classroom of LLM-driven students. Each
teacher utterance becomes one round: a selector decides which students
visibly react, each selected student reacts concurrently, and the room
state (attention, understanding, raised hands) advances.

Configuration files are loaded from (in priority order):
1. CLASSROOM_SIM_* environment variables
2. --config <path>          Explicit config file
3. ./classroom-sim.toml     Project-level config
4. <config dir>/classroom-sim/config.toml   Global config

Example:
  classroom-sim start --roster class.json --topic "Photosynthesis"
  classroom-sim resume session_1700000000000
  classroom-sim report session_1700000000000 --output json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a new session and enter the interactive round loop
    Start {
        /// Roster file: a JSON array of student personas
        #[arg(short, long, value_name = "PATH")]
        roster: PathBuf,

        /// Lesson topic
        #[arg(short, long, default_value = "General Lesson")]
        topic: String,

        /// Write a JSONL transcript of round events to this path
        #[arg(long, value_name = "PATH")]
        transcript: Option<PathBuf>,

        /// Suppress progress indicators
        #[arg(short, long)]
        quiet: bool,
    },

    /// Resume a stored session in the interactive round loop
    Resume {
        /// Id of the stored session (e.g. session_1700000000000)
        session_id: String,

        /// Write a JSONL transcript of round events to this path
        #[arg(long, value_name = "PATH")]
        transcript: Option<PathBuf>,

        /// Suppress progress indicators
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the KPI report for a stored session
    Report {
        /// Id of the stored session
        session_id: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        output: ReportFormat,
    },

    /// List stored sessions
    List,

    /// Delete a stored session
    Delete {
        /// Id of the stored session
        session_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_start() {
        let cli = Cli::parse_from([
            "classroom-sim",
            "-vv",
            "start",
            "--roster",
            "class.json",
            "--topic",
            "Osmosis",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Start { roster, topic, transcript, quiet } => {
                assert_eq!(roster, PathBuf::from("class.json"));
                assert_eq!(topic, "Osmosis");
                assert!(transcript.is_none());
                assert!(!quiet);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_report_defaults_to_text() {
        let cli = Cli::parse_from(["classroom-sim", "report", "session_1"]);
        match cli.command {
            Command::Report { session_id, output } => {
                assert_eq!(session_id, "session_1");
                assert!(matches!(output, ReportFormat::Text));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_topic_default() {
        let cli = Cli::parse_from(["classroom-sim", "start", "--roster", "r.json"]);
        match cli.command {
            Command::Start { topic, .. } => assert_eq!(topic, "General Lesson"),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
