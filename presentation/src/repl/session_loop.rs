//! Interactive session loop
//!
//! Each non-command line typed at the prompt is one teacher utterance,
//! processed as one round. The session record is persisted after every
//! round, so Ctrl-D (or a crash) never loses more than the round in
//! flight.

use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::RoundProgressReporter;
use classroom_application::ports::session_store::{SessionRecord, SessionRepository};
use classroom_application::use_cases::run_round::{RunRoundInput, RunRoundUseCase};
use classroom_application::use_cases::session_report::SessionReport;
use classroom_domain::{ClassMood, calculate_kpis};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::sync::Arc;
use tracing::warn;

const HISTORY_CAPACITY: usize = 200;

/// Interactive round loop over one session
pub struct SessionRepl {
    run_round: RunRoundUseCase,
    repository: Arc<dyn SessionRepository>,
    record: SessionRecord,
    show_progress: bool,
}

impl SessionRepl {
    pub fn new(
        run_round: RunRoundUseCase,
        repository: Arc<dyn SessionRepository>,
        record: SessionRecord,
    ) -> Self {
        Self {
            run_round,
            repository,
            record,
            show_progress: true,
        }
    }

    /// Set whether to show per-round progress bars
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Run the interactive loop until /quit or EOF
    pub async fn run(mut self) -> std::io::Result<()> {
        let mut line_editor = Reedline::create();
        if let Some(path) = Self::history_path() {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(history) = FileBackedHistory::with_file(HISTORY_CAPACITY, path) {
                line_editor = line_editor.with_history(Box::new(history));
            }
        }
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("teacher".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match line_editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    if line.starts_with('/') {
                        if self.handle_command(&line) {
                            break;
                        }
                        continue;
                    }
                    self.process_round(&line).await;
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    fn history_path() -> Option<std::path::PathBuf> {
        dirs::data_dir().map(|p| p.join("classroom-sim").join("history.txt"))
    }

    fn print_welcome(&self) {
        let session = &self.record.session;
        println!();
        println!("+---------------------------------------------+");
        println!("|        classroom-sim - Session Mode         |");
        println!("+---------------------------------------------+");
        println!();
        println!(
            "Session {} (\"{}\"), {} students, round {}",
            session.session_id,
            session.topic,
            session.roster_size(),
            session.round_num
        );
        println!();
        println!("Type what you'd say to the class. Commands:");
        println!("  /state    - Show the room state");
        println!("  /report   - Show the KPI report so far");
        println!("  /help     - Show this help");
        println!("  /quit     - Exit (the session stays stored)");
        println!();
    }

    /// Handle slash commands. Returns true if the loop should exit.
    fn handle_command(&self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /state           - Show the room state");
                println!("  /report          - Show the KPI report so far");
                println!("  /help, /h, /?    - Show this help");
                println!("  /quit, /exit, /q - Exit (the session stays stored)");
                println!();
                false
            }
            "/state" => {
                println!("{}", ConsoleFormatter::format_state(&self.record.session));
                false
            }
            "/report" => {
                let session = &self.record.session;
                let report = SessionReport {
                    session_id: session.session_id.clone(),
                    topic: session.topic.clone(),
                    rounds: session.round_num,
                    roster_size: session.roster_size(),
                    mood: ClassMood::derive(session),
                    kpis: calculate_kpis(session, &self.record.history),
                };
                println!("{}", ConsoleFormatter::format_report(&report));
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_round(&mut self, utterance: &str) {
        let input = RunRoundInput::new(utterance);

        let result = if self.show_progress {
            let observer = RoundProgressReporter::new();
            self.run_round
                .execute_with_observer(input, &mut self.record.session, &observer)
                .await
        } else {
            self.run_round
                .execute(input, &mut self.record.session)
                .await
        };

        match result {
            Ok(outcome) => {
                println!(
                    "{}",
                    ConsoleFormatter::format_round(&outcome, &self.record.session)
                );
                self.record.history.push(outcome.entry);
                if let Err(e) = self.repository.put(&self.record).await {
                    warn!("Could not persist session: {}", e);
                    eprintln!("Warning: session not saved: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
    }
}
