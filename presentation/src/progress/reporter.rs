//! Progress reporting for round execution

use classroom_application::ports::round_observer::RoundObserver;
use classroom_domain::StudentId;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports round progress with a progress bar over the simulate set
pub struct RoundProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl RoundProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }
}

impl Default for RoundProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundObserver for RoundProgressReporter {
    fn on_round_start(&self, round: u32, simulated: usize) {
        let pb = ProgressBar::new(simulated as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix(format!("Round {}", round));
        pb.set_message("Students reacting...");
        *self.bar.lock().unwrap() = Some(pb);
    }

    fn on_student_reacted(&self, student_id: &StudentId, success: bool) {
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), student_id)
            } else {
                format!("{} {}", "x".red(), student_id)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_round_complete(&self, _round: u32) {
        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleRoundProgress;

impl RoundObserver for SimpleRoundProgress {
    fn on_round_start(&self, round: u32, simulated: usize) {
        println!(
            "{} Round {} ({} students reacting)",
            "->".cyan(),
            round,
            simulated
        );
    }

    fn on_student_reacted(&self, student_id: &StudentId, success: bool) {
        if success {
            println!("  {} {}", "v".green(), student_id);
        } else {
            println!("  {} {} (degraded)", "x".red(), student_id);
        }
    }

    fn on_round_complete(&self, _round: u32) {}
}
