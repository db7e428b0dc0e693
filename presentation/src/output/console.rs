//! Console output formatter for classroom rounds and reports

use classroom_application::ports::session_store::SessionSummary;
use classroom_application::use_cases::run_round::RoundOutcome;
use classroom_application::use_cases::session_report::SessionReport;
use classroom_domain::{ClassMood, ClassroomSession, SpeakerKind, StudentStatus};
use colored::Colorize;

/// Formats rounds, room state and reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the outcome of one round against the mutated session
    pub fn format_round(outcome: &RoundOutcome, session: &ClassroomSession) -> String {
        let mut output = String::new();
        let entry = &outcome.entry;

        output.push_str(&Self::section_header(&format!("Round {}", entry.round)));

        if outcome.selection.teacher_asked_question {
            output.push_str(&format!(
                "{} Bloom level {}\n",
                "Question asked.".cyan(),
                entry.bloom_level
            ));
        }

        // What each simulated student looks like now.
        for id in &outcome.selection.students_to_simulate {
            if let Some(student) = session.student(id) {
                output.push_str(&format!(
                    "  {} {} ({}), attention {:.1}, understanding {:.1}\n",
                    "*".yellow(),
                    student.name().bold(),
                    Self::status_label(student.state.status),
                    student.state.attention,
                    student.state.understanding
                ));
            }
        }

        // A spoken entry is the last student line in the log.
        if entry.student_spoke
            && let Some(spoken) = session
                .log
                .iter()
                .rev()
                .find(|e| e.kind == SpeakerKind::Student && e.round == entry.round)
        {
            output.push_str(&format!(
                "\n{} {}: \"{}\"\n",
                ">".green().bold(),
                spoken.speaker.bold(),
                spoken.content
            ));
        }

        if entry.new_hands_raised > 0 {
            output.push_str(&format!(
                "{}\n",
                format!("{} new hand(s) raised", entry.new_hands_raised).yellow()
            ));
        }

        if let Some(tip) = &entry.teacher_tip {
            output.push_str(&format!("{} {}\n", "Tip:".cyan().bold(), tip));
        }

        output.push_str(&format!(
            "{} {:.1}/100, class mood {}\n",
            "Engagement:".dimmed(),
            entry.engagement_snapshot,
            Self::mood_label(ClassMood::derive(session))
        ));

        output
    }

    /// Format the full room state
    pub fn format_state(session: &ClassroomSession) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header(&format!(
            "{} - round {}",
            session.topic, session.round_num
        )));
        output.push_str(&format!(
            "{} {}\n",
            "Class mood:".cyan().bold(),
            Self::mood_label(ClassMood::derive(session))
        ));

        for (id, student) in &session.students {
            output.push_str(&format!(
                "  {:<20} {:<12} attention {:>5.1}  understanding {:>5.1}  ({})\n",
                student.name(),
                Self::status_label(student.state.status),
                student.state.attention,
                student.state.understanding,
                id
            ));
        }

        if session.hand_queue.is_empty() {
            output.push_str(&format!("{}\n", "No hands raised.".dimmed()));
        } else {
            let names: Vec<&str> = session
                .hand_queue
                .iter()
                .filter_map(|id| session.student(id).map(|s| s.name()))
                .collect();
            output.push_str(&format!(
                "{} {}\n",
                "Hands (oldest first):".yellow().bold(),
                names.join(", ")
            ));
        }

        output
    }

    /// Format the KPI report
    pub fn format_report(report: &SessionReport) -> String {
        let mut output = String::new();
        let kpis = &report.kpis;

        output.push_str(&Self::header("Session Report"));
        output.push('\n');
        output.push_str(&format!(
            "{} {} (\"{}\"), {} rounds, {} students\n\n",
            "Session:".cyan().bold(),
            report.session_id,
            report.topic,
            report.rounds,
            report.roster_size
        ));

        output.push_str(&format!(
            "  Engagement:        {:.1}/100 (trend {:+.1})\n",
            kpis.engagement, kpis.engagement_trend
        ));
        output.push_str(&format!(
            "  Talk ratio:        {:.0}% teacher / {:.0}% students\n",
            kpis.talk_ratio.teacher, kpis.talk_ratio.students
        ));
        output.push_str(&format!("  Bloom level:       {:.1}\n", kpis.bloom_level));
        output.push_str(&format!(
            "  Confusion index:   {:.0}%\n",
            kpis.confusion_index
        ));
        output.push_str(&format!(
            "  Hand-raise rate:   {} of last 10 rounds\n",
            kpis.hand_raise_rate
        ));
        output.push_str(&format!("  Ignored hands:     {}\n", kpis.ignored_hands));
        output.push_str(&format!("  Cold-call risk:    {}\n", kpis.cold_call_risk));
        output.push_str(&format!(
            "  Inclusion:         {:.0}% of students have spoken\n",
            kpis.inclusion_score
        ));
        output.push_str(&format!(
            "  Class mood:        {}\n",
            Self::mood_label(report.mood)
        ));

        if let Some(tip) = &kpis.latest_tip {
            output.push_str(&format!("\n{} {}\n", "Latest tip:".cyan().bold(), tip));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format the report as JSON
    pub fn format_report_json(report: &SessionReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the stored-session listing
    pub fn format_session_list(summaries: &[SessionSummary]) -> String {
        if summaries.is_empty() {
            return "No stored sessions.".to_string();
        }
        let mut output = String::new();
        for summary in summaries {
            output.push_str(&format!(
                "{}  {:>4} rounds  {}\n",
                summary.session_id.to_string().bold(),
                summary.rounds,
                summary.topic.dimmed()
            ));
        }
        output
    }

    fn status_label(status: StudentStatus) -> String {
        let name = status.display_name();
        match status {
            StudentStatus::Listening => name.normal().to_string(),
            StudentStatus::HandRaised => name.yellow().to_string(),
            StudentStatus::Confused | StudentStatus::Frustrated => name.red().to_string(),
            StudentStatus::ZonedOut | StudentStatus::Chatting => name.dimmed().to_string(),
        }
    }

    fn mood_label(mood: ClassMood) -> String {
        match mood {
            ClassMood::Engaged => mood.to_string().green().to_string(),
            ClassMood::Confused => mood.to_string().red().to_string(),
            ClassMood::Restless => mood.to_string().yellow().to_string(),
            ClassMood::Neutral => mood.to_string().normal().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classroom_application::ports::session_store::SessionRecord;
    use classroom_domain::{
        ClassroomSession, LogEntry, Persona, RoundEntry, RoundPolicy, Selection, SessionId,
        SessionKpis, StudentId, TalkRatio, calculate_kpis,
    };

    fn sample_session() -> ClassroomSession {
        let personas: Vec<Persona> = ["Maya Chen", "Dev Patel"]
            .iter()
            .map(|n| {
                serde_json::from_str(&format!(r#"{{ "identity": {{ "name": "{}" }} }}"#, n))
                    .unwrap()
            })
            .collect();
        ClassroomSession::from_roster(
            SessionId::new("session_1"),
            "Photosynthesis",
            personas,
            &RoundPolicy::default(),
        )
        .unwrap()
    }

    fn sample_outcome() -> RoundOutcome {
        RoundOutcome {
            selection: Selection {
                students_to_simulate: vec![StudentId::new("maya_chen_0")],
                teacher_asked_question: true,
                bloom_level: 3,
                called_on_student_id: None,
                teacher_tip: Some("Give them a beat to think.".to_string()),
                topic_update: None,
                debug_reason: None,
            },
            entry: RoundEntry {
                round: 1,
                sentence: "What limits the rate?".to_string(),
                bloom_level: 3,
                teacher_asked_question: true,
                student_spoke: true,
                student_spoke_id: Some(StudentId::new("maya_chen_0")),
                new_hands_raised: 1,
                teacher_tip: Some("Give them a beat to think.".to_string()),
                engagement_snapshot: 74.8,
            },
        }
    }

    #[test]
    fn test_format_round_mentions_students_and_tip() {
        colored::control::set_override(false);
        let mut session = sample_session();
        session.round_num = 1;
        session.log.push(LogEntry::teacher(1, "What limits the rate?"));
        session
            .log
            .push(LogEntry::student(1, "Maya Chen", "Is it light?"));

        let output = ConsoleFormatter::format_round(&sample_outcome(), &session);
        assert!(output.contains("Round 1"));
        assert!(output.contains("Maya Chen"));
        assert!(output.contains("Is it light?"));
        assert!(output.contains("Give them a beat to think."));
        assert!(output.contains("1 new hand(s) raised"));
    }

    #[test]
    fn test_format_state_lists_roster_and_queue() {
        colored::control::set_override(false);
        let mut session = sample_session();
        let id = StudentId::new("dev_patel_1");
        session.student_mut(&id).unwrap().state.status = StudentStatus::HandRaised;
        session.enqueue_hand(&id);

        let output = ConsoleFormatter::format_state(&session);
        assert!(output.contains("Photosynthesis - round 0"));
        assert!(output.contains("Maya Chen"));
        assert!(output.contains("Hands (oldest first): Dev Patel"));
    }

    #[test]
    fn test_format_state_empty_queue() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_state(&sample_session());
        assert!(output.contains("No hands raised."));
    }

    #[test]
    fn test_format_report_text_and_json() {
        colored::control::set_override(false);
        let session = sample_session();
        let record = SessionRecord::new(session);
        let report = SessionReport {
            session_id: record.session_id().clone(),
            topic: record.session.topic.clone(),
            rounds: 0,
            roster_size: 2,
            mood: ClassMood::Engaged,
            kpis: calculate_kpis(&record.session, &record.history),
        };

        let text = ConsoleFormatter::format_report(&report);
        assert!(text.contains("Session Report"));
        assert!(text.contains("Engagement:        75.0/100"));
        assert!(text.contains("100% teacher / 0% students"));

        let json = ConsoleFormatter::format_report_json(&report);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kpis"]["engagement"], 75.0);
        assert_eq!(value["mood"], "engaged");
    }

    #[test]
    fn test_format_session_list() {
        colored::control::set_override(false);
        assert_eq!(
            ConsoleFormatter::format_session_list(&[]),
            "No stored sessions."
        );
        let summaries = vec![SessionSummary {
            session_id: SessionId::new("session_1"),
            topic: "Algebra".to_string(),
            rounds: 12,
        }];
        let output = ConsoleFormatter::format_session_list(&summaries);
        assert!(output.contains("session_1"));
        assert!(output.contains("12 rounds"));
        assert!(output.contains("Algebra"));
    }

    #[test]
    fn test_report_serialization_shape() {
        // Keep the JSON stable: kpis nested, talk ratio split out.
        let kpis = SessionKpis {
            engagement: 50.0,
            engagement_trend: -2.0,
            talk_ratio: TalkRatio {
                teacher: 80.0,
                students: 20.0,
            },
            bloom_level: 2.5,
            confusion_index: 25.0,
            hand_raise_rate: 3,
            ignored_hands: 1,
            cold_call_risk: 0,
            inclusion_score: 40.0,
            latest_tip: None,
        };
        let report = SessionReport {
            session_id: SessionId::new("session_9"),
            topic: "Topic".to_string(),
            rounds: 5,
            roster_size: 4,
            mood: ClassMood::Neutral,
            kpis,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["session_id"], "session_9");
        assert_eq!(value["kpis"]["talk_ratio"]["students"], 20.0);
    }
}
