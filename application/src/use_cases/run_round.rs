//! Run Round use case
//!
//! The orchestration core: one teacher utterance becomes one atomic
//! round. Select once, fan out reactions concurrently, merge under the
//! domain rules, decay the idle rest, append log entries and advance the
//! counters.
//!
//! Only input errors fail a call, and they fail it before any mutation.
//! Capability failures degrade: a dead selector becomes the
//! deterministic fallback selection, a dead reactor becomes a neutral
//! no-op for that student alone. A caller therefore either gets back a
//! session advanced by exactly one round or an untouched one.

use crate::ports::reactor::{Reactor, ReactionRequest, ReactorError};
use crate::ports::round_observer::{NoRoundObserver, RoundObserver};
use crate::ports::selector::Selector;
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use classroom_domain::{
    ClassMood, ClassroomSession, DomainError, LogEntry, Reaction, RoundEntry, RoundPolicy,
    Selection, StudentId, StudentStatus, sanitize_reaction, sanitize_selection,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Default deadline for a single reactor invocation
const DEFAULT_REACTOR_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur during round execution.
///
/// These are all client-fixable input problems; capability failures are
/// absorbed, never surfaced here.
#[derive(Error, Debug)]
pub enum RunRoundError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),
}

/// Input for the RunRound use case
#[derive(Debug, Clone)]
pub struct RunRoundInput {
    /// What the teacher just said.
    pub utterance: String,
}

impl RunRoundInput {
    pub fn new(utterance: impl Into<String>) -> Self {
        Self {
            utterance: utterance.into(),
        }
    }
}

/// What one completed round hands back besides the mutated session
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    /// The sanitized selection, for rendering and telemetry.
    pub selection: Selection,
    /// The history record the caller appends and persists.
    pub entry: RoundEntry,
}

/// Use case for processing one classroom round
pub struct RunRoundUseCase {
    selector: Arc<dyn Selector>,
    reactor: Arc<dyn Reactor>,
    policy: RoundPolicy,
    reactor_timeout: Duration,
    transcript: Arc<dyn TranscriptLogger>,
}

impl RunRoundUseCase {
    pub fn new(selector: Arc<dyn Selector>, reactor: Arc<dyn Reactor>) -> Self {
        Self {
            selector,
            reactor,
            policy: RoundPolicy::default(),
            reactor_timeout: DEFAULT_REACTOR_TIMEOUT,
            transcript: Arc::new(NoTranscriptLogger),
        }
    }

    pub fn with_policy(mut self, policy: RoundPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_reactor_timeout(mut self, timeout: Duration) -> Self {
        self.reactor_timeout = timeout;
        self
    }

    pub fn with_transcript_logger(mut self, transcript: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = transcript;
        self
    }

    pub fn policy(&self) -> &RoundPolicy {
        &self.policy
    }

    /// Execute one round with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunRoundInput,
        session: &mut ClassroomSession,
    ) -> Result<RoundOutcome, RunRoundError> {
        self.execute_with_observer(input, session, &NoRoundObserver)
            .await
    }

    /// Execute one round with progress callbacks.
    ///
    /// The session is mutated in place and must not be shared with any
    /// reader while the call is in flight; `&mut` enforces the
    /// single-writer rule for Rust callers.
    pub async fn execute_with_observer(
        &self,
        input: RunRoundInput,
        session: &mut ClassroomSession,
        observer: &dyn RoundObserver,
    ) -> Result<RoundOutcome, RunRoundError> {
        // Step 1: validate before touching anything.
        let utterance = input.utterance.trim().to_string();
        if utterance.is_empty() {
            return Err(DomainError::EmptyUtterance.into());
        }
        session.validate()?;

        let new_round = session.round_num + 1;
        info!(
            "Round {} of {}: \"{}\"",
            new_round,
            session.session_id,
            utterance
        );

        // Step 2: select once, sanitize always.
        let raw_selection = match self.selector.select(&utterance, session).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Selector failed, degrading to fallback selection: {}", e);
                self.transcript.log(TranscriptEvent::new(
                    "selector_fallback",
                    json!({ "round": new_round, "error": e.to_string() }),
                ));
                serde_json::Value::Null
            }
        };
        let selection = sanitize_selection(&raw_selection, session, &self.policy);
        debug!(
            "Round {}: simulating {:?}, question={}, bloom={}",
            new_round,
            selection.students_to_simulate,
            selection.teacher_asked_question,
            selection.bloom_level
        );

        self.transcript.log(TranscriptEvent::new(
            "round_started",
            json!({
                "round": new_round,
                "sentence": utterance,
                "simulated": selection
                    .students_to_simulate
                    .iter()
                    .map(|id| id.as_str())
                    .collect::<Vec<_>>(),
                "teacher_asked_question": selection.teacher_asked_question,
            }),
        ));
        observer.on_round_start(new_round, selection.simulate_count());

        // Step 3: concurrent fan-out, joined before any merge.
        let raw_reactions = self
            .fan_out(&utterance, session, &selection, new_round, observer)
            .await;

        // Everything below is synchronous: no reader can observe a
        // half-merged session across an await point.
        let hands_before = session.hand_queue.len();

        // Step 4: merge simulated students in request order.
        for (index, id) in selection.students_to_simulate.iter().enumerate() {
            let Some(current_status) = session.student(id).map(|s| s.state.status) else {
                continue;
            };
            let reaction = raw_reactions[index]
                .as_ref()
                .map(|raw| sanitize_reaction(raw, &self.policy))
                .unwrap_or_else(|| Reaction::neutral(current_status));
            self.merge_reaction(session, id, &reaction, new_round);
        }

        // Step 5: passive decay and escalation for everyone else.
        self.decay_idle(session, &selection);

        let hands_after = session.hand_queue.len();
        let engagement_snapshot = session.average_attention();

        // Step 6: log entries; a called-on student speaks their pending
        // question and lowers their hand.
        session.log.push(LogEntry::teacher(new_round, utterance.clone()));
        let student_spoke_id = self.speak_if_called_on(session, &selection, new_round);

        // Step 7: counters and topic signal.
        session.round_num = new_round;
        session.time_since_question = if selection.teacher_asked_question {
            0
        } else {
            session.time_since_question + 1
        };
        if let Some(topic) = &selection.topic_update {
            session.topic = topic.clone();
        }

        let entry = RoundEntry {
            round: new_round,
            sentence: utterance,
            bloom_level: selection.bloom_level,
            teacher_asked_question: selection.teacher_asked_question,
            student_spoke: student_spoke_id.is_some(),
            student_spoke_id: student_spoke_id.clone(),
            new_hands_raised: hands_after.saturating_sub(hands_before) as u32,
            teacher_tip: selection.teacher_tip.clone(),
            engagement_snapshot,
        };

        self.transcript.log(TranscriptEvent::new(
            "round_completed",
            json!({
                "round": new_round,
                "engagement": engagement_snapshot,
                "new_hands_raised": entry.new_hands_raised,
                "student_spoke_id": student_spoke_id.as_ref().map(|id| id.as_str()),
            }),
        ));
        observer.on_round_complete(new_round);

        Ok(RoundOutcome { selection, entry })
    }

    /// Invoke the reactor for every selected student concurrently and
    /// wait for all of them to settle. Results come back in request
    /// order; a failed or timed-out slot stays `None` and merges as the
    /// neutral no-op.
    async fn fan_out(
        &self,
        utterance: &str,
        session: &ClassroomSession,
        selection: &Selection,
        new_round: u32,
        observer: &dyn RoundObserver,
    ) -> Vec<Option<serde_json::Value>> {
        let class_mood = ClassMood::derive(session);
        let last_student_entry = session.last_student_entry().cloned();

        let mut join_set = JoinSet::new();
        for (index, id) in selection.students_to_simulate.iter().enumerate() {
            let Some(student) = session.student(id) else {
                continue;
            };
            let request = ReactionRequest {
                student_id: id.clone(),
                persona: student.persona.clone(),
                state: student.state.clone(),
                utterance: utterance.to_string(),
                class_log: session.log.clone(),
                class_mood,
                last_student_entry: last_student_entry.clone(),
                teacher_asked_question: selection.teacher_asked_question,
            };
            let reactor = Arc::clone(&self.reactor);
            let deadline = self.reactor_timeout;

            join_set.spawn(async move {
                let result = match tokio::time::timeout(deadline, reactor.react(&request)).await {
                    Ok(inner) => inner,
                    Err(_) => Err(ReactorError::Timeout),
                };
                (index, result)
            });
        }

        let mut raw_reactions: Vec<Option<serde_json::Value>> =
            vec![None; selection.simulate_count()];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, Ok(value))) => {
                    let id = &selection.students_to_simulate[index];
                    debug!("Reactor for {} responded", id);
                    observer.on_student_reacted(id, true);
                    raw_reactions[index] = Some(value);
                }
                Ok((index, Err(e))) => {
                    let id = &selection.students_to_simulate[index];
                    warn!("Reactor for {} failed, substituting neutral result: {}", id, e);
                    self.transcript.log(TranscriptEvent::new(
                        "reactor_failed",
                        json!({
                            "round": new_round,
                            "student_id": id.as_str(),
                            "error": e.to_string(),
                        }),
                    ));
                    observer.on_student_reacted(id, false);
                }
                Err(e) => {
                    warn!("Reactor task join error: {}", e);
                }
            }
        }
        raw_reactions
    }

    /// Apply one sanitized reaction to one student. The hand queue moves
    /// in lockstep with the status: raising enqueues, any other status
    /// dequeues and resets the escalation counter.
    fn merge_reaction(
        &self,
        session: &mut ClassroomSession,
        id: &StudentId,
        reaction: &Reaction,
        new_round: u32,
    ) {
        if let Some(student) = session.student_mut(id) {
            let state = &mut student.state;
            state.attention += reaction.attention_delta;
            state.understanding += reaction.understanding_delta;
            state.clamp_scores();
            state.status = reaction.next_status;
            state.pending_question = reaction.pending_question.clone();
            state.last_interacted_round = new_round;
            if let Some(note) = &reaction.memory_note {
                state.push_memory(note.clone(), self.policy.memory_capacity);
            }
            if reaction.next_status != StudentStatus::HandRaised {
                state.rounds_hand_raised = 0;
            }
        }

        if reaction.next_status == StudentStatus::HandRaised {
            session.enqueue_hand(id);
        } else {
            session.dequeue_hand(id);
        }

        self.transcript.log(TranscriptEvent::new(
            "student_reacted",
            json!({
                "round": new_round,
                "student_id": id.as_str(),
                "attention_delta": reaction.attention_delta,
                "understanding_delta": reaction.understanding_delta,
                "next_status": reaction.next_status.as_str(),
                "chat_message": reaction.chat_message,
            }),
        ));
    }

    /// Fixed passive decay for everyone outside the simulate set, plus
    /// the ignored-hand escalation.
    fn decay_idle(&self, session: &mut ClassroomSession, selection: &Selection) {
        let mut frustrated_now: Vec<StudentId> = Vec::new();
        for (id, student) in session.students.iter_mut() {
            if selection.will_simulate(id) {
                continue;
            }
            let state = &mut student.state;
            state.attention =
                (state.attention - self.policy.idle_attention_decay).clamp(0.0, 100.0);

            if state.attention < self.policy.zone_out_threshold
                && state.status == StudentStatus::Listening
            {
                state.status = StudentStatus::ZonedOut;
            }

            if state.status == StudentStatus::HandRaised {
                state.rounds_hand_raised += 1;
                if state.rounds_hand_raised >= self.policy.frustration_rounds {
                    state.status = StudentStatus::Frustrated;
                    state.rounds_hand_raised = 0;
                    frustrated_now.push(id.clone());
                }
            }
        }
        for id in &frustrated_now {
            warn!("Hand from {} ignored too long, now frustrated", id);
            session.dequeue_hand(id);
        }
    }

    /// If the selection named a called-on student, append their spoken
    /// entry (the pending question, possibly empty) and lower their
    /// hand.
    fn speak_if_called_on(
        &self,
        session: &mut ClassroomSession,
        selection: &Selection,
        new_round: u32,
    ) -> Option<StudentId> {
        let called_id = selection.called_on_student_id.as_ref()?;
        let (name, content) = {
            let student = session.student(called_id)?;
            (
                student.name().to_string(),
                student.state.pending_question.clone().unwrap_or_default(),
            )
        };
        session.log.push(LogEntry::student(new_round, name, content));
        if let Some(student) = session.student_mut(called_id) {
            student.state.pending_question = None;
            if student.state.status == StudentStatus::HandRaised {
                student.state.status = StudentStatus::Listening;
            }
            student.state.rounds_hand_raised = 0;
        }
        session.dequeue_hand(called_id);
        Some(called_id.clone())
    }
}
