//! Selection sanitizer: untrusted selector JSON to a strict [`Selection`]
//!
//! The selector is a generative capability, so nothing it returns is
//! trusted. This pass never fails; every malformed field degrades to a
//! safe default, and the result is guaranteed consistent with the
//! roster snapshot it was sanitized against. Sanitizing an
//! already-sanitized output is a no-op.

use crate::classroom::session::ClassroomSession;
use crate::classroom::status::StudentStatus;
use crate::core::ids::StudentId;
use crate::policy::RoundPolicy;
use crate::selection::output::{BLOOM_MAX, BLOOM_MIN, Selection};

/// Sanitize raw selector output against a roster snapshot.
///
/// Rules, applied in order:
/// 1. Hand-raised students are force-included first, in hand-queue
///    FIFO order. They are never dropped in favor of selector picks.
/// 2. Selector entries are kept in returned order when they resolve to
///    a roster id (exact id, else case-insensitive name), de-duplicated.
/// 3. An empty result with a non-empty roster falls back to exactly one
///    student: best status rank (confused, frustrated, zoned out,
///    chatting, listening), ties broken by lowest attention then lowest
///    understanding.
/// 4. The list is truncated to the simulate cap, keeping the front.
pub fn sanitize_selection(
    raw: &serde_json::Value,
    session: &ClassroomSession,
    policy: &RoundPolicy,
) -> Selection {
    let mut to_simulate: Vec<StudentId> = session
        .hand_queue
        .iter()
        .filter(|id| {
            session
                .student(id)
                .is_some_and(|s| s.state.status == StudentStatus::HandRaised)
        })
        .cloned()
        .collect();

    if let Some(list) = raw.get("students_to_simulate").and_then(|v| v.as_array()) {
        for token in list {
            let Some(token) = token.as_str() else { continue };
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let resolved = StudentId::try_new(token)
                .filter(|id| session.contains(id))
                .or_else(|| session.resolve_name(token));
            if let Some(id) = resolved
                && !to_simulate.contains(&id)
            {
                to_simulate.push(id);
            }
        }
    }

    if to_simulate.is_empty()
        && session.roster_size() > 0
        && let Some(pick) = fallback_pick(session)
    {
        to_simulate.push(pick);
    }

    to_simulate.truncate(policy.simulate_cap);

    let teacher_asked_question = raw
        .get("teacher_asked_question")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let bloom_level = raw
        .get("bloom_level")
        .and_then(|v| v.as_f64())
        .map(|level| (level.round() as i64).clamp(BLOOM_MIN as i64, BLOOM_MAX as i64) as u8)
        .unwrap_or(BLOOM_MIN);

    let called_on_student_id = raw
        .get("called_on_student_id")
        .and_then(|v| v.as_str())
        .and_then(StudentId::try_new)
        .filter(|id| session.contains(id));

    Selection {
        students_to_simulate: to_simulate,
        teacher_asked_question,
        bloom_level,
        called_on_student_id,
        teacher_tip: string_field(raw, "teacher_tip"),
        topic_update: string_field(raw, "topic_update"),
        debug_reason: string_field(raw, "debug_reason"),
    }
}

fn string_field(raw: &serde_json::Value, key: &str) -> Option<String> {
    raw.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

/// Deterministic single pick for an empty selection: worst status rank
/// first, lowest attention then understanding within it. Hand-raised
/// students carry no rank (they were force-included already); if the
/// entire roster somehow has hands up, the lowest-attention student
/// wins.
fn fallback_pick(session: &ClassroomSession) -> Option<StudentId> {
    let pick = session
        .students
        .iter()
        .filter_map(|(id, s)| {
            s.state
                .status
                .fallback_rank()
                .map(|rank| (rank, s.state.attention, s.state.understanding, id))
        })
        .min_by(|a, b| {
            a.0.cmp(&b.0)
                .then(a.1.total_cmp(&b.1))
                .then(a.2.total_cmp(&b.2))
        });

    if let Some((_, _, _, id)) = pick {
        return Some(id.clone());
    }

    session
        .students
        .iter()
        .min_by(|a, b| {
            a.1.state
                .attention
                .total_cmp(&b.1.state.attention)
                .then(a.1.state.understanding.total_cmp(&b.1.state.understanding))
        })
        .map(|(id, _)| id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classroom::persona::Persona;
    use crate::core::ids::SessionId;
    use serde_json::json;

    fn session_of(names: &[&str]) -> ClassroomSession {
        let personas: Vec<Persona> = names
            .iter()
            .map(|n| {
                serde_json::from_str(&format!(r#"{{ "identity": {{ "name": "{}" }} }}"#, n))
                    .unwrap()
            })
            .collect();
        ClassroomSession::from_roster(
            SessionId::new("session_1"),
            "Topic",
            personas,
            &RoundPolicy::default(),
        )
        .unwrap()
    }

    fn raise_hand(session: &mut ClassroomSession, id: &str) {
        let id = StudentId::new(id);
        session.student_mut(&id).unwrap().state.status = StudentStatus::HandRaised;
        session.enqueue_hand(&id);
    }

    fn set_state(
        session: &mut ClassroomSession,
        id: &str,
        status: StudentStatus,
        attention: f64,
        understanding: f64,
    ) {
        let student = session.student_mut(&StudentId::new(id)).unwrap();
        student.state.status = status;
        student.state.attention = attention;
        student.state.understanding = understanding;
    }

    #[test]
    fn test_valid_ids_pass_through() {
        let session = session_of(&["Amy", "Ben", "Cal"]);
        let raw = json!({ "students_to_simulate": ["cal_2", "amy_0"] });
        let selection = sanitize_selection(&raw, &session, &RoundPolicy::default());
        assert_eq!(
            selection.students_to_simulate,
            vec![StudentId::new("cal_2"), StudentId::new("amy_0")]
        );
    }

    #[test]
    fn test_unknown_ids_dropped_and_names_resolved() {
        let session = session_of(&["Amy", "Ben"]);
        let raw = json!({ "students_to_simulate": ["ghost_7", "BEN", "  amy  ", 42, null] });
        let selection = sanitize_selection(&raw, &session, &RoundPolicy::default());
        assert_eq!(
            selection.students_to_simulate,
            vec![StudentId::new("ben_1"), StudentId::new("amy_0")]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let session = session_of(&["Amy", "Ben"]);
        let raw = json!({ "students_to_simulate": ["amy_0", "Amy", "amy_0"] });
        let selection = sanitize_selection(&raw, &session, &RoundPolicy::default());
        assert_eq!(selection.students_to_simulate, vec![StudentId::new("amy_0")]);
    }

    #[test]
    fn test_hands_force_included_in_queue_order() {
        let mut session = session_of(&["Amy", "Ben", "Cal"]);
        raise_hand(&mut session, "cal_2");
        raise_hand(&mut session, "amy_0");
        let raw = json!({ "students_to_simulate": ["ben_1"] });
        let selection = sanitize_selection(&raw, &session, &RoundPolicy::default());
        assert_eq!(
            selection.students_to_simulate,
            vec![
                StudentId::new("cal_2"),
                StudentId::new("amy_0"),
                StudentId::new("ben_1")
            ]
        );
    }

    #[test]
    fn test_hands_included_even_with_empty_selector_list() {
        let mut session = session_of(&["Amy", "Ben"]);
        raise_hand(&mut session, "ben_1");
        let raw = json!({ "students_to_simulate": [] });
        let selection = sanitize_selection(&raw, &session, &RoundPolicy::default());
        assert_eq!(selection.students_to_simulate, vec![StudentId::new("ben_1")]);
    }

    #[test]
    fn test_cap_keeps_hands_over_selector_picks() {
        let mut session = session_of(&["A", "B", "C", "D", "E", "F", "G"]);
        for id in ["a_0", "b_1", "c_2", "d_3"] {
            raise_hand(&mut session, id);
        }
        let raw = json!({ "students_to_simulate": ["e_4", "f_5", "g_6"] });
        let selection = sanitize_selection(&raw, &session, &RoundPolicy::default());
        assert_eq!(
            selection.students_to_simulate,
            vec![
                StudentId::new("a_0"),
                StudentId::new("b_1"),
                StudentId::new("c_2"),
                StudentId::new("d_3"),
                StudentId::new("e_4"),
            ]
        );
    }

    #[test]
    fn test_cap_keeps_longest_waiting_hands() {
        let mut session = session_of(&["A", "B", "C", "D", "E", "F", "G"]);
        for id in ["g_6", "f_5", "e_4", "d_3", "c_2", "b_1"] {
            raise_hand(&mut session, id);
        }
        let raw = json!({ "students_to_simulate": [] });
        let selection = sanitize_selection(&raw, &session, &RoundPolicy::default());
        assert_eq!(
            selection.students_to_simulate,
            vec![
                StudentId::new("g_6"),
                StudentId::new("f_5"),
                StudentId::new("e_4"),
                StudentId::new("d_3"),
                StudentId::new("c_2"),
            ]
        );
    }

    #[test]
    fn test_fallback_prefers_status_rank() {
        let mut session = session_of(&["Amy", "Ben", "Cal"]);
        set_state(&mut session, "amy_0", StudentStatus::Listening, 5.0, 5.0);
        set_state(&mut session, "ben_1", StudentStatus::Chatting, 90.0, 90.0);
        set_state(&mut session, "cal_2", StudentStatus::Confused, 95.0, 95.0);
        let raw = json!({ "students_to_simulate": [] });
        let selection = sanitize_selection(&raw, &session, &RoundPolicy::default());
        // Confused outranks everything, even at high attention.
        assert_eq!(selection.students_to_simulate, vec![StudentId::new("cal_2")]);
    }

    #[test]
    fn test_fallback_ties_break_by_attention_then_understanding() {
        let mut session = session_of(&["Amy", "Ben", "Cal"]);
        set_state(&mut session, "amy_0", StudentStatus::Confused, 50.0, 30.0);
        set_state(&mut session, "ben_1", StudentStatus::Confused, 40.0, 80.0);
        set_state(&mut session, "cal_2", StudentStatus::Confused, 40.0, 20.0);
        let raw = json!({});
        let selection = sanitize_selection(&raw, &session, &RoundPolicy::default());
        assert_eq!(selection.students_to_simulate, vec![StudentId::new("cal_2")]);
    }

    #[test]
    fn test_selector_failure_payload_degrades_to_fallback() {
        let session = session_of(&["Amy"]);
        let selection =
            sanitize_selection(&serde_json::Value::Null, &session, &RoundPolicy::default());
        assert_eq!(selection.students_to_simulate, vec![StudentId::new("amy_0")]);
        assert!(!selection.teacher_asked_question);
        assert_eq!(selection.bloom_level, 1);
        assert!(selection.called_on_student_id.is_none());
    }

    #[test]
    fn test_bloom_level_clamped() {
        let session = session_of(&["Amy"]);
        let policy = RoundPolicy::default();
        let cases = [
            (json!({ "bloom_level": 9 }), 6),
            (json!({ "bloom_level": 0 }), 1),
            (json!({ "bloom_level": -3 }), 1),
            (json!({ "bloom_level": 3.7 }), 4),
            (json!({ "bloom_level": "three" }), 1),
            (json!({}), 1),
        ];
        for (raw, expected) in cases {
            let selection = sanitize_selection(&raw, &session, &policy);
            assert_eq!(selection.bloom_level, expected, "raw: {}", raw);
        }
    }

    #[test]
    fn test_called_on_requires_exact_roster_id() {
        let session = session_of(&["Amy", "Ben"]);
        let policy = RoundPolicy::default();

        let raw = json!({ "called_on_student_id": "ben_1" });
        let selection = sanitize_selection(&raw, &session, &policy);
        assert_eq!(selection.called_on_student_id, Some(StudentId::new("ben_1")));

        // Display names are not resolved for called-on.
        let raw = json!({ "called_on_student_id": "Ben" });
        let selection = sanitize_selection(&raw, &session, &policy);
        assert!(selection.called_on_student_id.is_none());

        let raw = json!({ "called_on_student_id": 3 });
        let selection = sanitize_selection(&raw, &session, &policy);
        assert!(selection.called_on_student_id.is_none());
    }

    #[test]
    fn test_non_string_signal_fields_nulled() {
        let session = session_of(&["Amy"]);
        let raw = json!({
            "teacher_tip": 12,
            "topic_update": { "topic": "x" },
            "debug_reason": true,
            "teacher_asked_question": "yes"
        });
        let selection = sanitize_selection(&raw, &session, &RoundPolicy::default());
        assert!(selection.teacher_tip.is_none());
        assert!(selection.topic_update.is_none());
        assert!(selection.debug_reason.is_none());
        assert!(!selection.teacher_asked_question);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let mut session = session_of(&["Amy", "Ben", "Cal"]);
        raise_hand(&mut session, "ben_1");
        let raw = json!({
            "students_to_simulate": ["Cal", "ghost_1", "amy_0"],
            "teacher_asked_question": true,
            "bloom_level": 11,
            "called_on_student_id": "ben_1",
            "teacher_tip": "Try wait time.",
            "topic_update": null,
            "debug_reason": "test"
        });
        let policy = RoundPolicy::default();
        let first = sanitize_selection(&raw, &session, &policy);
        let second = sanitize_selection(
            &serde_json::to_value(&first).unwrap(),
            &session,
            &policy,
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_cap_respected() {
        let mut session = session_of(&["A", "B", "C"]);
        raise_hand(&mut session, "a_0");
        let raw = json!({ "students_to_simulate": ["b_1", "c_2"] });
        let policy = RoundPolicy::default().with_simulate_cap(2);
        let selection = sanitize_selection(&raw, &session, &policy);
        assert_eq!(
            selection.students_to_simulate,
            vec![StudentId::new("a_0"), StudentId::new("b_1")]
        );
    }
}
