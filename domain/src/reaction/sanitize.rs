//! Reaction sanitizer: untrusted reactor JSON to a strict [`Reaction`]

use crate::classroom::status::StudentStatus;
use crate::policy::RoundPolicy;
use crate::reaction::output::Reaction;

/// Sanitize raw reactor output.
///
/// Deltas clamp into [-max_delta, +max_delta] with non-numeric values
/// treated as zero. An unknown `next_status` falls back to `listening`
/// (a missing one too, matching the wire contract: the status field is
/// required, so its absence is itself malformed output). Overlong
/// memory notes are dropped whole, never truncated.
pub fn sanitize_reaction(raw: &serde_json::Value, policy: &RoundPolicy) -> Reaction {
    let attention_delta = delta_field(raw, "attention_delta", policy.max_delta);
    let understanding_delta = delta_field(raw, "understanding_delta", policy.max_delta);

    let next_status = raw
        .get("next_status")
        .and_then(|v| v.as_str())
        .map(StudentStatus::parse_lenient)
        .unwrap_or(StudentStatus::Listening);

    let memory_note = raw
        .get("memory_note")
        .and_then(|v| v.as_str())
        .filter(|note| note.chars().count() < policy.max_note_chars)
        .map(|note| note.to_string());

    Reaction {
        attention_delta,
        understanding_delta,
        next_status,
        pending_question: string_field(raw, "pending_question"),
        chat_message: string_field(raw, "chat_message"),
        memory_note,
    }
}

fn delta_field(raw: &serde_json::Value, key: &str, max_delta: f64) -> f64 {
    raw.get(key)
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
        .clamp(-max_delta, max_delta)
}

fn string_field(raw: &serde_json::Value, key: &str) -> Option<String> {
    raw.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed_reaction_passes_through() {
        let raw = json!({
            "attention_delta": 8,
            "understanding_delta": -4.5,
            "next_status": "hand_raised",
            "pending_question": "Can you repeat the last part?",
            "chat_message": null,
            "memory_note": "Teacher said the quiz is Friday."
        });
        let reaction = sanitize_reaction(&raw, &RoundPolicy::default());
        assert_eq!(reaction.attention_delta, 8.0);
        assert_eq!(reaction.understanding_delta, -4.5);
        assert_eq!(reaction.next_status, StudentStatus::HandRaised);
        assert_eq!(
            reaction.pending_question.as_deref(),
            Some("Can you repeat the last part?")
        );
        assert!(reaction.chat_message.is_none());
        assert_eq!(
            reaction.memory_note.as_deref(),
            Some("Teacher said the quiz is Friday.")
        );
    }

    #[test]
    fn test_deltas_clamped_to_bounds() {
        let raw = json!({ "attention_delta": 1000, "understanding_delta": -1000 });
        let reaction = sanitize_reaction(&raw, &RoundPolicy::default());
        assert_eq!(reaction.attention_delta, 20.0);
        assert_eq!(reaction.understanding_delta, -20.0);
    }

    #[test]
    fn test_non_numeric_deltas_become_zero() {
        let raw = json!({ "attention_delta": "lots", "understanding_delta": null });
        let reaction = sanitize_reaction(&raw, &RoundPolicy::default());
        assert_eq!(reaction.attention_delta, 0.0);
        assert_eq!(reaction.understanding_delta, 0.0);
    }

    #[test]
    fn test_unknown_status_falls_back_to_listening() {
        let raw = json!({ "next_status": "daydreaming" });
        let reaction = sanitize_reaction(&raw, &RoundPolicy::default());
        assert_eq!(reaction.next_status, StudentStatus::Listening);

        let raw = json!({});
        let reaction = sanitize_reaction(&raw, &RoundPolicy::default());
        assert_eq!(reaction.next_status, StudentStatus::Listening);
    }

    #[test]
    fn test_overlong_memory_note_dropped_not_truncated() {
        let long_note = "x".repeat(100);
        let raw = json!({ "memory_note": long_note });
        let reaction = sanitize_reaction(&raw, &RoundPolicy::default());
        assert!(reaction.memory_note.is_none());

        let ok_note = "x".repeat(99);
        let raw = json!({ "memory_note": ok_note });
        let reaction = sanitize_reaction(&raw, &RoundPolicy::default());
        assert_eq!(reaction.memory_note.as_deref(), Some(ok_note.as_str()));
    }

    #[test]
    fn test_note_limit_counts_characters_not_bytes() {
        let note = "é".repeat(99);
        let raw = json!({ "memory_note": note });
        let reaction = sanitize_reaction(&raw, &RoundPolicy::default());
        assert!(reaction.memory_note.is_some());
    }

    #[test]
    fn test_non_string_texts_nulled() {
        let raw = json!({ "pending_question": 7, "chat_message": ["hi"], "memory_note": 3.2 });
        let reaction = sanitize_reaction(&raw, &RoundPolicy::default());
        assert!(reaction.pending_question.is_none());
        assert!(reaction.chat_message.is_none());
        assert!(reaction.memory_note.is_none());
    }

    #[test]
    fn test_garbage_payload_yields_listening_noop() {
        let reaction = sanitize_reaction(&serde_json::Value::Null, &RoundPolicy::default());
        assert_eq!(reaction.attention_delta, 0.0);
        assert_eq!(reaction.next_status, StudentStatus::Listening);
        assert!(reaction.memory_note.is_none());
    }
}
