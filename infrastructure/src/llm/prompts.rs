//! Prompt construction for the selector and reactor capabilities
//!
//! Prompts ask for JSON only; the domain sanitizers treat the reply as
//! untrusted regardless, so wording here shapes quality, not safety.

use classroom_application::ports::reactor::ReactionRequest;
use classroom_domain::ClassroomSession;

/// Log lines shown to a reacting student
const REACTOR_LOG_WINDOW: usize = 10;
/// Memory notes quoted back to a reacting student
const REACTOR_MEMORY_WINDOW: usize = 3;

pub const SELECTOR_SYSTEM_PROMPT: &str = r#"You are a classroom orchestrator AI. Your job is to decide which students should be actively simulated this round based on what the teacher said.

Your decisions should be:
1. Strategic - simulate students most likely to have a visible reaction
2. Efficient - don't simulate everyone every round (0-5 students max)
3. Pedagogically aware - detect Bloom's taxonomy level and teaching patterns

Bloom's Taxonomy Levels:
1 = Remembering (recall facts)
2 = Understanding (explain concepts)
3 = Applying (use knowledge in new situations)
4 = Analyzing (break down information)
5 = Evaluating (make judgments)
6 = Creating (produce new work)

Student Status Types:
- listening: paying attention, no visible reaction needed
- confused: lost, might need checking in
- hand_raised: wants to speak, definitely simulate
- zoned_out: disengaged, might need calling on
- chatting: distracted, might need intervention
- frustrated: ignored or overwhelmed, needs attention

Return JSON only:
{
  "students_to_simulate": [<array of 0-5 student IDs>],
  "teacher_asked_question": <boolean>,
  "bloom_level": <number 1-6>,
  "called_on_student_id": <string or null>,
  "teacher_tip": <string or null>,
  "topic_update": <string or null>,
  "debug_reason": <string or null>
}

Guidelines:
- ALWAYS simulate students with hand_raised (they want to speak)
- ALWAYS choose at least 1 student to simulate if there is at least 1 student in the room
- Simulate confused/frustrated students if teacher is explaining
- Simulate zoned_out students if teacher asks a question (cold call opportunity)
- If teacher just lectured, simulate 1-2 students max
- If teacher asked a question, simulate 3-5 students
- teacher_tip: optional 1-sentence coaching advice
- called_on_student_id: set this if teacher explicitly called on someone by name OR if you recommend calling on someone from the hand queue
- topic_update: if the subject matter clearly changed"#;

/// Build the per-round selector user prompt from the current session
pub fn selector_user_prompt(utterance: &str, session: &ClassroomSession) -> String {
    let student_summary = session
        .students
        .iter()
        .map(|(id, s)| {
            let pending = match &s.state.pending_question {
                Some(q) => format!(", wants to ask: \"{}\"", q),
                None => String::new(),
            };
            format!(
                "- {} ({}): {}, attention={:.1}, understanding={:.1}{}",
                s.name(),
                id,
                s.state.status,
                s.state.attention,
                s.state.understanding,
                pending
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let recent_log = if session.log.is_empty() {
        "(no activity yet)".to_string()
    } else {
        session
            .log
            .iter()
            .map(|e| e.as_transcript_line())
            .collect::<Vec<_>>()
            .join("\n")
    };

    let hand_queue = if session.hand_queue.is_empty() {
        "(empty)".to_string()
    } else {
        session
            .hand_queue
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Teacher just said: \"{}\"\n\n\
         Current topic: {}\n\
         Rounds since teacher last asked a question: {}\n\
         Hand queue (oldest first): {}\n\n\
         Recent class activity:\n{}\n\n\
         Current student states:\n{}\n\n\
         Decide which students to simulate and analyze the teacher's pedagogical approach.\n\
         Return JSON only.",
        utterance,
        if session.topic.is_empty() {
            "not set yet"
        } else {
            &session.topic
        },
        session.time_since_question,
        hand_queue,
        recent_log,
        student_summary
    )
}

/// Build the per-student reactor system prompt from the persona
pub fn reactor_system_prompt(request: &ReactionRequest) -> String {
    let persona = &request.persona;
    let style = &persona.communication_style;
    format!(
        "You are {}, age {}.\n\n\
         Background: {}\n\n\
         Personality (Big Five):\n\
         - Openness: {} (0 = traditional, 1 = curious)\n\
         - Conscientiousness: {} (0 = spontaneous, 1 = organized)\n\
         - Extraversion: {} (0 = reserved, 1 = outgoing)\n\
         - Agreeableness: {} (0 = competitive, 1 = cooperative)\n\
         - Emotionality: {} (0 = stable, 1 = sensitive)\n\n\
         Communication style:\n{}\n\
         Example phrases you naturally use: {}\n\
         Confidence: {}\n\
         Willingness to speak up: {}\n\n\
         Current emotional state:\n\
         - Mood: {}\n\
         - Energy: {}\n\n\
         ---\n\n\
         Your task: React to what the teacher just said. Output JSON only.\n\n\
         Return format:\n\
         {{\n\
           \"attention_delta\": <number from -20 to +20>,\n\
           \"understanding_delta\": <number from -20 to +20>,\n\
           \"next_status\": <\"listening\" | \"confused\" | \"hand_raised\" | \"zoned_out\" | \"chatting\" | \"frustrated\">,\n\
           \"pending_question\": <string or null>,\n\
           \"chat_message\": <string or null>,\n\
           \"memory_note\": <string or null>\n\
         }}\n\n\
         Guidelines:\n\
         - attention_delta: how much your focus changed (+10 if engaging, -5 if boring, -15 if completely lost)\n\
         - understanding_delta: how much you learned (+5 if clear, -10 if confusing, 0 if neutral)\n\
         - next_status: your new state after hearing this\n\
         - pending_question: if you want to raise your hand, write the question you'd ask\n\
         - chat_message: if you're distracted and messaging a friend, write what you'd say\n\
         - memory_note: if something important happened, write a 1-sentence note for yourself\n\n\
         Be realistic based on your personality. Extraverts speak up more. Low conscientiousness = distracted easier. High emotionality = react stronger to confusion.",
        persona.identity.name,
        persona.identity.age,
        persona.identity.background_summary,
        persona.personality.openness,
        persona.personality.conscientiousness,
        persona.personality.extraversion,
        persona.personality.agreeableness,
        persona.personality.emotionality,
        style.summary,
        style.example_phrases.join(", "),
        style.confidence,
        style.willingness_to_speak_up,
        request.state.mood,
        request.state.energy,
    )
}

/// Build the per-student reactor user prompt from the round context
pub fn reactor_user_prompt(request: &ReactionRequest) -> String {
    let log_tail = request
        .class_log
        .iter()
        .rev()
        .take(REACTOR_LOG_WINDOW)
        .rev()
        .map(|e| e.as_transcript_line())
        .collect::<Vec<_>>()
        .join("\n");
    let log_tail = if log_tail.is_empty() {
        "(nothing yet)".to_string()
    } else {
        log_tail
    };

    let last_student = match &request.last_student_entry {
        Some(entry) => format!(
            "Last student who spoke: {}\nWhat they said: \"{}\"",
            entry.speaker, entry.content
        ),
        None => "No student has spoken yet.".to_string(),
    };

    let memory = request
        .state
        .memory
        .iter()
        .rev()
        .take(REACTOR_MEMORY_WINDOW)
        .rev()
        .cloned()
        .collect::<Vec<_>>()
        .join(" | ");
    let memory = if memory.is_empty() {
        "nothing yet".to_string()
    } else {
        memory
    };

    format!(
        "Teacher just said: \"{}\"\n\
         Teacher asked a question: {}\n\n\
         Class context (what you heard recently):\n{}\n\n\
         {}\n\n\
         Your current state:\n\
         - Attention: {:.1}/100\n\
         - Understanding: {:.1}/100\n\
         - Status: {}\n\
         - Your recent memory: {}\n\n\
         Class mood right now: {}\n\n\
         React to the teacher's input. Return JSON only.",
        request.utterance,
        request.teacher_asked_question,
        log_tail,
        last_student,
        request.state.attention,
        request.state.understanding,
        request.state.status,
        memory,
        request.class_mood,
    )
}
