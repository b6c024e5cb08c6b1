//! Instruction builders for each debate role.
//!
//! Prompt versioning: bump `PROMPT_VERSION` whenever instruction wording
//! changes, so a transcript can be traced back to the prompts that produced it.

use coordination::debate::{ParticipantRole, MEMORY_SENTINEL};

/// Prompt version. Bump on any wording change.
pub const PROMPT_VERSION: &str = "1.0.0";

/// Persona framing: how each role argues and what it is asked for.
struct Persona {
    style: &'static str,
    ask: &'static str,
}

fn persona(role: ParticipantRole) -> Persona {
    match role {
        ParticipantRole::Scientist => Persona {
            style: "Argue with facts, evidence, and logic.",
            ask: "Now give your next argument (1–2 sentences).",
        },
        ParticipantRole::Philosopher => Persona {
            style: "Argue with reasoning, ethics, and philosophy.",
            ask: "Now give your next counter-argument (1–2 sentences).",
        },
    }
}

/// Instruction for one debater turn. An empty `context` is rendered as the
/// memory sentinel.
pub fn debater_instruction(role: ParticipantRole, topic: &str, context: &str) -> String {
    let persona = persona(role);
    let context = if context.trim().is_empty() {
        MEMORY_SENTINEL
    } else {
        context
    };
    format!(
        "You are a {role} debating on the topic: {topic}.\n\
         {style}\n\
         Context: {context}\n\n\
         {ask}",
        style = persona.style,
        ask = persona.ask,
    )
}

/// Instruction asking for a 3–4 sentence running summary of `transcript`.
pub fn memory_instruction(transcript: &str) -> String {
    format!(
        "Summarize the debate so far in 3–4 sentences, focusing on key points.\n\
         Debate so far:\n{transcript}"
    )
}

/// Instruction for the final adjudication, requiring a literal winner line.
pub fn judge_instruction(topic: &str, transcript: &str) -> String {
    let [first, second] = ParticipantRole::ALL;
    format!(
        "You are the judge of a debate on '{topic}'.\n\
         Here is the full debate:\n\
         {transcript}\n\n\
         Task:\n\
         1. Summarize the debate.\n\
         2. Explicitly declare the winner in this format: 'Winner: {first}' or 'Winner: {second}'.\n\
         3. Justify your decision clearly."
    )
}
