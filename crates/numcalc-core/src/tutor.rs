use tracing::warn;

use crate::conversation::Message;
use crate::llm::CompletionClient;

/// How many recent turns of the conversation are sent along with a new
/// question. Older turns are dropped, not summarized; the chapter notes
/// carry most of the context anyway.
pub const HISTORY_WINDOW: usize = 10;

/// Shown when the service answers with an empty payload.
pub const FALLBACK_APOLOGY: &str =
    "Sorry, I could not come up with an answer just now. Please try again in a moment.";

const PREAMBLE: &str = "\
You are a world-class teaching assistant for a university course on numerical methods.

Answer the student's latest question using the course notes and the recent
conversation below. Requirements:

1. Be accurate, and explain from the ground up at an undergraduate level.
2. Write every mathematical formula in LaTeX: inline math wrapped in single $,
   display math on its own line wrapped in $$.
3. If the question goes beyond the notes, answer from your own expertise but
   say briefly that it is supplementary material.
4. Emphasize the physical and geometric meaning of each concept and the
   easy-to-get-wrong steps in each calculation.
5. Keep the tone warm and encouraging.
6. Follow the thread: if the student is asking a follow-up, build on the
   earlier exchange.";

/// Turns a question plus context into one remote completion call.
///
/// A `Tutor` without a client is the disabled sentinel for missing
/// credentials: every `ask` returns `None` without touching the network.
pub struct Tutor {
    client: Option<Box<dyn CompletionClient>>,
}

impl Tutor {
    pub fn new(client: Box<dyn CompletionClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Tutor with no credentials configured.
    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Ask the tutoring service one question.
    ///
    /// `history` is the full transcript for the active topic; only the last
    /// [`HISTORY_WINDOW`] entries make it into the prompt. Returns `None`
    /// on an empty question, missing credentials, or any service failure;
    /// the caller reads `None` as "nothing appended, retry allowed". Never
    /// mutates the transcript itself.
    pub async fn ask(&self, question: &str, history: &[Message], context: &str) -> Option<String> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }

        let client = match &self.client {
            Some(client) => client,
            None => {
                warn!("tutor is disabled: no API key configured");
                return None;
            }
        };

        let prompt = build_prompt(question, history, context);

        match client.generate(&prompt).await {
            Ok(Some(text)) => Some(text),
            Ok(None) => Some(FALLBACK_APOLOGY.to_string()),
            Err(e) => {
                warn!(error = %e, "tutor request failed");
                None
            }
        }
    }
}

/// Deterministic prompt layout: preamble, course notes, the recent
/// conversation oldest-first, then the new question.
pub fn build_prompt(question: &str, history: &[Message], context: &str) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    let history_text = history[start..]
        .iter()
        .map(|msg| format!("{}: {}", msg.role.label(), msg.content))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{PREAMBLE}\n\n\
         [Course notes]:\n{context}\n\n\
         [Conversation so far]:\n{history_text}\n\n\
         [Student's latest question]:\n{question}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Role;

    fn turn(role: Role, content: &str, ts: i64) -> Message {
        Message::new(role, content, ts)
    }

    #[test]
    fn prompt_contains_all_blocks() {
        let history = vec![
            turn(Role::User, "What is bisection?", 1),
            turn(Role::Model, "Halve the bracket.", 2),
        ];
        let prompt = build_prompt("How many steps?", &history, "## Bisection notes");

        assert!(prompt.contains("[Course notes]:\n## Bisection notes"));
        assert!(prompt.contains("Student: What is bisection?"));
        assert!(prompt.contains("Tutor: Halve the bracket."));
        assert!(prompt.contains("[Student's latest question]:\nHow many steps?"));
    }

    #[test]
    fn history_window_keeps_only_last_ten() {
        let history: Vec<Message> = (0..15)
            .map(|i| turn(Role::User, &format!("question-{i}"), i))
            .collect();
        let prompt = build_prompt("latest", &history, "notes");

        for i in 0..5 {
            assert!(!prompt.contains(&format!("question-{i}\n")), "turn {i} leaked");
        }
        for i in 5..15 {
            assert!(prompt.contains(&format!("question-{i}")), "turn {i} missing");
        }
    }

    #[test]
    fn history_window_preserves_order() {
        let history: Vec<Message> = (0..12)
            .map(|i| turn(Role::User, &format!("q{i:02}"), i))
            .collect();
        let prompt = build_prompt("latest", &history, "notes");

        let a = prompt.find("q02").unwrap();
        let b = prompt.find("q07").unwrap();
        let c = prompt.find("q11").unwrap();
        assert!(a < b && b < c);
    }
}
