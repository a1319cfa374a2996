//! Content helpers that augment a question before generation.
//!
//! [`ContentSource`] supplies the retrieved context for the rag branch and the
//! quiz skeleton for the quiz branch. [`StubContent`] is a deterministic
//! stand-in: no retrieval happens, the text is derived from the topic alone.

/// Characters of the question echoed into the stub context.
pub const CONTEXT_KEYWORD_CHARS: usize = 80;

/// Supplementary text for the rag and quiz branches.
///
/// Implementations must be pure: the same topic always yields the same,
/// non-empty text.
pub trait ContentSource: Send + Sync {
    /// Context passages relevant to `topic`.
    fn retrieve_context(&self, topic: &str) -> String;

    /// Numbered list of quiz questions about `topic`.
    fn build_quiz_skeleton(&self, topic: &str) -> String;
}

/// Placeholder content: fixed wording around the topic text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubContent;

impl ContentSource for StubContent {
    fn retrieve_context(&self, topic: &str) -> String {
        let keywords: String = topic.chars().take(CONTEXT_KEYWORD_CHARS).collect();
        format!(
            "Context (stub): placeholder excerpts from the knowledge base. Keywords: {}...",
            keywords
        )
    }

    fn build_quiz_skeleton(&self, topic: &str) -> String {
        format!(
            "Quiz on \"{}\" (stub):\n\
             1) Give a short definition of the topic.\n\
             2) List 3 key features.\n\
             3) Give a practical example of its use.",
            topic
        )
    }
}
