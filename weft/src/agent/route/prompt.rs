//! Prompt templates and sampling temperatures for the route graph nodes.

/// Router instruction; the model is asked for exactly one label.
pub const ROUTER_INSTRUCTION: &str = "You are a request router. Reply with ONE word: \
'direct' if the question can be answered directly; \
'rag' if external context is needed; \
'quiz' if the user asks for a test, quiz or questions.";

pub const DIRECT_INSTRUCTION: &str =
    "Answer briefly and to the point in 1-2 paragraphs; add a list if it helps.";

pub const RAG_INSTRUCTION: &str = "Answer using the provided context. \
If the context does not contain the answer, say so explicitly.";

pub const QUIZ_INSTRUCTION: &str =
    "Format the quiz neatly: add a short hint and a grading criterion to each question.";

pub const QUIZ_FORMAT: &str =
    "Format: keep the numbered list of questions; under each one give one hint and one criterion.";

pub const ROUTER_TEMPERATURE: f32 = 0.0;
pub const DIRECT_TEMPERATURE: f32 = 0.2;
pub const RAG_TEMPERATURE: f32 = 0.2;
pub const QUIZ_TEMPERATURE: f32 = 0.3;

pub fn router_prompt(question: &str) -> String {
    format!("{ROUTER_INSTRUCTION}\n\nQuestion: {question}\nAnswer:")
}

pub fn direct_prompt(question: &str) -> String {
    format!("{DIRECT_INSTRUCTION}\n\nQuestion: {question}")
}

/// Embeds `context` and `question` verbatim.
pub fn rag_prompt(context: &str, question: &str) -> String {
    format!("{RAG_INSTRUCTION}\n\n[CONTEXT]\n{context}\n\n[QUESTION]\n{question}\n\nAnswer:")
}

pub fn quiz_prompt(skeleton: &str) -> String {
    format!("{QUIZ_INSTRUCTION}\n\n{skeleton}\n\n{QUIZ_FORMAT}")
}
