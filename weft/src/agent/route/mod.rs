//! Route agent: classify a question, then answer it on one of three branches.
//!
//! Graph: START → router → answer_direct | answer_rag | answer_quiz → END.

mod answer_nodes;
mod prompt;
mod router_node;
mod runner;

pub use answer_nodes::{DirectAnswerNode, QuizAnswerNode, RagAnswerNode};
pub use prompt::{
    direct_prompt, quiz_prompt, rag_prompt, router_prompt, DIRECT_TEMPERATURE, QUIZ_TEMPERATURE,
    RAG_TEMPERATURE, ROUTER_TEMPERATURE,
};
pub use router_node::{classify_route, RouterNode, CONTEXT_TOKENS, QUIZ_TOKENS};
pub use runner::{
    route_edge, RouteRunError, RouteRunner, ANSWER_DIRECT, ANSWER_QUIZ, ANSWER_RAG, ROUTER,
};
