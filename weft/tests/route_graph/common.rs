//! Shared helpers: a recording content source and runner builders.

use std::sync::{Arc, Mutex};

use weft::{ContentSource, MockGeneration, RouteRunner, StubContent};

/// Wraps `StubContent` and records every topic it was asked about.
#[derive(Default)]
pub struct RecordingContent {
    pub contexts: Mutex<Vec<String>>,
    pub quizzes: Mutex<Vec<String>>,
}

impl ContentSource for RecordingContent {
    fn retrieve_context(&self, topic: &str) -> String {
        self.contexts.lock().unwrap().push(topic.to_string());
        StubContent.retrieve_context(topic)
    }

    fn build_quiz_skeleton(&self, topic: &str) -> String {
        self.quizzes.lock().unwrap().push(topic.to_string());
        StubContent.build_quiz_skeleton(topic)
    }
}

/// Runner over a scripted mock; returns both so tests can inspect calls.
pub fn scripted_runner(
    responses: &[&str],
) -> (RouteRunner, Arc<MockGeneration>, Arc<RecordingContent>) {
    let llm = Arc::new(MockGeneration::with_responses(responses.iter().copied()));
    let content = Arc::new(RecordingContent::default());
    let runner = RouteRunner::new(llm.clone(), content.clone()).expect("route graph compiles");
    (runner, llm, content)
}
