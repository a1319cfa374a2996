//! End-to-end runs of the route graph against scripted and prompt-driven mocks.

use std::collections::HashSet;
use std::sync::Arc;

use weft::agent::{direct_prompt, ANSWER_DIRECT, ANSWER_QUIZ, ANSWER_RAG, ROUTER};
use weft::content::ContentSource;
use weft::{
    AgentError, GenerationError, MockGeneration, Route, RouteRunError, RouteRunner, RouteState,
    StreamEvent, StreamMode, StubContent,
};

use tokio_stream::StreamExt;

use crate::common::scripted_runner;

/// **Scenario**: an empty question routes to direct; the answer prompt carries the
/// brevity instruction with an empty question.
#[tokio::test]
async fn empty_question_goes_direct_with_brevity_prompt() {
    let (runner, llm, content) = scripted_runner(&["", "Nothing was asked."]);

    let state = runner.invoke("").await.unwrap();

    assert_eq!(state.route, Some(Route::Direct));
    assert_eq!(state.answer(), "Nothing was asked.");
    let calls = llm.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].temperature, 0.0);
    assert_eq!(calls[1].prompt, direct_prompt(""));
    assert_eq!(calls[1].temperature, 0.2);
    assert!(content.contexts.lock().unwrap().is_empty());
    assert!(content.quizzes.lock().unwrap().is_empty());
}

/// **Scenario**: classifier says "quiz"; the quiz branch builds a skeleton for the
/// question and annotates it at temperature 0.3.
#[tokio::test]
async fn quiz_label_builds_and_annotates_skeleton() {
    let (runner, llm, content) = scripted_runner(&["quiz", "1) Define recursion. Hint: ..."]);

    let answer = runner.run("Make a quiz about recursion").await.unwrap();

    assert_eq!(answer, "1) Define recursion. Hint: ...");
    assert_eq!(
        *content.quizzes.lock().unwrap(),
        vec!["Make a quiz about recursion".to_string()]
    );
    let calls = llm.calls();
    assert_eq!(calls.len(), 2);
    let skeleton = StubContent.build_quiz_skeleton("Make a quiz about recursion");
    assert!(calls[1].prompt.contains(&skeleton));
    assert_eq!(calls[1].temperature, 0.3);
}

/// **Scenario**: "need context search" selects rag; the prompt holds the retrieved
/// context and the question verbatim.
#[tokio::test]
async fn context_label_answers_from_retrieved_context() {
    let (runner, llm, content) =
        scripted_runner(&["need context search", "Policy X says ..."]);

    let state = runner.invoke("Explain company policy X").await.unwrap();

    assert_eq!(state.route, Some(Route::Rag));
    assert_eq!(state.answer(), "Policy X says ...");
    assert_eq!(
        *content.contexts.lock().unwrap(),
        vec!["Explain company policy X".to_string()]
    );
    let prompt = &llm.calls()[1].prompt;
    let context = StubContent.retrieve_context("Explain company policy X");
    assert!(prompt.contains(&format!("[CONTEXT]\n{context}\n")));
    assert!(prompt.contains("[QUESTION]\nExplain company policy X\n"));
    assert_eq!(llm.calls()[1].temperature, 0.2);
}

/// **Scenario**: the answer call fails; the run fails with that error and no answer.
#[tokio::test]
async fn answer_failure_fails_the_run() {
    let llm = Arc::new(MockGeneration::with_responses(["direct"]).fail_from_call(1));
    let runner = RouteRunner::with_stub_content(llm.clone()).unwrap();

    let err = runner.run("What is Rust?").await.unwrap_err();

    match err {
        RouteRunError::Execution(AgentError::Generation(GenerationError::Backend(msg))) => {
            assert!(msg.contains("mock failure"), "{}", msg)
        }
        other => panic!("expected backend failure, got {:?}", other),
    }
    assert_eq!(llm.call_count(), 2);
}

/// **Scenario**: a failed classification call is not fatal; the run answers on direct.
#[tokio::test]
async fn classification_failure_falls_back_to_direct() {
    let llm = Arc::new(MockGeneration::from_fn(|prompt, _| {
        if prompt.contains("request router") {
            Err(GenerationError::Backend("router down".into()))
        } else {
            Ok("fallback answer".into())
        }
    }));
    let runner = RouteRunner::with_stub_content(llm.clone()).unwrap();

    let state = runner.invoke("What is Rust?").await.unwrap();

    assert_eq!(state.route, Some(Route::Direct));
    assert_eq!(state.answer(), "fallback answer");
    assert_eq!(llm.calls()[1].prompt, direct_prompt("What is Rust?"));
}

/// **Scenario**: the same question and the same scripted replies give the same state.
#[tokio::test]
async fn identical_runs_are_deterministic() {
    let mut states = Vec::new();
    for _ in 0..2 {
        let (runner, _, _) = scripted_runner(&["rag", "same"]);
        states.push(runner.invoke("  Explain policy  ").await.unwrap());
    }
    assert_eq!(states[0], states[1]);
    assert_eq!(states[0].question(), "  Explain policy  ");
}

/// **Scenario**: each node writes only its own field; updates never clear earlier fields.
#[tokio::test]
async fn updates_never_clear_earlier_fields() {
    let (runner, _, _) = scripted_runner(&["quiz", "annotated"]);
    let events: Vec<_> = runner
        .stream("Quiz me on ownership", HashSet::from([StreamMode::Updates]))
        .collect()
        .await;

    let updates: Vec<_> = events
        .into_iter()
        .filter_map(|e| match e {
            StreamEvent::Updates { node_id, state } => Some((node_id, state)),
            _ => None,
        })
        .collect();
    assert_eq!(updates.len(), 2);

    let (first_id, after_router) = &updates[0];
    assert_eq!(first_id, ROUTER);
    assert_eq!(after_router.question(), "Quiz me on ownership");
    assert_eq!(after_router.route, Some(Route::Quiz));
    assert!(after_router.answer.is_none());

    let (second_id, after_answer) = &updates[1];
    assert_eq!(second_id, ANSWER_QUIZ);
    assert_eq!(after_answer.question(), "Quiz me on ownership");
    assert_eq!(after_answer.route, Some(Route::Quiz));
    assert_eq!(after_answer.answer(), "annotated");
}

/// **Scenario**: caller-seeded `meta` entries survive a full run through the compiled graph.
#[tokio::test]
async fn seeded_meta_survives_graph_invoke() {
    let (runner, _, _) = scripted_runner(&["rag", "ok"]);
    let mut state = RouteState::with_question("What does the handbook say?");
    state.meta.insert("request_id".into(), "42".into());
    state.meta.insert("locale".into(), "en".into());

    let out = runner.graph().invoke(state).await.unwrap();

    assert_eq!(out.question(), "What does the handbook say?");
    assert_eq!(out.route, Some(Route::Rag));
    assert_eq!(out.answer(), "ok");
    assert_eq!(out.meta.get("request_id").map(String::as_str), Some("42"));
    assert_eq!(out.meta.get("locale").map(String::as_str), Some("en"));
    assert_eq!(out.meta.len(), 2);
}

/// **Scenario**: one runner serves concurrent questions; each run keeps its own route
/// and answer.
#[tokio::test]
async fn one_runner_serves_concurrent_runs() {
    let llm = Arc::new(MockGeneration::from_fn(|prompt, _| {
        if prompt.contains("request router") {
            let question = prompt.rsplit("Question: ").next().unwrap_or_default();
            let label = if question.contains("quiz") {
                "quiz"
            } else if question.contains("policy") {
                "rag"
            } else {
                "direct"
            };
            Ok(label.to_string())
        } else {
            Ok(prompt.to_string())
        }
    }));
    let runner = RouteRunner::with_stub_content(llm.clone()).unwrap();

    let (quiz, rag, direct) = tokio::join!(
        runner.invoke("a quiz on lifetimes"),
        runner.invoke("company policy on leave"),
        runner.invoke("what is a borrow?"),
    );
    let (quiz, rag, direct) = (quiz.unwrap(), rag.unwrap(), direct.unwrap());

    assert_eq!(quiz.route, Some(Route::Quiz));
    assert!(quiz.answer().contains("Quiz on \"a quiz on lifetimes\""));
    assert_eq!(rag.route, Some(Route::Rag));
    assert!(rag.answer().contains("[QUESTION]\ncompany policy on leave"));
    assert_eq!(direct.route, Some(Route::Direct));
    assert!(direct.answer().ends_with("Question: what is a borrow?"));
    assert_eq!(llm.call_count(), 6);
}

/// **Scenario**: task events show router first, then exactly one answer node.
#[tokio::test]
async fn tasks_stream_visits_router_then_one_branch() {
    for (label, branch) in [
        ("direct", ANSWER_DIRECT),
        ("rag", ANSWER_RAG),
        ("quiz", ANSWER_QUIZ),
    ] {
        let (runner, _, _) = scripted_runner(&[label, "ok"]);
        let mut started = Vec::new();
        let mut ended = Vec::new();
        runner
            .stream_with_callback("question", |event| match event {
                StreamEvent::TaskStart { node_id } => started.push(node_id),
                StreamEvent::TaskEnd { node_id, result } => {
                    assert!(result.is_ok());
                    ended.push(node_id)
                }
                _ => {}
            })
            .await
            .unwrap();
        assert_eq!(started, vec![ROUTER, branch], "label {}", label);
        assert_eq!(started, ended);
    }
}
