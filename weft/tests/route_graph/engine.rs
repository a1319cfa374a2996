//! The engine on its own: a state type unrelated to routing questions, with a
//! fourth branch and a loop.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use weft::graph::{generate_dot, generate_text, NodeCall, NodeFuture};
use weft::{AgentError, FieldBasedUpdater, Next, Node, NodeMiddleware, StateGraph, END, START};

#[derive(Clone, Debug, Default, PartialEq)]
struct Ticket {
    text: String,
    lane: String,
    trail: Vec<String>,
}

/// Appends its id to the trail; `triage` also picks a lane from the text.
struct Step(&'static str);

#[async_trait]
impl Node<Ticket> for Step {
    fn id(&self) -> &str {
        self.0
    }

    async fn run(&self, mut state: Ticket) -> Result<(Ticket, Next), AgentError> {
        if self.0 == "triage" {
            state.lane = ["refund", "crash", "price"]
                .into_iter()
                .find(|w| state.text.contains(w))
                .unwrap_or("other")
                .to_string();
        }
        state.trail.push(self.0.to_string());
        Ok((state, Next::Continue))
    }
}

fn ticket_graph() -> StateGraph<Ticket> {
    let lanes: HashMap<String, String> = [
        ("refund", "billing"),
        ("crash", "support"),
        ("price", "sales"),
        ("other", "escalate"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let mut graph = StateGraph::<Ticket>::new();
    graph.add_node("triage", Arc::new(Step("triage")));
    for lane in ["billing", "support", "sales", "escalate"] {
        graph.add_node(lane, Arc::new(Step(lane))).add_edge(lane, END);
    }
    graph
        .add_edge(START, "triage")
        .add_conditional_edges("triage", Arc::new(|s: &Ticket| s.lane.clone()), Some(lanes));
    graph
}

/// **Scenario**: adding a branch is one node and one path-map entry; every lane is reachable.
#[tokio::test]
async fn four_way_branch_reaches_each_lane() {
    let compiled = ticket_graph().compile().unwrap();
    for (text, lane) in [
        ("refund please", "billing"),
        ("app crash on start", "support"),
        ("price for teams?", "sales"),
        ("hello", "escalate"),
    ] {
        let out = compiled
            .invoke(Ticket {
                text: text.into(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(out.trail, vec!["triage", lane], "{}", text);
    }
}

/// **Scenario**: rendering lists every node and the labelled conditional edges.
#[test]
fn rendering_shows_all_lanes() {
    let compiled = ticket_graph().compile().unwrap();
    let text = generate_text(&compiled);
    assert!(text.contains("  START -> triage"));
    assert!(text.contains("  triage -?-> escalate [other]"));
    assert!(text.contains("  sales -> END"));
    let dot = generate_dot(&compiled);
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("style=dashed"));
}

/// **Scenario**: a loop that never reaches END stops at the recursion limit.
#[tokio::test]
async fn endless_loop_stops_at_recursion_limit() {
    let mut graph = StateGraph::<Ticket>::new().with_recursion_limit(5);
    graph
        .add_node("again", Arc::new(Step("again")))
        .add_edge(START, "again")
        .add_conditional_edges("again", Arc::new(|_: &Ticket| "again".into()), None);
    let compiled = graph.compile().unwrap();

    let err = compiled.invoke(Ticket::default()).await.unwrap_err();
    assert!(matches!(err, AgentError::RecursionLimit(5)));
}

/// **Scenario**: a field-based updater keeps fields the nodes do not own.
#[tokio::test]
async fn field_based_updater_keeps_text() {
    let graph = ticket_graph().with_state_updater(Arc::new(FieldBasedUpdater::new(
        |current: &mut Ticket, update: &Ticket| {
            current.lane = update.lane.clone();
            current.trail = update.trail.clone();
        },
    )));
    let compiled = graph.compile().unwrap();
    let out = compiled
        .invoke(Ticket {
            text: "refund".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(out.text, "refund");
    assert_eq!(out.lane, "refund");
}

#[derive(Default)]
struct Counting(AtomicUsize);

#[async_trait]
impl NodeMiddleware<Ticket> for Counting {
    async fn around_run(
        &self,
        _node_id: &str,
        state: Ticket,
        inner: NodeCall<Ticket>,
    ) -> Result<(Ticket, Next), AgentError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        let fut: NodeFuture<Ticket> = inner(state);
        fut.await
    }
}

/// **Scenario**: middleware passed at compile time wraps every executed node once.
#[tokio::test]
async fn compile_with_middleware_wraps_each_step() {
    let counting = Arc::new(Counting::default());
    let compiled = ticket_graph()
        .compile_with_middleware(counting.clone())
        .unwrap();
    compiled
        .invoke(Ticket {
            text: "crash".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(counting.0.load(Ordering::SeqCst), 2);
}
