//! State graph builder: nodes, static edges, conditional edges.
//!
//! Add nodes with `add_node`, wire them with `add_edge(from, to)` using `START`
//! and `END` for entry and exit, and branch with `add_conditional_edges`. Then
//! `compile` to get a `CompiledStateGraph`.
//!
//! # Conditional edges
//!
//! After a source node runs, a routing function `(state) -> key` is called on the
//! merged state; the key is used as the next node id or looked up in a path map.
//! A node has either one outgoing `add_edge` or conditional edges, not both.
//!
//! # State updates
//!
//! By default a node's returned state replaces the previous one. Use
//! `with_state_updater` (e.g. with `MergeUpdater`) for partial updates.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use crate::channels::{BoxedStateUpdater, ReplaceUpdater};
use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
use crate::graph::node::Node;
use crate::graph::node_middleware::NodeMiddleware;

/// Sentinel for graph entry: use as `from_id` in `add_edge(START, first_node_id)`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: use as `to_id` in `add_edge(last_node_id, END)`.
pub const END: &str = "__end__";

/// Maximum node executions per run unless overridden with `with_recursion_limit`.
pub const DEFAULT_RECURSION_LIMIT: usize = 25;

/// State graph: nodes plus explicit edges and optional conditional edges.
///
/// **Interaction**: Accepts `Arc<dyn Node<S>>`; produces `CompiledStateGraph<S>`.
pub struct StateGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Edges (from_id, to_id).
    edges: Vec<(String, String)>,
    /// Source node id -> router.
    conditional_edges: HashMap<String, ConditionalRouter<S>>,
    middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    state_updater: Option<BoxedStateUpdater<S>>,
    recursion_limit: usize,
}

impl<S> Default for StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            conditional_edges: HashMap::new(),
            middleware: None,
            state_updater: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Attaches node middleware; `compile()` will use it.
    pub fn with_middleware(self, middleware: Arc<dyn NodeMiddleware<S>>) -> Self {
        Self {
            middleware: Some(middleware),
            ..self
        }
    }

    /// Attaches a custom state updater (default `ReplaceUpdater`).
    ///
    /// ```rust,no_run
    /// use weft::channels::FieldBasedUpdater;
    /// use weft::graph::StateGraph;
    /// use std::sync::Arc;
    ///
    /// #[derive(Clone, Debug)]
    /// struct Tally { seen: Vec<String> }
    ///
    /// let updater = FieldBasedUpdater::new(|current: &mut Tally, update: &Tally| {
    ///     current.seen.extend(update.seen.iter().cloned());
    /// });
    /// let graph = StateGraph::<Tally>::new().with_state_updater(Arc::new(updater));
    /// ```
    pub fn with_state_updater(self, updater: BoxedStateUpdater<S>) -> Self {
        Self {
            state_updater: Some(updater),
            ..self
        }
    }

    /// Caps node executions per run; a run that needs more fails with
    /// `AgentError::RecursionLimit`. Zero is treated as one.
    pub fn with_recursion_limit(self, limit: usize) -> Self {
        Self {
            recursion_limit: limit.max(1),
            ..self
        }
    }

    /// Adds a node; replaces any node with the same id.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Adds an edge from `from_id` to `to_id` (`START` / `END` allowed).
    pub fn add_edge(&mut self, from_id: impl Into<String>, to_id: impl Into<String>) -> &mut Self {
        self.edges.push((from_id.into(), to_id.into()));
        self
    }

    /// Adds conditional edges from `source`: the next node is resolved from
    /// `path(state)` after `source` runs.
    ///
    /// Every path map value (and every key when it doubles as a node id) must be a
    /// registered node or `END`; map values are checked at compile time, bare keys
    /// at run time.
    ///
    /// ```rust,ignore
    /// graph.add_conditional_edges(
    ///     "router",
    ///     Arc::new(|s: &RouteState| route_edge(s).to_string()),
    ///     Some(targets.into_iter().map(|t| (t.to_string(), t.to_string())).collect()),
    /// );
    /// ```
    pub fn add_conditional_edges(
        &mut self,
        source: impl Into<String>,
        path: ConditionalRouterFn<S>,
        path_map: Option<HashMap<String, String>>,
    ) -> &mut Self {
        self.conditional_edges
            .insert(source.into(), ConditionalRouter::new(path, path_map));
        self
    }

    /// Validates the topology and builds the executable graph, using the
    /// middleware set by `with_middleware` if any.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        let middleware = self.middleware.clone();
        self.compile_internal(middleware)
    }

    /// Builds the executable graph with node middleware wrapping every node.run.
    pub fn compile_with_middleware(
        self,
        middleware: Arc<dyn NodeMiddleware<S>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.compile_internal(Some(middleware))
    }

    fn compile_internal(
        self,
        middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        for (from, to) in &self.edges {
            if from != START && !self.nodes.contains_key(from) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if to != END && !self.nodes.contains_key(to) {
                return Err(CompilationError::NodeNotFound(to.clone()));
            }
        }
        for (source, router) in &self.conditional_edges {
            if !self.nodes.contains_key(source) {
                return Err(CompilationError::NodeNotFound(source.clone()));
            }
            for target in router.path_map.iter().flat_map(|m| m.values()) {
                if target != END && !self.nodes.contains_key(target) {
                    return Err(CompilationError::InvalidConditionalPathMap(target.clone()));
                }
            }
        }

        let mut start_edges = self
            .edges
            .iter()
            .filter(|(f, _)| f == START)
            .map(|(_, t)| t.clone());
        let first = match (start_edges.next(), start_edges.next()) {
            (None, _) => return Err(CompilationError::MissingStart),
            (Some(first), None) => first,
            (Some(_), Some(_)) => {
                return Err(CompilationError::InvalidChain(
                    "multiple edges from START (branch)".into(),
                ))
            }
        };

        let has_end = self.edges.iter().any(|(_, t)| t == END)
            || self.conditional_edges.values().any(|r| {
                r.path_map
                    .as_ref()
                    .map_or(true, |m| m.values().any(|v| v == END))
            });
        if !has_end {
            return Err(CompilationError::MissingEnd);
        }

        let static_edges: Vec<_> = self
            .edges
            .iter()
            .filter(|(f, _)| f.as_str() != START)
            .collect();
        let edge_froms: HashSet<&String> = static_edges.iter().map(|(f, _)| f).collect();
        if edge_froms.len() != static_edges.len() {
            return Err(CompilationError::InvalidChain(
                "duplicate from (branch)".into(),
            ));
        }
        if let Some(source) = self
            .conditional_edges
            .keys()
            .find(|s| edge_froms.contains(s))
        {
            return Err(CompilationError::NodeHasBothEdgeAndConditional(
                source.clone(),
            ));
        }

        let mut next_map: HashMap<String, NextEntry<S>> = static_edges
            .iter()
            .map(|(f, t)| (f.clone(), NextEntry::Unconditional(t.clone())))
            .collect();
        for (source, router) in &self.conditional_edges {
            next_map.insert(source.clone(), NextEntry::Conditional(router.clone()));
        }

        // Linear order is only meaningful without branches.
        let mut edge_order = vec![first.clone()];
        if self.conditional_edges.is_empty() {
            let linear_next: HashMap<&String, &String> =
                static_edges.iter().map(|(f, t)| (f, t)).collect();
            let mut visited = HashSet::new();
            visited.insert(first.clone());
            let mut current = &first;
            while let Some(&next) = linear_next.get(current) {
                if next == END {
                    break;
                }
                if !visited.insert(next.clone()) {
                    return Err(CompilationError::InvalidChain("cycle detected".into()));
                }
                edge_order.push(next.clone());
                current = next;
            }
        }

        let state_updater = self
            .state_updater
            .unwrap_or_else(|| Arc::new(ReplaceUpdater));

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            first_node_id: first,
            edge_order,
            next_map,
            middleware,
            state_updater,
            recursion_limit: self.recursion_limit,
        })
    }
}
