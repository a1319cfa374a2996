//! Conditional edges: route to the next node based on state.
//!
//! A source node has a routing function that takes the merged state and returns
//! a key; the key is looked up in an optional path map or used as the node id.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Router function: state in, routing key out.
pub type ConditionalRouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Routing function plus optional path map.
///
/// With a path map the next node is `map[key]` when present, otherwise the key
/// itself; without one the key is the node id.
#[derive(Clone)]
pub struct ConditionalRouter<S> {
    pub(super) path: ConditionalRouterFn<S>,
    pub(super) path_map: Option<HashMap<String, String>>,
}

impl<S> ConditionalRouter<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub fn new(path: ConditionalRouterFn<S>, path_map: Option<HashMap<String, String>>) -> Self {
        Self { path, path_map }
    }

    /// Resolves the next node id (or END) from the current state.
    pub fn resolve_next(&self, state: &S) -> String {
        let key = (self.path)(state);
        self.path_map
            .as_ref()
            .and_then(|m| m.get(&key))
            .cloned()
            .unwrap_or(key)
    }
}

impl<S> ConditionalRouter<S> {
    /// Declared targets, sorted by key. Empty when there is no path map.
    pub fn targets(&self) -> Vec<(&str, &str)> {
        let mut targets: Vec<_> = self
            .path_map
            .iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        targets.sort_unstable();
        targets
    }
}

/// How to find the next node after a given node runs.
#[derive(Clone)]
pub enum NextEntry<S> {
    /// Single fixed next node (or END). The node's `Next` is still respected.
    Unconditional(String),
    /// Decided by the router from state; the node's `Next` is ignored.
    Conditional(ConditionalRouter<S>),
}
