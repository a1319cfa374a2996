//! State graph engine: nodes, static and conditional edges, compile, invoke, stream.
//!
//! Build a [`StateGraph`], `compile` it into a [`CompiledStateGraph`], then
//! `invoke` or `stream` it with an initial state. Execution is sequential: one
//! node at a time, from the START edge until a route reaches [`END`].

mod compile_error;
mod compiled;
mod conditional;
mod logging;
mod next;
mod node;
mod node_middleware;
mod state_graph;
mod timing_middleware;
mod visualization;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
pub use next::Next;
pub use node::Node;
pub use node_middleware::{NodeCall, NodeFuture, NodeMiddleware};
pub use state_graph::{StateGraph, DEFAULT_RECURSION_LIMIT, END, START};
pub use timing_middleware::TimingNodeMiddleware;
pub use visualization::{generate_dot, generate_text};
