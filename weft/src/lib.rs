//! # Weft
//!
//! A small conditional workflow engine and the question router built on it.
//!
//! The engine ([`graph`]) runs a [`StateGraph`] of async [`Node`]s over a shared
//! state: static edges, conditional edges resolved from state, per-node
//! middleware, a recursion limit, and event streaming. The router
//! ([`agent::route`]) classifies a question with one generation call and answers
//! it on the direct, rag or quiz branch with a second.
//!
//! ## Modules
//!
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`Next`], [`NodeMiddleware`],
//!   [`TimingNodeMiddleware`], DOT/text rendering.
//! - [`channels`]: state updaters ([`ReplaceUpdater`], [`FieldBasedUpdater`], [`MergeUpdater`]).
//! - [`state`]: [`RouteState`] and [`Route`].
//! - [`agent`]: [`RouteRunner`], router and answer nodes.
//! - [`llm`]: [`GenerationClient`], [`MockGeneration`], [`ChatOpenAI`], [`client_from_settings`].
//! - [`content`]: [`ContentSource`] and [`StubContent`].
//! - [`stream`]: [`StreamMode`], [`StreamEvent`].
//! - [`error`]: [`AgentError`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use weft::{MockGeneration, RouteRunner};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = Arc::new(MockGeneration::with_responses(["quiz", "1) What is recursion? ..."]));
//! let runner = RouteRunner::with_stub_content(llm)?;
//! let answer = runner.run("Make a quiz about recursion").await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod channels;
pub mod content;
pub mod error;
pub mod graph;
pub mod llm;
pub mod state;
pub mod stream;

pub use agent::{route_edge, RouteRunError, RouteRunner};
pub use channels::{FieldBasedUpdater, Merge, MergeUpdater, ReplaceUpdater, StateUpdater};
pub use content::{ContentSource, StubContent};
pub use error::AgentError;
pub use graph::{
    CompilationError, CompiledStateGraph, Next, Node, NodeMiddleware, StateGraph,
    TimingNodeMiddleware, END, START,
};
pub use llm::{client_from_settings, ChatOpenAI, GenerationClient, GenerationError, MockGeneration};
pub use state::{Route, RouteState};
pub use stream::{StreamEvent, StreamMode};

/// Re-exported so callers can build [`Settings`](env_config::Settings) without a direct dependency.
pub use env_config::{Provider, Settings};
