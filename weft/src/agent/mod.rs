//! Agents built on the graph engine.
//!
//! [`route`](self::route) is the question router with direct, rag and quiz branches.
//! A new branch is a new node plus one more arm in
//! [`route_edge`](self::route::route_edge); the engine itself does not change.

pub mod route;

pub use route::*;
