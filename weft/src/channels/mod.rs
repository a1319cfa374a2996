//! State update strategies used by the graph engine.
//!
//! - `ReplaceUpdater`: default, replaces the entire state
//! - `FieldBasedUpdater`: custom per-field update logic
//! - `MergeUpdater`: additive merge via the state's [`Merge`] impl

mod updater;

pub use updater::{
    BoxedStateUpdater, FieldBasedUpdater, Merge, MergeUpdater, ReplaceUpdater, StateUpdater,
};
