//! State updaters: how a node's output is folded into the running state.
//!
//! The engine calls [`StateUpdater::apply_update`] after every node. Three
//! strategies ship with the crate:
//!
//! - [`ReplaceUpdater`]: the node output replaces the state (default).
//! - [`FieldBasedUpdater`]: a closure decides per field.
//! - [`MergeUpdater`]: delegates to the state's own [`Merge`] impl, so a node may
//!   return only the fields it wrote and everything else survives.
//!
//! ```rust
//! use weft::channels::{Merge, MergeUpdater, StateUpdater};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Doc { title: Option<String>, body: Option<String> }
//!
//! impl Merge for Doc {
//!     fn merge(&mut self, update: &Self) {
//!         if update.title.is_some() { self.title = update.title.clone(); }
//!         if update.body.is_some() { self.body = update.body.clone(); }
//!     }
//! }
//!
//! let mut doc = Doc { title: Some("t".into()), body: None };
//! MergeUpdater.apply_update(&mut doc, &Doc { title: None, body: Some("b".into()) });
//! assert_eq!(doc.title.as_deref(), Some("t"));
//! assert_eq!(doc.body.as_deref(), Some("b"));
//! ```

use std::fmt::Debug;
use std::sync::Arc;

/// Folds a node's output into the current state.
pub trait StateUpdater<S>: Send + Sync + Debug
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Called after each node with the node's returned state as `update`.
    fn apply_update(&self, current: &mut S, update: &S);
}

/// Replaces the whole state with the node output.
#[derive(Debug, Clone, Default)]
pub struct ReplaceUpdater;

impl<S> StateUpdater<S> for ReplaceUpdater
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn apply_update(&self, current: &mut S, update: &S) {
        *current = update.clone();
    }
}

/// Applies updates through a caller-supplied closure.
pub struct FieldBasedUpdater<S, F>
where
    S: Clone + Send + Sync + Debug + 'static,
    F: Fn(&mut S, &S) + Send + Sync + 'static,
{
    updater_fn: F,
    _marker: std::marker::PhantomData<S>,
}

impl<S, F> Debug for FieldBasedUpdater<S, F>
where
    S: Clone + Send + Sync + Debug + 'static,
    F: Fn(&mut S, &S) + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBasedUpdater")
            .field("updater_fn", &"<function>")
            .finish()
    }
}

impl<S, F> FieldBasedUpdater<S, F>
where
    S: Clone + Send + Sync + Debug + 'static,
    F: Fn(&mut S, &S) + Send + Sync + 'static,
{
    pub fn new(updater_fn: F) -> Self {
        Self {
            updater_fn,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<S, F> StateUpdater<S> for FieldBasedUpdater<S, F>
where
    S: Clone + Send + Sync + Debug + 'static,
    F: Fn(&mut S, &S) + Send + Sync + 'static,
{
    fn apply_update(&self, current: &mut S, update: &S) {
        (self.updater_fn)(current, update);
    }
}

/// Additive merge: `self = self ∪ update`, with `update` winning on conflict.
///
/// Implementations must never clear a field that `update` leaves unset.
pub trait Merge {
    fn merge(&mut self, update: &Self);
}

/// Updater that calls [`Merge::merge`] on the state type.
#[derive(Debug, Clone, Default)]
pub struct MergeUpdater;

impl<S> StateUpdater<S> for MergeUpdater
where
    S: Merge + Clone + Send + Sync + Debug + 'static,
{
    fn apply_update(&self, current: &mut S, update: &S) {
        current.merge(update);
    }
}

/// Shared, type-erased updater stored in the compiled graph.
pub type BoxedStateUpdater<S> = Arc<dyn StateUpdater<S>>;
