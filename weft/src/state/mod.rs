//! State carried through the route graph.
//!
//! - [`Route`]: the branch chosen by the router (`direct`, `rag`, `quiz`).
//! - [`RouteState`]: question, route, answer and a reserved `meta` map; every
//!   field is optional and nodes return only what they write.
//!
//! ```rust
//! use weft::state::{Route, RouteState};
//! use weft::channels::Merge;
//!
//! let mut state = RouteState::with_question("What is a monad?");
//! state.merge(&RouteState { route: Some(Route::Direct), ..Default::default() });
//! assert_eq!(state.question(), "What is a monad?");
//! assert_eq!(state.route, Some(Route::Direct));
//! ```

mod route_state;

pub use route_state::{Route, RouteState, UnknownRoute};
