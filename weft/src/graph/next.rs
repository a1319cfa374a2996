//! What a node asks the runner to do next.

/// Next step after running a node.
///
/// Ignored for nodes that have a conditional edge: the selector decides there.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Next {
    /// Follow the node's outgoing edge (or the linear order); END if there is none.
    Continue,
    /// Run the node with the given id next.
    Node(String),
    /// Stop and return the current state.
    End,
}
