use crate::{AgentId, EdgeId, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
/// Problems found while assembling a [crate::Graph]
pub enum GraphError {
    /// There are no vertices at all
    #[error("the graph has no vertices")]
    Empty,
    /// The same vertex id was given twice
    #[error("vertex {0} is defined more than once")]
    DuplicateNode(NodeId),
    /// Vertex ids must run from 0 without gaps
    #[error("vertex ids must be contiguous from 0 but vertex {0} is missing")]
    MissingNode(NodeId),
    /// An edge points at a vertex that was never defined
    #[error("edge {edge} references unknown vertex {node}")]
    UnknownEndpoint {
        #[allow(missing_docs)]
        edge: EdgeId,
        #[allow(missing_docs)]
        node: NodeId,
    },
    /// A vertex id used outside of an edge (a start position for example) is not in the graph
    #[error("vertex {0} is not in the graph")]
    NoSuchNode(NodeId),
    /// Edges must connect two different vertices
    #[error("edge {0} connects a vertex to itself")]
    SelfLoop(EdgeId),
    /// Traversal time must be positive
    #[error("edge {0} has weight 0 but weights must be positive")]
    ZeroWeight(EdgeId),
    /// Edge ids are used for tie breaks and must be unique
    #[error("edge id {0} is used more than once")]
    DuplicateEdgeId(EdgeId),
    /// Two edges join the same pair of vertices
    #[error("vertices {0} and {1} are connected more than once")]
    DuplicateEdge(NodeId, NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
/// An action that the transition engine refused to apply
///
/// The state it was applied to is left untouched, so the caller can ask again.
pub enum IllegalAction {
    #[allow(missing_docs)]
    #[error("the game is already over")]
    GameOver,
    #[allow(missing_docs)]
    #[error("it is agent {owner}'s turn, not agent {agent}'s")]
    NotYourTurn { agent: AgentId, owner: AgentId },
    #[allow(missing_docs)]
    #[error("agent {0} is terminated and can only pass")]
    Terminated(AgentId),
    #[allow(missing_docs)]
    #[error("agent {0} is traversing an edge and can only pass")]
    MidEdge(AgentId),
    #[allow(missing_docs)]
    #[error("agent {0} is at rest and must either move or terminate")]
    MustDecide(AgentId),
    #[allow(missing_docs)]
    #[error("agent {agent} is at node {at}, not at node {from}")]
    WrongOrigin {
        agent: AgentId,
        at: NodeId,
        from: NodeId,
    },
    #[allow(missing_docs)]
    #[error("node {to} is not a neighbor of node {from}")]
    NotANeighbor { from: NodeId, to: NodeId },
}
