use std::{collections::BTreeMap, fmt::Display};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::GraphError;

/// Vertices are numbered `0..n`
pub type NodeId = usize;

/// Every edge carries a unique id, used only to keep orderings deterministic
pub type EdgeId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// The data attached to an undirected edge
pub struct Edge {
    /// Unique edge id
    pub id: EdgeId,
    /// How many time units it takes to traverse the edge. Always positive
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A static, weighted, undirected graph
///
/// Each vertex starts out with a number of people waiting on it. The graph itself never changes
/// once built: the people that are still waiting live in [crate::GameState].
///
/// Neighbors are always iterated in ascending vertex id, which keeps every search over the graph
/// reproducible.
pub struct Graph {
    values: Vec<u32>,
    adjacency: Vec<BTreeMap<NodeId, Edge>>,
}

impl Graph {
    /// Number of vertices
    pub fn node_count(&self) -> usize {
        self.values.len()
    }

    /// Whether `node` is a vertex of this graph
    pub fn contains(&self, node: NodeId) -> bool {
        node < self.values.len()
    }

    /// The people waiting on every vertex when the game starts, indexed by vertex id
    pub fn initial_values(&self) -> &[u32] {
        &self.values
    }

    /// Total number of people in the graph
    pub fn total_value(&self) -> u32 {
        self.values.iter().sum()
    }

    /// The neighbors of `node` in ascending vertex id, with the connecting edge
    ///
    /// Unknown vertices have no neighbors.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &Edge)> + '_ {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(n, e)| (*n, e)))
    }

    /// The edge between `a` and `b`, if there is one
    pub fn edge(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        self.adjacency.get(a)?.get(&b)
    }

    /// Every edge once, as `(smaller vertex, larger vertex, edge)`, ordered by edge id
    pub fn edges(&self) -> Vec<(NodeId, NodeId, Edge)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(a, edges)| {
                edges
                    .iter()
                    .filter(move |(b, _)| a < **b)
                    .map(move |(b, e)| (a, *b, *e))
            })
            .sorted_by_key(|(_, _, e)| e.id)
            .collect()
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (node, value) in self.values.iter().enumerate() {
            writeln!(
                f,
                "{node}v{value}= {}",
                self.neighbors(node)
                    .map(|(n, e)| format!("{n}:e{}w{}", e.id, e.weight))
                    .join(", ")
            )?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// Collects vertices and edges and checks them before producing a [Graph]
///
/// ```rust
/// use rescue_game_types::{GraphBuilder, GraphError};
///
/// let graph = GraphBuilder::new()
///     .node(0, 0)
///     .node(1, 5)
///     .node(2, 0)
///     .edge(1, 0, 1, 2)
///     .edge(2, 1, 2, 1)
///     .build()
///     .unwrap();
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge(1, 0).map(|e| e.weight), Some(2));
///
/// let self_loop = GraphBuilder::new().node(0, 0).edge(7, 0, 0, 1).build();
/// assert_eq!(self_loop, Err(GraphError::SelfLoop(7)));
/// ```
pub struct GraphBuilder {
    nodes: Vec<(NodeId, u32)>,
    edges: Vec<(EdgeId, NodeId, NodeId, u32)>,
}

impl GraphBuilder {
    /// An empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add vertex `id` with `value` people waiting on it
    pub fn node(mut self, id: NodeId, value: u32) -> Self {
        self.nodes.push((id, value));
        self
    }

    /// Add the undirected edge `a`-`b`
    pub fn edge(mut self, id: EdgeId, a: NodeId, b: NodeId, weight: u32) -> Self {
        self.edges.push((id, a, b, weight));
        self
    }

    /// Validate everything that was added and build the [Graph]
    pub fn build(self) -> Result<Graph, GraphError> {
        if self.nodes.is_empty() {
            return Err(GraphError::Empty);
        }

        let mut values: BTreeMap<NodeId, u32> = BTreeMap::new();
        for (id, value) in self.nodes {
            if values.insert(id, value).is_some() {
                return Err(GraphError::DuplicateNode(id));
            }
        }

        if let Some((missing, _)) = values.keys().enumerate().find(|(i, id)| i != *id) {
            return Err(GraphError::MissingNode(missing));
        }

        let values: Vec<u32> = values.into_values().collect();
        let mut adjacency: Vec<BTreeMap<NodeId, Edge>> = vec![BTreeMap::new(); values.len()];
        let mut seen_ids = Vec::with_capacity(self.edges.len());

        for (id, a, b, weight) in self.edges {
            if let Some(&node) = [a, b].iter().find(|n| **n >= values.len()) {
                return Err(GraphError::UnknownEndpoint { edge: id, node });
            }
            if a == b {
                return Err(GraphError::SelfLoop(id));
            }
            if weight == 0 {
                return Err(GraphError::ZeroWeight(id));
            }
            if seen_ids.contains(&id) {
                return Err(GraphError::DuplicateEdgeId(id));
            }
            if adjacency[a].contains_key(&b) {
                return Err(GraphError::DuplicateEdge(a.min(b), a.max(b)));
            }

            seen_ids.push(id);
            let edge = Edge { id, weight };
            adjacency[a].insert(b, edge);
            adjacency[b].insert(a, edge);
        }

        Ok(Graph { values, adjacency })
    }
}
