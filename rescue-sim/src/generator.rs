//! Random connected graphs in the graph file format

use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};
use rescue_game_types::{Deadline, EdgeId, GraphBuilder, GraphError, NodeId};
use tracing::debug;

use crate::GraphFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
/// A graph with these dimensions can't be generated
pub enum GeneratorError {
    /// A graph needs at least one vertex
    #[error("a graph needs at least one vertex")]
    NoNodes,
    /// There aren't enough distinct vertex pairs for this many edges
    #[error("{edges} edges don't fit between {nodes} vertices, at most {max} do")]
    TooManyEdges {
        #[allow(missing_docs)]
        nodes: usize,
        #[allow(missing_docs)]
        edges: usize,
        #[allow(missing_docs)]
        max: usize,
    },
    /// The graph has to be connected
    #[error("{edges} edges can't connect {nodes} vertices, at least {min} are needed")]
    TooFewEdges {
        #[allow(missing_docs)]
        nodes: usize,
        #[allow(missing_docs)]
        edges: usize,
        #[allow(missing_docs)]
        min: usize,
    },
    #[allow(missing_docs)]
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Most vertices are empty, the rest hold between 1 and 10 people
fn random_people(rng: &mut impl Rng) -> u32 {
    if rng.gen_ratio(10, 20) {
        0
    } else {
        rng.gen_range(1..=10)
    }
}

/// Mostly single step edges, the rest take between 2 and 5 time units
fn random_weight(rng: &mut impl Rng) -> u32 {
    if rng.gen_ratio(5, 9) {
        1
    } else {
        rng.gen_range(2..=5)
    }
}

/// Generate a connected random graph with `nodes` vertices and `edges` edges
///
/// Fails before drawing anything if the dimensions are impossible. The vertices are first joined
/// by a path in random order, which keeps the graph connected. The remaining edges are drawn from
/// the vertex pairs that aren't joined yet. Edge ids count up from 0.
pub fn generate(
    nodes: usize,
    edges: usize,
    deadline: Option<Deadline>,
    rng: &mut impl Rng,
) -> Result<GraphFile, GeneratorError> {
    check_dimensions(nodes, edges)?;

    let mut builder = GraphBuilder::new();
    for node in 0..nodes {
        builder = builder.node(node, random_people(rng));
    }

    let mut path: Vec<NodeId> = (0..nodes).collect();
    path.shuffle(rng);

    let mut chosen: Vec<(NodeId, NodeId)> = path
        .iter()
        .tuple_windows()
        .map(|(&a, &b)| (a.min(b), a.max(b)))
        .collect();

    let mut remaining: Vec<(NodeId, NodeId)> = (0..nodes)
        .tuple_combinations()
        .filter(|pair| !chosen.contains(pair))
        .collect();
    let extra = edges.saturating_sub(chosen.len());
    let (sampled, _) = remaining.partial_shuffle(rng, extra);
    chosen.extend_from_slice(sampled);

    for (id, (a, b)) in chosen.into_iter().enumerate() {
        builder = builder.edge(id as EdgeId, a, b, random_weight(rng));
    }

    let graph = builder.build()?;
    debug!(nodes, edges, "generated graph");

    Ok(GraphFile { graph, deadline })
}

/// Check that a connected graph with these dimensions exists
pub fn check_dimensions(nodes: usize, edges: usize) -> Result<(), GeneratorError> {
    if nodes == 0 {
        return Err(GeneratorError::NoNodes);
    }

    let max = nodes * (nodes - 1) / 2;
    if edges > max {
        return Err(GeneratorError::TooManyEdges { nodes, edges, max });
    }

    let min = nodes - 1;
    if edges < min {
        return Err(GeneratorError::TooFewEdges { nodes, edges, min });
    }

    Ok(())
}
