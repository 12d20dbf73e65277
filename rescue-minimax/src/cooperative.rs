//! Both agents work together to rescue as many people as possible
//!
//! Every node keeps the child with the highest joint score, whoever is moving. There is no
//! opponent so nothing can be pruned.

use std::cmp::Ordering;

use rescue_game_types::{AgentId, GameState, Graph};

use crate::{joint_score, tree::TreeSearch, Evaluation, SearchOptions, SearchOutcome};

#[derive(Debug, Clone, Copy, Default)]
/// Scores a state as the sum of both agents' scores
pub struct JointScore;

impl Evaluation for JointScore {
    type Value = i64;

    fn evaluate(&self, state: &GameState) -> i64 {
        joint_score(state)
    }

    fn rank(&self, _mover: AgentId, a: &i64, b: &i64) -> Ordering {
        a.cmp(b)
    }
}

/// Run the cooperative search from `state` for [SearchOptions::depth] plies
///
/// [SearchOptions::pruning] has no effect here.
pub fn search(graph: &Graph, state: &GameState, options: &SearchOptions) -> SearchOutcome<i64> {
    let search = TreeSearch::new(JointScore, graph, options.retain_tree);
    let tree = search.minimax(state, options.depth);

    search.into_outcome(tree)
}
