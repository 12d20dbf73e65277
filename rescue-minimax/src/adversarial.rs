//! Zero-sum search: agent 0 maximizes the score margin and agent 1 minimizes it
//!
//! The tree is pruned with Alpha-Beta unless [SearchOptions::pruning] is turned off. The pruned
//! and unpruned searches always agree on the root value and on the chosen action, the pruned one
//! just looks at fewer states.

use std::cmp::Ordering;

use rescue_game_types::{AgentId, GameState, Graph};

use crate::{score_margin, tree::TreeSearch, Evaluation, SearchOptions, SearchOutcome, SearchReturn};

#[derive(Debug, Clone, Copy, Default)]
/// Scores a state as agent 0's score minus agent 1's
pub struct ScoreMargin;

impl ScoreMargin {
    /// Agent 0 wants the margin as high as possible, agent 1 as low as possible
    pub fn maximizes(agent: AgentId) -> bool {
        agent == AgentId::FIRST
    }
}

impl Evaluation for ScoreMargin {
    type Value = i64;

    fn evaluate(&self, state: &GameState) -> i64 {
        score_margin(state)
    }

    fn rank(&self, mover: AgentId, a: &i64, b: &i64) -> Ordering {
        if Self::maximizes(mover) {
            a.cmp(b)
        } else {
            b.cmp(a)
        }
    }
}

impl TreeSearch<'_, ScoreMargin> {
    /// Fail-soft Alpha-Beta
    ///
    /// Siblings are skipped as soon as `alpha >= beta`. Values of nodes that were cut off are
    /// bounds rather than exact values, which never matters for the node that sits above them.
    pub(crate) fn alpha_beta(
        &self,
        state: &GameState,
        depth: usize,
        mut alpha: i64,
        mut beta: i64,
    ) -> SearchReturn<i64> {
        self.visit();

        if depth == 0 || state.is_terminal() {
            return self.leaf(state);
        }

        let mover = state.turn_owner();
        let is_maximizing = ScoreMargin::maximizes(mover);

        let successors = state.successors(self.graph());
        let total = successors.len();
        let mut options = Vec::with_capacity(total);
        let mut alpha_beta_cutoff = false;

        for (explored, (action, child)) in successors.into_iter().enumerate() {
            let result = self.alpha_beta(&child, depth - 1, alpha, beta);
            let value = *result.value();
            options.push((action, self.keep(result)));

            if is_maximizing {
                alpha = alpha.max(value);
            } else {
                beta = beta.min(value);
            }

            if alpha >= beta {
                alpha_beta_cutoff = explored + 1 < total;
                break;
            }
        }

        self.finish_node(state, mover, options, alpha_beta_cutoff)
    }
}

/// Run the zero-sum search from `state` for [SearchOptions::depth] plies
pub fn search(graph: &Graph, state: &GameState, options: &SearchOptions) -> SearchOutcome<i64> {
    let search = TreeSearch::new(ScoreMargin, graph, options.retain_tree);

    let tree = if options.pruning {
        search.alpha_beta(state, options.depth, i64::MIN, i64::MAX)
    } else {
        search.minimax(state, options.depth)
    };

    search.into_outcome(tree)
}
