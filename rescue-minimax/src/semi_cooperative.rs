//! Each agent looks after its own score first, and helps its partner when that costs it nothing
//!
//! Values are a pair of scores. The agent moving at a node prefers the child with the higher own
//! score, and between children with the same own score the one where its partner does better.

use std::cmp::Ordering;

use rescue_game_types::{AgentId, GameState, Graph, NUM_AGENTS};

use crate::{score_pair, tree::TreeSearch, Evaluation, SearchOptions, SearchOutcome};

#[derive(Debug, Clone, Copy, Default)]
/// Scores a state as both agents' scores, indexed by agent
pub struct ScorePair;

impl Evaluation for ScorePair {
    type Value = [u32; NUM_AGENTS];

    fn evaluate(&self, state: &GameState) -> Self::Value {
        score_pair(state)
    }

    fn rank(&self, mover: AgentId, a: &Self::Value, b: &Self::Value) -> Ordering {
        let own = mover.index();
        let partner = mover.other().index();

        a[own].cmp(&b[own]).then(a[partner].cmp(&b[partner]))
    }
}

/// Run the semi-cooperative search from `state` for [SearchOptions::depth] plies
///
/// [SearchOptions::pruning] has no effect here.
pub fn search(
    graph: &Graph,
    state: &GameState,
    options: &SearchOptions,
) -> SearchOutcome<[u32; NUM_AGENTS]> {
    let search = TreeSearch::new(ScorePair, graph, options.retain_tree);
    let tree = search.minimax(state, options.depth);

    search.into_outcome(tree)
}

#[cfg(test)]
mod tests {
    use rescue_game_types::Action;

    use super::*;
    use crate::fixtures::{fork, web};

    #[test]
    fn test_rank_is_lexicographic_from_the_movers_side() {
        let pair = ScorePair;

        assert_eq!(pair.rank(AgentId::FIRST, &[3, 0], &[2, 9]), Ordering::Greater);
        assert_eq!(pair.rank(AgentId::FIRST, &[3, 3], &[3, 0]), Ordering::Greater);
        assert_eq!(pair.rank(AgentId::FIRST, &[3, 3], &[3, 3]), Ordering::Equal);
        assert_eq!(pair.rank(AgentId::SECOND, &[9, 2], &[0, 3]), Ordering::Less);
        assert_eq!(pair.rank(AgentId::SECOND, &[5, 3], &[0, 3]), Ordering::Greater);
    }

    #[test]
    fn test_helps_the_partner_when_it_costs_nothing() {
        let (graph, state) = fork();

        let outcome = search(&graph, &state, &SearchOptions::default());

        assert_eq!(outcome.best_action(), Some(Action::Move { from: 0, to: 3 }));
        assert_eq!(outcome.value(), [3, 3]);
    }

    #[test]
    fn test_own_score_comes_first() {
        let (graph, start) = web();
        let mut states = vec![start.clone()];
        states.extend(start.expand(&graph));

        for state in &states {
            if state.is_terminal() {
                continue;
            }
            let mover = state.turn_owner().index();

            for depth in 1..=5 {
                let outcome = search(
                    &graph,
                    state,
                    &SearchOptions {
                        depth,
                        ..Default::default()
                    },
                );

                let best_own = outcome
                    .tree
                    .options()
                    .iter()
                    .map(|(_, child)| child.value()[mover])
                    .max();
                assert_eq!(Some(outcome.value()[mover]), best_own);
            }
        }
    }
}
