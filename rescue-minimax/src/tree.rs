use std::cell::Cell;

use derivative::Derivative;
use itertools::Itertools;
use rescue_game_types::{Action, AgentId, GameState, Graph};

use crate::{Evaluation, SearchReturn};

#[derive(Debug, Clone, PartialEq)]
/// The tree a search built together with how much work it took
pub struct SearchOutcome<Value: Copy + std::fmt::Debug> {
    /// The reduced game tree. Its root options are always kept
    pub tree: SearchReturn<Value>,
    /// How many game states were looked at, leaves included
    pub nodes_visited: usize,
}

impl<Value: Copy + std::fmt::Debug> SearchOutcome<Value> {
    /// The value of the root
    pub fn value(&self) -> Value {
        *self.tree.value()
    }

    /// The action chosen at the root, [None] if the root was a leaf
    pub fn best_action(&self) -> Option<Action> {
        self.tree.best_action()
    }
}

#[derive(Derivative)]
#[derivative(Debug)]
/// Builds and reduces a depth limited game tree for one [Evaluation]
///
/// One of these lives for a single decision and is dropped afterwards.
pub(crate) struct TreeSearch<'a, E: Evaluation> {
    #[derivative(Debug = "ignore")]
    evaluation: E,
    #[derivative(Debug = "ignore")]
    graph: &'a Graph,
    retain_tree: bool,
    visited: Cell<usize>,
}

impl<'a, E: Evaluation> TreeSearch<'a, E> {
    pub(crate) fn new(evaluation: E, graph: &'a Graph, retain_tree: bool) -> Self {
        Self {
            evaluation,
            graph,
            retain_tree,
            visited: Cell::new(0),
        }
    }

    pub(crate) fn graph(&self) -> &'a Graph {
        self.graph
    }

    pub(crate) fn visit(&self) {
        self.visited.set(self.visited.get() + 1);
    }

    /// Plain minimax: every child of every node is explored and the mover keeps the child it
    /// ranks highest
    pub(crate) fn minimax(&self, state: &GameState, depth: usize) -> SearchReturn<E::Value> {
        self.visit();

        if depth == 0 || state.is_terminal() {
            return self.leaf(state);
        }

        let options = state
            .successors(self.graph)
            .into_iter()
            .map(|(action, child)| (action, self.keep(self.minimax(&child, depth - 1))))
            .collect_vec();

        self.finish_node(state, state.turn_owner(), options, false)
    }

    pub(crate) fn leaf(&self, state: &GameState) -> SearchReturn<E::Value> {
        SearchReturn::Leaf {
            value: self.evaluation.evaluate(state),
        }
    }

    /// Order the explored options by the mover's preference and take the value of the best one
    ///
    /// The sort is stable so among equally ranked children the one generated first wins.
    pub(crate) fn finish_node(
        &self,
        state: &GameState,
        mover: AgentId,
        options: Vec<(Action, SearchReturn<E::Value>)>,
        alpha_beta_cutoff: bool,
    ) -> SearchReturn<E::Value> {
        let options = options
            .into_iter()
            .sorted_by(|(_, a), (_, b)| self.evaluation.rank(mover, b.value(), a.value()))
            .collect_vec();

        let value = options
            .first()
            .map(|(_, chosen)| *chosen.value())
            .unwrap_or_else(|| self.evaluation.evaluate(state));

        SearchReturn::Node {
            mover,
            options,
            value,
            alpha_beta_cutoff,
        }
    }

    /// A finished child is cut down to its value unless the whole tree is being retained
    pub(crate) fn keep(&self, child: SearchReturn<E::Value>) -> SearchReturn<E::Value> {
        if self.retain_tree {
            child
        } else {
            child.collapsed()
        }
    }

    pub(crate) fn into_outcome(self, tree: SearchReturn<E::Value>) -> SearchOutcome<E::Value> {
        SearchOutcome {
            tree,
            nodes_visited: self.visited.get(),
        }
    }
}
