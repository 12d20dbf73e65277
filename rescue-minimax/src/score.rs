use std::{cmp::Ordering, fmt::Debug, fmt::Display};

use rescue_game_types::{AgentId, GameState, NUM_AGENTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The value a search assigned to a state, whatever strategy produced it
///
/// The zero-sum and cooperative searches produce a single number, the semi-cooperative search keeps
/// one score per agent.
pub enum SearchValue {
    /// A single number, score margin or joint score
    Scalar(i64),
    /// One score per agent, indexed by agent
    Pair([u32; NUM_AGENTS]),
}

impl From<i64> for SearchValue {
    fn from(value: i64) -> Self {
        SearchValue::Scalar(value)
    }
}

impl From<[u32; NUM_AGENTS]> for SearchValue {
    fn from(value: [u32; NUM_AGENTS]) -> Self {
        SearchValue::Pair(value)
    }
}

impl Display for SearchValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchValue::Scalar(v) => write!(f, "{v}"),
            SearchValue::Pair([a, b]) => write!(f, "({a}, {b})"),
        }
    }
}

/// This trait is what makes one search strategy different from another
///
/// It turns a state into a value at the leaves of the tree, and decides which of two child values
/// the agent moving at a node would rather have. Everything else about building and reducing the
/// tree is shared.
pub trait Evaluation {
    /// The value type propagated up the tree
    type Value: Copy + Debug + PartialEq + Into<SearchValue>;

    /// The value of a leaf: a state at the depth cutoff or a terminal state
    ///
    /// Scores never change after the game ends, so this is exact for terminal states.
    fn evaluate(&self, state: &GameState) -> Self::Value;

    /// How `a` compares to `b` from the point of view of `mover`
    ///
    /// [Ordering::Greater] means `mover` strictly prefers `a`. [Ordering::Equal] means neither is
    /// preferred, in which case the child generated first is kept.
    fn rank(&self, mover: AgentId, a: &Self::Value, b: &Self::Value) -> Ordering;
}

/// Agent 0's score minus agent 1's score
pub fn score_margin(state: &GameState) -> i64 {
    let [first, second] = *state.scores();
    i64::from(first) - i64::from(second)
}

/// The total number of people rescued by both agents
pub fn joint_score(state: &GameState) -> i64 {
    state.scores().iter().copied().map(i64::from).sum()
}

/// Each agent's score, indexed by agent
pub fn score_pair(state: &GameState) -> [u32; NUM_AGENTS] {
    *state.scores()
}
