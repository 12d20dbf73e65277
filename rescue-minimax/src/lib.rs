#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements the tree searches the rescue agents use to pick their actions.
//!
//! All three strategies share one depth-limited minimax over the transitions from
//! `rescue-game-types`. What sets them apart is an [Evaluation]: how a state is scored at the
//! leaves, and which child the agent moving at a node would rather have.
//!
//! - [adversarial]: zero-sum, agent 0 maximizes the score margin and agent 1 minimizes it. This
//!   is the only search that is pruned, with Alpha-Beta.
//! - [cooperative]: both agents maximize the total number of people rescued.
//! - [semi_cooperative]: each agent maximizes its own score, using its partner's score to break
//!   ties.
//!
//! Every node ranks its children with a stable sort, so among equally good children the one
//! generated first is chosen.

use std::{fmt::Display, str::FromStr};

use derivative::Derivative;

mod score;
pub use score::{joint_score, score_margin, score_pair, Evaluation, SearchValue};

mod search_return;
pub use search_return::SearchReturn;

mod tree;
pub use tree::SearchOutcome;

pub mod adversarial;
pub mod cooperative;
pub mod semi_cooperative;

mod agent;
pub use agent::{Decision, MinimaxAgent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// How an agent reduces its game tree to a single action
pub enum Strategy {
    /// Zero-sum, see [adversarial]
    Adversarial,
    /// Own score first, partner's score as a tiebreak, see [semi_cooperative]
    SemiCooperative,
    /// Joint score, see [cooperative]
    Cooperative,
}

impl Strategy {
    /// Every strategy, in selector order
    pub const ALL: [Strategy; 3] = [
        Strategy::Adversarial,
        Strategy::SemiCooperative,
        Strategy::Cooperative,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy `{0}`, expected one of 0|a|adversarial, 1|s|sc|semi-cooperative, 2|c|cooperative")]
/// The selector didn't name any [Strategy]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "a" | "adversarial" => Ok(Strategy::Adversarial),
            "1" | "s" | "sc" | "semi-cooperative" => Ok(Strategy::SemiCooperative),
            "2" | "c" | "cooperative" => Ok(Strategy::Cooperative),
            _ => Err(UnknownStrategy(s.to_owned())),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::Adversarial => "adversarial",
            Strategy::SemiCooperative => "semi-cooperative",
            Strategy::Cooperative => "cooperative",
        };

        write!(f, "{name}")
    }
}

#[derive(Derivative, Clone, Copy, PartialEq, Eq)]
#[derivative(Debug, Default)]
/// Optional properties for a search
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use rescue_minimax::SearchOptions;
///
/// let defaults: SearchOptions = Default::default();
///
/// assert_eq!(defaults.depth, 4);
/// assert!(defaults.pruning);
/// assert!(!defaults.retain_tree);
/// ```
pub struct SearchOptions {
    /// How many plies to look ahead. A ply is one agent's single action
    ///
    /// Defaults to 4, two full rounds
    #[derivative(Default(value = "4"))]
    pub depth: usize,
    /// Whether the adversarial search uses Alpha-Beta pruning
    ///
    /// The other strategies never prune
    #[derivative(Default(value = "true"))]
    pub pruning: bool,
    /// Keep the whole explored tree instead of only the root's children
    ///
    /// Only useful for debugging, it shows up in the `trace` output
    pub retain_tree: bool,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_selectors() {
        for (selector, strategy) in [
            ("0", Strategy::Adversarial),
            ("a", Strategy::Adversarial),
            ("Adversarial", Strategy::Adversarial),
            ("1", Strategy::SemiCooperative),
            ("s", Strategy::SemiCooperative),
            ("sc", Strategy::SemiCooperative),
            ("semi-cooperative", Strategy::SemiCooperative),
            ("2", Strategy::Cooperative),
            ("c", Strategy::Cooperative),
            (" cooperative ", Strategy::Cooperative),
        ] {
            assert_eq!(selector.parse::<Strategy>(), Ok(strategy), "{selector}");
        }

        assert_eq!(
            "h".parse::<Strategy>(),
            Err(UnknownStrategy("h".to_owned()))
        );
    }

    #[test]
    fn test_display_parses_back() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>(), Ok(strategy));
        }
    }
}
