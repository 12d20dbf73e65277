use rescue_game_types::{Action, AgentId, GameState, Graph};
use tracing::{info_span, trace, warn};

use crate::{
    adversarial, cooperative, semi_cooperative, SearchOptions, SearchOutcome, SearchValue,
    Strategy,
};

#[derive(Debug, Clone, Copy)]
/// An agent that picks its actions by searching the game tree
///
/// It outputs traces using the [tracing] crate, one `minimax` span per decision.
///
/// ```rust
/// use rescue_game_types::{Action, AgentId, Deadline, GameState, GraphBuilder};
/// use rescue_minimax::{MinimaxAgent, SearchOptions, Strategy};
///
/// let graph = GraphBuilder::new()
///     .node(0, 0)
///     .node(1, 2)
///     .edge(1, 0, 1, 1)
///     .build()
///     .unwrap();
/// let state = GameState::new(&graph, [0, 0], Deadline::at(5)).unwrap();
///
/// let agent = MinimaxAgent::new(AgentId::FIRST, Strategy::Cooperative, SearchOptions::default());
///
/// assert_eq!(agent.act(&graph, &state), Action::Move { from: 0, to: 1 });
/// ```
pub struct MinimaxAgent {
    /// Which agent we are playing
    pub agent: AgentId,
    /// How the game tree is reduced
    pub strategy: Strategy,
    options: SearchOptions,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Everything one call to [MinimaxAgent::decide] found out
pub struct Decision {
    /// The action to take
    pub action: Action,
    /// The value of the root of the search, [None] when no search was needed
    pub value: Option<SearchValue>,
    /// How many states the search looked at
    pub nodes_visited: usize,
}

impl Decision {
    fn pass() -> Self {
        Self {
            action: Action::Noop,
            value: None,
            nodes_visited: 0,
        }
    }
}

impl MinimaxAgent {
    /// Create an agent for `agent` playing `strategy`
    pub fn new(agent: AgentId, strategy: Strategy, options: SearchOptions) -> Self {
        Self {
            agent,
            strategy,
            options,
        }
    }

    /// The options every search is run with
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Pick the next action for our agent
    ///
    /// See [MinimaxAgent::decide] for when this searches and when it simply passes.
    pub fn act(&self, graph: &Graph, state: &GameState) -> Action {
        self.decide(graph, state).action
    }

    /// Pick the next action for our agent and report how it was found
    ///
    /// An agent that is mid-edge or terminated only ever passes, so no tree is built for it. The
    /// same goes for asking out of turn or after the game is over.
    pub fn decide(&self, graph: &Graph, state: &GameState) -> Decision {
        if state.turn_owner() != self.agent {
            warn!(
                agent = %self.agent,
                owner = %state.turn_owner(),
                "Asked to act out of turn, passing"
            );
            return Decision::pass();
        }
        if state.is_terminal() || !state.location(self.agent).is_at_rest() {
            return Decision::pass();
        }

        info_span!(
            "minimax",
            strategy = %self.strategy,
            agent = %self.agent,
            depth = self.options.depth,
            pruning = self.options.pruning,
            time = state.current_time(),
            chosen_value = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
            explored = tracing::field::Empty,
        )
        .in_scope(|| {
            let options = &self.options;
            let decision = match self.strategy {
                Strategy::Adversarial => {
                    Self::finish(graph, state, adversarial::search(graph, state, options))
                }
                Strategy::SemiCooperative => {
                    Self::finish(graph, state, semi_cooperative::search(graph, state, options))
                }
                Strategy::Cooperative => {
                    Self::finish(graph, state, cooperative::search(graph, state, options))
                }
            };

            let current_span = tracing::Span::current();
            if let Some(value) = decision.value {
                current_span.record("chosen_value", format!("{value}").as_str());
            }
            current_span.record("chosen_action", format!("{}", decision.action).as_str());
            current_span.record("explored", decision.nodes_visited);

            decision
        })
    }

    fn finish<V>(graph: &Graph, state: &GameState, outcome: SearchOutcome<V>) -> Decision
    where
        V: Copy + std::fmt::Debug + Into<SearchValue>,
    {
        trace!(tree = %outcome.tree.to_text_tree(), "searched");

        // The root is only a leaf at zero depth. The last legal action of an agent at rest is
        // terminate
        let action = match outcome.best_action() {
            Some(action) => action,
            None => {
                let fallback = state.legal_actions(graph).pop().unwrap_or(Action::Noop);
                warn!(%fallback, "Searched no plies ahead, falling back");
                fallback
            }
        };

        Decision {
            action,
            value: Some(outcome.value().into()),
            nodes_visited: outcome.nodes_visited,
        }
    }
}
