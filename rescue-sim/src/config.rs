use std::{fmt::Display, str::FromStr};

use rescue_game_types::{AgentId, Deadline, Graph, NodeId, NUM_AGENTS};
use rescue_minimax::{SearchOptions, Strategy, UnknownStrategy};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// A match that can't be played, caught before the first action
pub enum ConfigError {
    /// The game is played by exactly two agents
    #[error("expected one start node per agent, got {0}")]
    WrongAgentCount(usize),
    /// A start node that isn't a vertex of the graph
    #[error("agent {agent} starts on node {node}, which is not in the graph")]
    UnknownStartNode {
        /// The agent that was given the start node
        agent: AgentId,
        /// The vertex that doesn't exist
        node: NodeId,
    },
    /// Selector that names neither a search strategy nor a human
    #[error("{0}, or h|human")]
    UnknownController(#[from] UnknownStrategy),
    /// Deadlines are a finite number of time units
    #[error("malformed deadline `{0}`, expected a number")]
    MalformedDeadline(String),
    /// A search has to look at least one ply ahead
    #[error("search depth must be at least 1")]
    ZeroDepth,
}

/// Parse a deadline as it is written in a graph file or on the command line
///
/// Zero or a negative deadline means the game has no deadline at all. Fractional deadlines are
/// kept, see [Deadline] for how they play on the whole-numbered clock.
pub fn parse_deadline(raw: &str) -> Result<Option<Deadline>, ConfigError> {
    let malformed = || ConfigError::MalformedDeadline(raw.to_owned());

    let value: f64 = raw.trim().parse().map_err(|_| malformed())?;
    if !value.is_finite() {
        return Err(malformed());
    }
    if value <= 0.0 {
        return Ok(None);
    }

    Deadline::try_from(value).map(Some).map_err(|_| malformed())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Who picks the actions for both agents
pub enum Controller {
    /// Both agents search with the same strategy
    Search(Strategy),
    /// Both agents are played by a person at the terminal
    Human,
}

impl FromStr for Controller {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "human" => Ok(Controller::Human),
            _ => Ok(Controller::Search(s.parse()?)),
        }
    }
}

impl Display for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Controller::Search(strategy) => write!(f, "{strategy}"),
            Controller::Human => write!(f, "human"),
        }
    }
}

#[derive(Debug, Clone)]
/// Everything needed to play one match, already checked against the graph
pub struct MatchConfig {
    /// The graph the match is played on
    pub graph: Graph,
    /// [None] when the game has no deadline
    pub deadline: Option<Deadline>,
    /// Who picks the actions
    pub controller: Controller,
    /// Start node of each agent, indexed by agent
    pub starts: [NodeId; NUM_AGENTS],
    /// How searching agents search
    pub search: SearchOptions,
    /// How many rejected actions in a row an agent gets away with before the match is aborted
    pub max_illegal_actions: usize,
}

impl MatchConfig {
    /// The number of rejected actions tolerated by default
    pub const DEFAULT_MAX_ILLEGAL_ACTIONS: usize = 3;

    /// Check the settings against each other and the graph
    pub fn new(
        graph: Graph,
        deadline: Option<Deadline>,
        controller: Controller,
        starts: &[NodeId],
        search: SearchOptions,
        max_illegal_actions: usize,
    ) -> Result<Self, ConfigError> {
        let starts: [NodeId; NUM_AGENTS] = starts
            .try_into()
            .map_err(|_| ConfigError::WrongAgentCount(starts.len()))?;

        for agent in AgentId::all() {
            let node = starts[agent.index()];
            if !graph.contains(node) {
                return Err(ConfigError::UnknownStartNode { agent, node });
            }
        }

        if matches!(controller, Controller::Search(_)) && search.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }

        Ok(Self {
            graph,
            deadline,
            controller,
            starts,
            search,
            max_illegal_actions,
        })
    }
}
