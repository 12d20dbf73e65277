use std::fmt::Display;

use derivative::Derivative;
use rescue_game_types::{AgentId, GameState, GraphError, IllegalAction, Termination, NUM_AGENTS};
use rescue_minimax::MinimaxAgent;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

use crate::{AgentError, Controller, HumanAgent, MatchConfig, RescueAgent};

#[derive(Debug, thiserror::Error)]
/// Why a match stopped before reaching a terminal state
pub enum SimulationError {
    /// An agent kept picking actions the rules don't allow
    #[error("agent {agent} made {attempts} illegal actions in a row, the last one: {last}")]
    TooManyIllegalActions {
        #[allow(missing_docs)]
        agent: AgentId,
        #[allow(missing_docs)]
        attempts: usize,
        #[allow(missing_docs)]
        last: IllegalAction,
    },
    /// An agent couldn't pick an action at all
    #[error(transparent)]
    Agent(#[from] AgentError),
    /// The agents don't line up with the agent ids of the game
    #[error("slot {expected} holds agent {found}")]
    AgentOrder {
        #[allow(missing_docs)]
        expected: AgentId,
        #[allow(missing_docs)]
        found: AgentId,
    },
    /// There has to be exactly one agent per [AgentId]
    #[error("expected one agent per agent id, got {0}")]
    AgentCount(usize),
    /// The starting state couldn't be set up
    #[error(transparent)]
    Graph(#[from] GraphError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// How a finished match turned out
pub struct MatchReport {
    /// People rescued by each agent, indexed by agent
    pub scores: [u32; NUM_AGENTS],
    /// People nobody rescued
    pub people_remaining: u32,
    /// The time the match ended at
    pub final_time: u32,
    /// Number of complete rounds played
    pub rounds: u32,
    /// Why the match ended
    pub termination: Termination,
}

impl Display for MatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "match over after {} rounds: {}", self.rounds, self.termination)?;
        for agent in AgentId::all() {
            writeln!(f, "agent {agent} rescued {}", self.scores[agent.index()])?;
        }
        writeln!(f, "{} people remaining at time {}", self.people_remaining, self.final_time)
    }
}

/// Build the agents a [Controller] asks for
///
/// Human agents talk to the terminal.
pub fn agents_for(config: &MatchConfig) -> Vec<Box<dyn RescueAgent>> {
    AgentId::all()
        .map(|agent| -> Box<dyn RescueAgent> {
            match config.controller {
                Controller::Search(strategy) => {
                    Box::new(MinimaxAgent::new(agent, strategy, config.search))
                }
                Controller::Human => {
                    Box::new(HumanAgent::new(agent, std::io::stdin(), std::io::stdout()))
                }
            }
        })
        .collect()
}

/// Runs a match: asks each agent for an action in turn and applies it until the game is over
///
/// The simulator owns the only authoritative [GameState]. Agents only ever see it by reference.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Simulator {
    config: MatchConfig,
    #[derivative(Debug = "ignore")]
    agents: Vec<Box<dyn RescueAgent>>,
    state: GameState,
    rounds: u32,
}

impl Simulator {
    /// Set up the starting state, collecting anyone waiting on the start nodes
    ///
    /// `agents` has to hold one agent per [AgentId], in order.
    pub fn new(
        config: MatchConfig,
        agents: Vec<Box<dyn RescueAgent>>,
    ) -> Result<Self, SimulationError> {
        for (expected, agent) in AgentId::all().zip(&agents) {
            if agent.agent() != expected {
                return Err(SimulationError::AgentOrder {
                    expected,
                    found: agent.agent(),
                });
            }
        }
        if agents.len() != NUM_AGENTS {
            return Err(SimulationError::AgentCount(agents.len()));
        }

        let state = GameState::new(&config.graph, config.starts, config.deadline)?;

        Ok(Self {
            config,
            agents,
            state,
            rounds: 0,
        })
    }

    /// The authoritative state of the match
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Play the match to the end
    pub fn run(&mut self) -> Result<MatchReport, SimulationError> {
        info_span!(
            "match",
            controller = %self.config.controller,
            depth = self.config.search.depth,
            deadline = ?self.config.deadline,
        )
        .in_scope(|| {
            info!("starting match\n{}\n{}", self.config.graph, self.state);

            loop {
                if let Some(termination) = self.state.termination() {
                    let report = self.report(termination);
                    info!(
                        scores = ?report.scores,
                        termination = %report.termination,
                        "match over"
                    );

                    return Ok(report);
                }

                let agent = self.state.turn_owner();
                self.ply(agent)?;

                if agent.closes_round() {
                    self.rounds += 1;
                    if self.state.any_agent_at_rest() {
                        info!(round = self.rounds, "\n{}", self.state);
                    }
                }
            }
        })
    }

    /// Ask `agent` for an action until it picks a legal one
    fn ply(&mut self, agent: AgentId) -> Result<(), SimulationError> {
        let controller = &mut self.agents[agent.index()];
        let mut attempts = 0;

        loop {
            let action = controller.act(&self.config.graph, &self.state)?;

            match self.state.apply(&self.config.graph, agent, action) {
                Ok(next) => {
                    debug!(%agent, %action, time = self.state.current_time(), "applied action");
                    self.state = next;

                    return Ok(());
                }
                Err(reason) => {
                    attempts += 1;
                    warn!(%agent, %action, %reason, attempts, "rejected action");

                    if attempts > self.config.max_illegal_actions {
                        return Err(SimulationError::TooManyIllegalActions {
                            agent,
                            attempts,
                            last: reason,
                        });
                    }
                }
            }
        }
    }

    fn report(&self, termination: Termination) -> MatchReport {
        MatchReport {
            scores: *self.state.scores(),
            people_remaining: self.state.people_remaining(),
            final_time: self.state.current_time(),
            rounds: self.rounds,
            termination,
        }
    }
}
