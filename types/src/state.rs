use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Deadline, Graph, GraphError, NodeId};

/// The game is specified for exactly two agents
pub const NUM_AGENTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
/// Identifies one of the [NUM_AGENTS] agents. Agent 0 always moves first in a round
pub struct AgentId(u8);

impl AgentId {
    /// The agent that opens every round
    pub const FIRST: AgentId = AgentId(0);
    /// The agent whose ply closes every round
    pub const SECOND: AgentId = AgentId(1);

    /// Returns None if `index` is not a valid agent index
    pub fn new(index: usize) -> Option<Self> {
        (index < NUM_AGENTS).then_some(AgentId(index as u8))
    }

    /// The index of this agent into per-agent arrays
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The partner (or opponent) of this agent
    pub fn other(self) -> Self {
        AgentId(1 - self.0)
    }

    /// The agent that acts after this one in round-robin order
    pub fn next(self) -> Self {
        AgentId(((self.index() + 1) % NUM_AGENTS) as u8)
    }

    /// Whether this agent's ply is the last one of a round
    pub fn closes_round(self) -> bool {
        self.index() == NUM_AGENTS - 1
    }

    /// All agents in turn order
    pub fn all() -> impl Iterator<Item = AgentId> {
        (0..NUM_AGENTS).map(|i| AgentId(i as u8))
    }
}

impl TryFrom<u8> for AgentId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        AgentId::new(value as usize).ok_or_else(|| format!("{value} is not a valid agent id"))
    }
}

impl From<AgentId> for u8 {
    fn from(id: AgentId) -> Self {
        id.0
    }
}

impl Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
/// Where an agent currently is
///
/// This is the `(origin, destination, steps_remaining)` triple of the game rules, split into the
/// three shapes it can actually take. See [AgentLocation::as_triple] for the triple form.
pub enum AgentLocation {
    /// No pending traversal, the agent can pick its next action
    AtRest {
        #[allow(missing_docs)]
        node: NodeId,
    },
    /// Committed to the edge `from`-`to` and still `steps_remaining` time units away from `to`
    Moving {
        #[allow(missing_docs)]
        from: NodeId,
        #[allow(missing_docs)]
        to: NodeId,
        #[allow(missing_docs)]
        steps_remaining: u32,
    },
    /// The agent left the game. This is permanent
    Terminated,
}

impl AgentLocation {
    /// At rest on `node`
    pub fn at(node: NodeId) -> Self {
        AgentLocation::AtRest { node }
    }

    /// The location right after committing to the edge `from`-`to`
    ///
    /// Committing already uses up the first time unit of the edge, so an edge of weight 1 puts the
    /// agent at rest on `to` straight away.
    pub(crate) fn committed(from: NodeId, to: NodeId, weight: u32) -> Self {
        match weight.saturating_sub(1) {
            0 => AgentLocation::AtRest { node: to },
            steps_remaining => AgentLocation::Moving {
                from,
                to,
                steps_remaining,
            },
        }
    }

    /// One time unit passes
    pub(crate) fn advanced(self) -> Self {
        match self {
            AgentLocation::Moving {
                to,
                steps_remaining,
                ..
            } if steps_remaining <= 1 => AgentLocation::AtRest { node: to },
            AgentLocation::Moving {
                from,
                to,
                steps_remaining,
            } => AgentLocation::Moving {
                from,
                to,
                steps_remaining: steps_remaining - 1,
            },
            other => other,
        }
    }

    /// Whether the agent is at rest and can make a decision
    pub fn is_at_rest(&self) -> bool {
        matches!(self, AgentLocation::AtRest { .. })
    }

    /// Whether the agent is part way along an edge
    pub fn is_moving(&self) -> bool {
        matches!(self, AgentLocation::Moving { .. })
    }

    #[allow(missing_docs)]
    pub fn is_terminated(&self) -> bool {
        matches!(self, AgentLocation::Terminated)
    }

    /// The node the agent is resting on, if it is at rest
    pub fn node(&self) -> Option<NodeId> {
        match self {
            AgentLocation::AtRest { node } => Some(*node),
            _ => None,
        }
    }

    /// The node the agent is at or heading to. None once terminated
    pub fn destination(&self) -> Option<NodeId> {
        match self {
            AgentLocation::AtRest { node } => Some(*node),
            AgentLocation::Moving { to, .. } => Some(*to),
            AgentLocation::Terminated => None,
        }
    }

    /// The `(origin, destination, steps_remaining)` triple, with `(-1, -1, 0)` for a terminated
    /// agent
    pub fn as_triple(&self) -> (i64, i64, u32) {
        match *self {
            AgentLocation::AtRest { node } => (node as i64, node as i64, 0),
            AgentLocation::Moving {
                from,
                to,
                steps_remaining,
            } => (from as i64, to as i64, steps_remaining),
            AgentLocation::Terminated => (-1, -1, 0),
        }
    }
}

impl Display for AgentLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentLocation::AtRest { node } => write!(f, "at node {node}"),
            AgentLocation::Moving {
                from,
                to,
                steps_remaining,
            } => write!(f, "on edge {from}-{to} with {steps_remaining} steps left"),
            AgentLocation::Terminated => write!(f, "terminated"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Why a state is terminal
pub enum Termination {
    /// The deadline has been reached
    DeadlineReached,
    /// Nobody is left waiting
    AllRescued,
    /// Every agent has terminated
    AllTerminated,
}

impl Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::DeadlineReached => write!(f, "deadline reached"),
            Termination::AllRescued => write!(f, "everyone was rescued"),
            Termination::AllTerminated => write!(f, "all agents terminated"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// A snapshot of the world at one decision point
///
/// States are values: the transition functions (see [GameState::successors] and
/// [GameState::apply]) always return new states and never modify the one they are called on.
pub struct GameState {
    pub(crate) node_values: Vec<u32>,
    pub(crate) locations: [AgentLocation; NUM_AGENTS],
    pub(crate) scores: [u32; NUM_AGENTS],
    pub(crate) current_time: u32,
    pub(crate) deadline: Option<Deadline>,
    pub(crate) turn_owner: AgentId,
    /// Agents that committed to an edge during the current round. Their first time unit was
    /// already accounted for by the commit, so the end of this round must not decrement them.
    #[serde(default)]
    pub(crate) committed_this_round: [bool; NUM_AGENTS],
}

impl GameState {
    /// The state at the start of a game
    ///
    /// Both agents start at rest on their `starts` node, at time 0 with agent 0 to act, and
    /// immediately collect any people waiting on their start node. A `deadline` of `None` means
    /// the game has no deadline.
    pub fn new(
        graph: &Graph,
        starts: [NodeId; NUM_AGENTS],
        deadline: Option<Deadline>,
    ) -> Result<Self, GraphError> {
        if let Some(&missing) = starts.iter().find(|n| !graph.contains(**n)) {
            return Err(GraphError::NoSuchNode(missing));
        }

        let mut state = Self {
            node_values: graph.initial_values().to_vec(),
            locations: starts.map(AgentLocation::at),
            scores: [0; NUM_AGENTS],
            current_time: 0,
            deadline,
            turn_owner: AgentId::FIRST,
            committed_this_round: [false; NUM_AGENTS],
        };
        state.collect();

        Ok(state)
    }

    /// People still waiting, indexed by vertex id
    pub fn node_values(&self) -> &[u32] {
        &self.node_values
    }

    #[allow(missing_docs)]
    pub fn locations(&self) -> &[AgentLocation; NUM_AGENTS] {
        &self.locations
    }

    #[allow(missing_docs)]
    pub fn location(&self, agent: AgentId) -> AgentLocation {
        self.locations[agent.index()]
    }

    /// People rescued so far, per agent
    pub fn scores(&self) -> &[u32; NUM_AGENTS] {
        &self.scores
    }

    #[allow(missing_docs)]
    pub fn score(&self, agent: AgentId) -> u32 {
        self.scores[agent.index()]
    }

    #[allow(missing_docs)]
    pub fn current_time(&self) -> u32 {
        self.current_time
    }

    /// None when the game has no deadline
    pub fn deadline(&self) -> Option<Deadline> {
        self.deadline
    }

    /// The agent that acts next in the current round
    pub fn turn_owner(&self) -> AgentId {
        self.turn_owner
    }

    /// Total number of people still waiting to be rescued
    pub fn people_remaining(&self) -> u32 {
        self.node_values.iter().sum()
    }

    #[allow(missing_docs)]
    pub fn is_agent_moving(&self, agent: AgentId) -> bool {
        self.location(agent).is_moving()
    }

    #[allow(missing_docs)]
    pub fn is_agent_terminated(&self, agent: AgentId) -> bool {
        self.location(agent).is_terminated()
    }

    #[allow(missing_docs)]
    pub fn all_agents_terminated(&self) -> bool {
        self.locations.iter().all(AgentLocation::is_terminated)
    }

    /// Whether any agent is at rest, and so has a real decision to make
    pub fn any_agent_at_rest(&self) -> bool {
        self.locations.iter().any(AgentLocation::is_at_rest)
    }

    /// Whether the clock has reached the deadline. Always false without a deadline
    pub fn deadline_reached(&self) -> bool {
        self.deadline
            .map_or(false, |d| d.is_reached(self.current_time))
    }

    /// Whether people can still be collected at the current time
    pub(crate) fn within_deadline(&self) -> bool {
        self.deadline
            .map_or(true, |d| d.allows_collection(self.current_time))
    }

    /// Why the game is over, or None while it is still running
    pub fn termination(&self) -> Option<Termination> {
        if self.deadline_reached() {
            Some(Termination::DeadlineReached)
        } else if self.people_remaining() == 0 {
            Some(Termination::AllRescued)
        } else if self.all_agents_terminated() {
            Some(Termination::AllTerminated)
        } else {
            None
        }
    }

    /// The one terminal test, used both to end a match and to stop a search
    pub fn is_terminal(&self) -> bool {
        self.termination().is_some()
    }

    /// Every agent at rest on a vertex rescues the people waiting there, in agent order
    pub(crate) fn collect(&mut self) {
        for (location, score) in self.locations.iter().zip(self.scores.iter_mut()) {
            if let Some(node) = location.node() {
                *score += std::mem::take(&mut self.node_values[node]);
            }
        }
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.deadline {
            Some(deadline) => writeln!(f, "time {} (deadline {deadline})", self.current_time)?,
            None => writeln!(f, "time {} (no deadline)", self.current_time)?,
        }
        writeln!(
            f,
            "{} people remaining {:?}",
            self.people_remaining(),
            self.node_values
        )?;
        for agent in AgentId::all() {
            writeln!(
                f,
                "agent {agent} {}, rescued {}",
                self.location(agent),
                self.score(agent)
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphBuilder;

    fn line() -> Graph {
        GraphBuilder::new()
            .node(0, 2)
            .node(1, 5)
            .node(2, 0)
            .edge(1, 0, 1, 2)
            .edge(2, 1, 2, 1)
            .build()
            .unwrap()
    }

    #[test]
    fn test_agent_ids() {
        assert_eq!(AgentId::new(0), Some(AgentId::FIRST));
        assert_eq!(AgentId::new(1), Some(AgentId::SECOND));
        assert_eq!(AgentId::new(2), None);
        assert_eq!(AgentId::FIRST.other(), AgentId::SECOND);
        assert_eq!(AgentId::SECOND.next(), AgentId::FIRST);
        assert!(AgentId::SECOND.closes_round());
        assert!(!AgentId::FIRST.closes_round());
        assert_eq!(AgentId::all().collect::<Vec<_>>(), vec![AgentId::FIRST, AgentId::SECOND]);
    }

    #[test]
    fn test_new_collects_start_nodes() {
        let state = GameState::new(&line(), [0, 2], Deadline::at(10)).unwrap();

        assert_eq!(state.scores(), &[2, 0]);
        assert_eq!(state.node_values(), &[0, 5, 0]);
        assert_eq!(state.turn_owner(), AgentId::FIRST);
        assert_eq!(state.current_time(), 0);
        assert_eq!(state.location(AgentId::SECOND), AgentLocation::at(2));
    }

    #[test]
    fn test_shared_start_node_goes_to_first_agent() {
        let state = GameState::new(&line(), [1, 1], None).unwrap();

        assert_eq!(state.scores(), &[5, 0]);
    }

    #[test]
    fn test_new_rejects_unknown_start() {
        assert_eq!(
            GameState::new(&line(), [0, 3], Deadline::at(10)),
            Err(GraphError::NoSuchNode(3))
        );
    }

    #[test]
    fn test_zero_deadline_is_unbounded() {
        let state = GameState::new(&line(), [2, 2], Deadline::at(0)).unwrap();

        assert_eq!(state.deadline(), None);
        assert!(!state.deadline_reached());
        assert!(state.within_deadline());
    }

    #[test]
    fn test_termination_reasons() {
        let graph = line();
        let mut state = GameState::new(&graph, [2, 2], Deadline::at(3)).unwrap();
        assert_eq!(state.termination(), None);

        state.current_time = 3;
        assert_eq!(state.termination(), Some(Termination::DeadlineReached));

        state.current_time = 1;
        state.locations = [AgentLocation::Terminated; NUM_AGENTS];
        assert_eq!(state.termination(), Some(Termination::AllTerminated));

        state.node_values = vec![0, 0, 0];
        assert_eq!(state.termination(), Some(Termination::AllRescued));
    }

    #[test]
    fn test_location_triples() {
        assert_eq!(AgentLocation::at(3).as_triple(), (3, 3, 0));
        assert_eq!(
            AgentLocation::committed(0, 1, 3).as_triple(),
            (0, 1, 2)
        );
        assert_eq!(AgentLocation::committed(0, 1, 1), AgentLocation::at(1));
        assert_eq!(AgentLocation::Terminated.as_triple(), (-1, -1, 0));
    }

    #[test]
    fn test_location_advances_to_rest() {
        let moving = AgentLocation::committed(4, 7, 3);

        let once = moving.advanced();
        assert_eq!(
            once,
            AgentLocation::Moving {
                from: 4,
                to: 7,
                steps_remaining: 1
            }
        );
        assert_eq!(once.advanced(), AgentLocation::at(7));
        assert_eq!(AgentLocation::at(7).advanced(), AgentLocation::at(7));
        assert_eq!(
            AgentLocation::Terminated.advanced(),
            AgentLocation::Terminated
        );
    }

    #[test]
    fn test_state_from_json_fixture() {
        let state: GameState = serde_json::from_value(serde_json::json!({
            "node_values": [0, 4, 1],
            "locations": [
                { "status": "moving", "from": 0, "to": 1, "steps_remaining": 2 },
                { "status": "terminated" }
            ],
            "scores": [3, 1],
            "current_time": 5,
            "deadline": 9,
            "turn_owner": 1
        }))
        .unwrap();

        assert_eq!(state.turn_owner(), AgentId::SECOND);
        assert!(state.is_agent_moving(AgentId::FIRST));
        assert!(state.is_agent_terminated(AgentId::SECOND));
        assert_eq!(state.people_remaining(), 5);
        assert_eq!(state.committed_this_round, [false, false]);

        let bad_owner = serde_json::from_value::<GameState>(serde_json::json!({
            "node_values": [],
            "locations": [{ "status": "terminated" }, { "status": "terminated" }],
            "scores": [0, 0],
            "current_time": 0,
            "deadline": null,
            "turn_owner": 2
        }));
        assert!(bad_owner.is_err());
    }

    #[test]
    fn test_display() {
        let state = GameState::new(&line(), [0, 2], Deadline::at(10)).unwrap();

        assert_eq!(
            state.to_string(),
            "time 0 (deadline 10)\n5 people remaining [0, 5, 0]\nagent 0 at node 0, rescued 2\nagent 1 at node 2, rescued 0\n"
        );
    }
}
