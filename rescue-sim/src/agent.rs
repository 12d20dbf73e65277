use std::io::{self, BufRead, Cursor, Write};

use itertools::Itertools;
use rescue_game_types::{Action, AgentId, GameState, Graph};
use rescue_minimax::MinimaxAgent;

#[derive(Debug, thiserror::Error)]
/// An agent that couldn't come up with an action at all
pub enum AgentError {
    /// Talking to the person playing failed
    #[error("could not talk to the player")]
    Io(#[from] std::io::Error),
    /// The person playing closed their input
    #[error("agent {0} ran out of input")]
    EndOfInput(AgentId),
}

/// Anything that can play one of the agents in a match
pub trait RescueAgent {
    /// The agent this plays
    fn agent(&self) -> AgentId;

    /// Pick an action for the state the match is in
    ///
    /// The action is checked by the simulator, an agent that picks an illegal one is asked again.
    fn act(&mut self, graph: &Graph, state: &GameState) -> Result<Action, AgentError>;
}

impl RescueAgent for MinimaxAgent {
    fn agent(&self) -> AgentId {
        self.agent
    }

    fn act(&mut self, graph: &Graph, state: &GameState) -> Result<Action, AgentError> {
        Ok(MinimaxAgent::act(self, graph, state))
    }
}

/// Where a [HumanAgent] reads its answers from, one line at a time
///
/// [io::Stdin] only locks for the duration of each read, so several agents can share the
/// terminal.
pub trait AnswerSource {
    /// Append the next line to `buf`. Returns 0 once the input is closed
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl AnswerSource for io::Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        io::Stdin::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> AnswerSource for Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

#[derive(Debug)]
/// A person at a terminal choosing where to go next
///
/// Only destinations are asked for. While the agent is on an edge or terminated it passes without
/// asking.
pub struct HumanAgent<R, W> {
    agent: AgentId,
    input: R,
    output: W,
}

impl<R: AnswerSource, W: Write> HumanAgent<R, W> {
    /// Read answers from `input` and write prompts to `output`
    pub fn new(agent: AgentId, input: R, output: W) -> Self {
        Self {
            agent,
            input,
            output,
        }
    }

    fn read_answer(&mut self) -> Result<String, AgentError> {
        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(AgentError::EndOfInput(self.agent));
        }

        Ok(answer.trim().to_ascii_lowercase())
    }
}

impl<R: AnswerSource, W: Write> RescueAgent for HumanAgent<R, W> {
    fn agent(&self) -> AgentId {
        self.agent
    }

    fn act(&mut self, graph: &Graph, state: &GameState) -> Result<Action, AgentError> {
        let Some(node) = state.location(self.agent).node() else {
            return Ok(Action::Noop);
        };

        let neighbors = graph.neighbors(node).map(|(n, _)| n).collect_vec();
        writeln!(
            self.output,
            "Human agent {}, your neighbouring nodes are: [{}]",
            self.agent,
            neighbors.iter().join(", ")
        )?;

        loop {
            write!(self.output, "Where do you want to go (t to terminate): ")?;
            self.output.flush()?;

            let answer = self.read_answer()?;
            if answer == "t" || answer == "terminate" {
                return Ok(Action::Terminate);
            }

            match answer.parse::<usize>() {
                Ok(to) if neighbors.contains(&to) => return Ok(Action::Move { from: node, to }),
                _ => writeln!(self.output, "Please enter a valid node id")?,
            }
        }
    }
}
