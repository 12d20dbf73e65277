use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
/// The action an agent takes on its ply
///
/// This is the same vocabulary for every kind of agent, search based or human.
pub enum Action {
    /// The agent is already committed to an edge (or terminated) and waits
    Noop,
    /// The agent is at rest on `from` and commits to the edge towards `to`
    Move {
        #[allow(missing_docs)]
        from: NodeId,
        #[allow(missing_docs)]
        to: NodeId,
    },
    /// The agent leaves the game for good
    Terminate,
}

impl Action {
    /// The node this action heads towards, if it is a move
    pub fn destination(&self) -> Option<NodeId> {
        match self {
            Action::Move { to, .. } => Some(*to),
            Action::Noop | Action::Terminate => None,
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Noop => write!(f, "noop"),
            Action::Move { from, to } => write!(f, "move {from}->{to}"),
            Action::Terminate => write!(f, "terminate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Action::Noop.to_string(), "noop");
        assert_eq!(Action::Move { from: 0, to: 3 }.to_string(), "move 0->3");
        assert_eq!(Action::Terminate.to_string(), "terminate");
    }

    #[test]
    fn test_destination() {
        assert_eq!(Action::Move { from: 2, to: 1 }.destination(), Some(1));
        assert_eq!(Action::Noop.destination(), None);
        assert_eq!(Action::Terminate.destination(), None);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(Action::Move { from: 0, to: 1 }).unwrap();

        assert_eq!(json, serde_json::json!({ "type": "move", "from": 0, "to": 1 }));
    }
}
