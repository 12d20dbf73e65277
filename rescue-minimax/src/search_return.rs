use std::fmt::Debug;

use rescue_game_types::{Action, AgentId};
use text_trees::StringTreeNode;

#[derive(Debug, Clone, PartialEq)]
/// This is returned from a search
/// It contains everything we kept about the game tree
pub enum SearchReturn<Value: Copy + Debug> {
    /// This is a non-leaf node in the game tree
    /// We have information about all the options we looked at as well as the chosen value
    Node {
        /// Which agent was acting at this node
        mover: AgentId,
        /// A 'recursive' look at all the actions under us
        /// This array is sorted by preference of the mover, ties kept in the order the successors
        /// were generated. The first element is always the chosen action and its
        /// [SearchReturn::value()] always equals the value of this node
        ///
        /// Alpha-beta pruned siblings are not in here at all. When the tree is not retained the
        /// options are collapsed to leaves carrying only their value
        options: Vec<(Action, Self)>,
        /// The chosen value
        value: Value,
        /// Whether we stopped looking at siblings early
        alpha_beta_cutoff: bool,
    },
    /// Represents a leaf node in the game tree
    /// This happens when we reach a terminal state or the maximum depth,
    /// or when a subtree was collapsed to save memory
    Leaf {
        #[allow(missing_docs)]
        value: Value,
    },
}

impl<Value: Copy + Debug> SearchReturn<Value> {
    /// Returns the value for this node
    pub fn value(&self) -> &Value {
        match self {
            SearchReturn::Node { value, .. } => value,
            SearchReturn::Leaf { value } => value,
        }
    }

    /// Returns the chosen action at this node
    /// If we are a leaf node, this will return None
    pub fn best_action(&self) -> Option<Action> {
        self.options().first().map(|(action, _)| *action)
    }

    /// The explored options at this node, chosen one first. Empty for leaves
    pub fn options(&self) -> &[(Action, Self)] {
        match self {
            SearchReturn::Node { options, .. } => options,
            SearchReturn::Leaf { .. } => &[],
        }
    }

    /// Collapse this subtree to a leaf that keeps only its value
    pub fn collapsed(self) -> Self {
        match self {
            SearchReturn::Node { value, .. } => SearchReturn::Leaf { value },
            leaf => leaf,
        }
    }

    /// Returns all the actions in the 'route' through the game tree that the search took
    /// This is useful for debugging as it shows each of the actions both agents made during
    /// the simulation
    pub fn chosen_route(&self) -> Vec<(AgentId, Action)> {
        match self {
            SearchReturn::Leaf { .. } => vec![],
            SearchReturn::Node { mover, options, .. } => {
                if let Some((action, chosen)) = options.first() {
                    let mut tail = chosen.chosen_route();
                    tail.insert(0, (*mover, *action));
                    tail
                } else {
                    vec![]
                }
            }
        }
    }

    /// Number of nodes kept in this tree, including this one
    pub fn len(&self) -> usize {
        1 + self
            .options()
            .iter()
            .map(|(_, child)| child.len())
            .sum::<usize>()
    }

    /// A tree always has at least its root
    pub fn is_empty(&self) -> bool {
        false
    }

    /// This returns a visual representation of the game tree that the search kept
    /// It shows the value, the acting agent and the action taken at each level
    pub fn to_text_tree(&self) -> String {
        format!("{}", self.to_text_tree_node("root".to_owned()))
    }

    fn to_text_tree_node(&self, label: String) -> StringTreeNode {
        match self {
            SearchReturn::Leaf { value } => StringTreeNode::new(format!("{label} {value:?}")),
            SearchReturn::Node {
                mover,
                options,
                value,
                alpha_beta_cutoff,
            } => {
                let cutoff = if *alpha_beta_cutoff { " (cutoff)" } else { "" };
                let mut node = StringTreeNode::new(format!("{label} {value:?}{cutoff}"));
                for (action, result) in options {
                    node.push_node(result.to_text_tree_node(format!("agent {mover}: {action}")));
                }

                node
            }
        }
    }
}
