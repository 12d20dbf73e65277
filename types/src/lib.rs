#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Game types for the rescue game.
//!
//! Two agents walk a weighted, undirected graph collecting the people waiting on its nodes. This
//! crate holds the static [Graph], the per-decision [GameState] snapshot, and the transition rules
//! that turn one state into its successors. Everything here is a plain value: every transition
//! returns a new [GameState] and the [Graph] is passed in explicitly wherever it is needed.
//!
//! ```rust
//! use rescue_game_types::{Action, AgentId, Deadline, GameState, GraphBuilder};
//!
//! let graph = GraphBuilder::new()
//!     .node(0, 0)
//!     .node(1, 5)
//!     .edge(1, 0, 1, 1)
//!     .build()
//!     .unwrap();
//!
//! let state = GameState::new(&graph, [0, 0], Deadline::at(10)).unwrap();
//! let state = state
//!     .apply(&graph, AgentId::FIRST, Action::Move { from: 0, to: 1 })
//!     .unwrap();
//! let state = state
//!     .apply(&graph, AgentId::SECOND, Action::Terminate)
//!     .unwrap();
//!
//! assert_eq!(state.scores(), &[5, 0]);
//! assert!(state.is_terminal());
//! ```

mod action;
pub use action::Action;

mod deadline;
pub use deadline::{Deadline, InvalidDeadline};

mod error;
pub use error::{GraphError, IllegalAction};

mod graph;
pub use graph::{Edge, EdgeId, Graph, GraphBuilder, NodeId};

mod state;
pub use state::{AgentId, AgentLocation, GameState, Termination, NUM_AGENTS};

mod transition;
