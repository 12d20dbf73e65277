#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Runs rescue matches between two agents.
//!
//! Graphs are read from the plain text format in [graph_file] or produced by [generator]. A
//! [MatchConfig] ties a graph to who controls the agents, and the [Simulator] plays the match
//! turn by turn, producing a [MatchReport].
//!
//! ```rust
//! use rescue_minimax::{SearchOptions, Strategy};
//! use rescue_sim::{agents_for, Controller, GraphFile, MatchConfig, Simulator};
//!
//! let file: GraphFile = "#N 2\n#D 10\n#V0\n#V1 P4\n\n#E1 0 1 W1\n".parse().unwrap();
//!
//! let config = MatchConfig::new(
//!     file.graph,
//!     file.deadline,
//!     Controller::Search(Strategy::Cooperative),
//!     &[0, 0],
//!     SearchOptions::default(),
//!     MatchConfig::DEFAULT_MAX_ILLEGAL_ACTIONS,
//! )
//! .unwrap();
//!
//! let agents = agents_for(&config);
//! let report = Simulator::new(config, agents).unwrap().run().unwrap();
//!
//! assert_eq!(report.people_remaining, 0);
//! ```

mod config;
pub use config::{parse_deadline, ConfigError, Controller, MatchConfig};

pub mod graph_file;
pub use graph_file::{GraphFile, GraphFileError};

pub mod generator;

mod agent;
pub use agent::{AgentError, AnswerSource, HumanAgent, RescueAgent};

mod simulator;
pub use simulator::{agents_for, MatchReport, SimulationError, Simulator};
