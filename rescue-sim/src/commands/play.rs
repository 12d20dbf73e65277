use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr};
use rescue_minimax::SearchOptions;
use rescue_sim::{agents_for, parse_deadline, Controller, GraphFile, MatchConfig, Simulator};

#[derive(clap::Args, Debug)]
pub(crate) struct Play {
    /// Graph file to play on
    #[clap(value_parser)]
    graph: PathBuf,

    /// Who controls the agents: 0|a|adversarial, 1|s|sc|semi-cooperative, 2|c|cooperative or
    /// h|human
    #[clap(short, long, value_parser)]
    strategy: Controller,

    /// How many plies the searching agents look ahead
    #[clap(short, long, value_parser, default_value_t = SearchOptions::default().depth)]
    depth: usize,

    /// Start node of each agent, given once per agent
    #[clap(long = "start", value_parser, required = true)]
    starts: Vec<usize>,

    /// Play with this deadline instead of the one in the graph file
    #[clap(long, value_parser)]
    deadline: Option<String>,

    /// Turn Alpha-Beta pruning off for the adversarial search
    #[clap(long)]
    no_pruning: bool,

    /// Keep the whole search tree for the `trace` output
    #[clap(long)]
    retain_tree: bool,

    /// Rejected actions an agent may retry before the match is aborted
    #[clap(long, value_parser, default_value_t = MatchConfig::DEFAULT_MAX_ILLEGAL_ACTIONS)]
    max_illegal_actions: usize,

    /// Print the final report as JSON
    #[clap(long)]
    json: bool,
}

impl Play {
    pub(crate) fn run(self) -> Result<()> {
        let file = GraphFile::read(&self.graph)
            .wrap_err_with(|| format!("Failed to load {}", self.graph.display()))?;

        let deadline = match &self.deadline {
            Some(raw) => parse_deadline(raw)?,
            None => file.deadline,
        };

        let search = SearchOptions {
            depth: self.depth,
            pruning: !self.no_pruning,
            retain_tree: self.retain_tree,
        };

        let config = MatchConfig::new(
            file.graph,
            deadline,
            self.strategy,
            &self.starts,
            search,
            self.max_illegal_actions,
        )?;

        let agents = agents_for(&config);
        let report = Simulator::new(config, agents)?.run()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{report}");
        }

        Ok(())
    }
}
