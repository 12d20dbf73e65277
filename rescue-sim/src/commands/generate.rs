use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr};
use rand::{rngs::StdRng, SeedableRng};
use rescue_sim::{generator, parse_deadline};
use tracing::info;

#[derive(clap::Args, Debug)]
pub(crate) struct Generate {
    /// Where to write the graph file
    #[clap(value_parser)]
    out: PathBuf,

    /// Number of vertices
    #[clap(short, long, value_parser)]
    nodes: usize,

    /// Number of edges, between `nodes - 1` and `nodes * (nodes - 1) / 2`
    #[clap(short, long, value_parser)]
    edges: usize,

    /// Deadline written to the file, 0 for no deadline
    #[clap(short, long, value_parser, default_value = "0")]
    deadline: String,

    /// Seed for a reproducible graph. A random one is used if not specified
    #[clap(long, value_parser)]
    seed: Option<u64>,
}

impl Generate {
    pub(crate) fn run(self) -> Result<()> {
        let deadline = parse_deadline(&self.deadline)?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let file = generator::generate(self.nodes, self.edges, deadline, &mut rng)?;

        std::fs::write(&self.out, file.to_string())
            .wrap_err_with(|| format!("Failed to write {}", self.out.display()))?;
        info!(out = %self.out.display(), "wrote graph");

        Ok(())
    }
}
