pub mod generate;
pub mod play;

use generate::Generate;
use play::Play;

use clap::Subcommand;
use color_eyre::eyre::Result;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Play a match on a graph file
    Play(Play),
    /// Write a random connected graph file
    Generate(Generate),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Play(p) => p.run()?,
            Command::Generate(g) => g.run()?,
        }

        Ok(())
    }
}
