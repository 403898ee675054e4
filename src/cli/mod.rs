pub mod build;
pub mod init;
pub mod inspect;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

/// atlasify - Compact loose sprite sheets into fixed-grid atlases
#[derive(Parser, Debug)]
#[command(name = "atlasify")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print per-sprite detail
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build atlases for the sheets in a manifest
    Build(build::BuildArgs),

    /// Show detected sprites and rows for a sheet
    Inspect(inspect::InspectArgs),

    /// Create a starter atlasify.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Write completion script for `shell` to stdout.
pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
