use clap::Parser;
use miette::Result;
use atlasify::cli::{Cli, Commands};
use atlasify::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().with_verbose(cli.verbose);

    match cli.command {
        Commands::Build(args) => {
            atlasify::cli::build::run(args, &printer)?;
        }
        Commands::Inspect(args) => {
            atlasify::cli::inspect::run(args, &printer)?;
        }
        Commands::Init(args) => atlasify::cli::init::run(args, &printer)?,
        Commands::Completions { shell } => atlasify::cli::print_completions(shell),
    }

    Ok(())
}
