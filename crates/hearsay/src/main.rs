mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    logging::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Convert { input, output } => commands::convert::run(&input, &output),
        Commands::Score(args) => commands::score::run(args),
        Commands::Version => commands::version::run(),
    }
}
