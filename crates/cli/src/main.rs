use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::Command;
use ftpdeploy_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "ftpdeploy",
    version,
    about = "Deploy build artifacts to an FTP server",
    propagate_version = true
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose).ok();

    match cli.command {
        Command::Deploy(args) => commands::deploy::run(args),
        Command::List(args) => commands::list::run(args),
        Command::Fetch(args) => commands::fetch::run(args),
    }
}
