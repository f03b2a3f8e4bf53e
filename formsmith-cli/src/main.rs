use std::io;
use std::process;

use clap::Parser;
use formsmith_cli::{cli::Cli, logging::configure_logging, run};
use is_terminal::IsTerminal;

fn main() {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.debug, cli.quiet);

    if !io::stdout().is_terminal() || !io::stderr().is_terminal() {
        colored::control::set_override(false);
    }

    process::exit(run(cli));
}
