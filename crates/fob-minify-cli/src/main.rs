//! fob-minify - concatenate and minify JavaScript files.

use clap::Parser;
use fob_minify_cli::{cli, error, logger, run};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let no_color = args.no_color || !logger::should_use_colors();
    logger::init_logger(args.verbose, args.quiet, no_color);

    run::execute(args).map_err(error::cli_error_to_miette)
}
