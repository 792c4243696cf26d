mod scan;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use env_logger::Env;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "circlescan";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Find candidate circular DNA junctions in soft-clipped aligned reads.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Log debug messages")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(scan::cli::create_scan_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match matches.subcommand() {
        //
        // SCAN
        //
        Some((scan::cli::SCAN_CMD, matches)) => {
            scan::handlers::run_scan(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn test_parser_is_consistent() {
        build_parser().debug_assert();
    }

    #[rstest]
    fn test_verbose_is_global() {
        let matches = build_parser()
            .try_get_matches_from(["circlescan", "scan", "-r", "reads.bam", "--verbose"])
            .unwrap();
        assert!(matches.get_flag("verbose"));
    }
}
