use clap::{Arg, ArgAction, Command, arg, value_parser};

pub const SCAN_CMD: &str = "scan";

pub const FORMAT_COMPACT: &str = "compact";
pub const FORMAT_BLOCKS: &str = "blocks";
pub const FORMAT_JSON: &str = "json";

pub const DEFAULT_FORMAT: &str = FORMAT_COMPACT;

pub fn create_scan_cli() -> Command {
    Command::new(SCAN_CMD)
        .author("circlescan developers")
        .about("Scan a BAM file for soft-clipped reads that support a circular DNA junction.")
        .arg_required_else_help(true)
        .arg(arg!(-r --reference <bam> "Aligned reads (BAM). A .bai next to it enables indexed queries"))
        .arg(
            arg!(-t --threshold <threshold> "Minimum number of scoring candidates for a start read to be reported")
                .required(false)
                .value_parser(value_parser!(f64))
                .default_value("1.0"),
        )
        .arg(
            arg!(-o --"out-file" <path> "Write the report here instead of stdout; a .gz suffix compresses it")
                .required(false),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Report format")
                .value_parser([FORMAT_COMPACT, FORMAT_BLOCKS, FORMAT_JSON])
                .default_value(DEFAULT_FORMAT),
        )
        .arg(
            Arg::new("in-memory")
                .long("in-memory")
                .help("Load every read into memory instead of querying the BAM index")
                .action(ArgAction::SetTrue),
        )
}
