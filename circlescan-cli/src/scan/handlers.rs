use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use circlescan::bam::{bai_path, has_bai};
use circlescan::{
    BamReadIndex, BamReadSource, CircleReport, DEFAULT_SCORE_THRESHOLD, ReportStyle, load_bam,
    render_with, scan,
};
use circlescan_core::utils::{get_dynamic_writer, validate_sink};

use super::cli::{DEFAULT_FORMAT, FORMAT_BLOCKS, FORMAT_COMPACT, FORMAT_JSON};

pub fn run_scan(matches: &ArgMatches) -> Result<()> {
    let bam = matches
        .get_one::<String>("reference")
        .context("A path to a BAM file is required.")?;

    let threshold = matches
        .get_one::<f64>("threshold")
        .copied()
        .unwrap_or(DEFAULT_SCORE_THRESHOLD);

    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or(DEFAULT_FORMAT);

    let out_file = matches
        .get_one::<String>("out-file")
        .map(|path| Path::new(path.as_str()));
    let in_memory = matches.get_flag("in-memory");

    // the sink is checked before any read is touched
    if let Some(path) = out_file {
        validate_sink(path)?;
    }

    let bam = Path::new(bam);
    let pb = scan_spinner()?;
    let report = scan_bam(bam, threshold, in_memory, &pb)?;
    info!(
        "Found {} start read(s) with {} candidate(s)",
        report.len(),
        report.candidate_count()
    );

    let rendered = render_report(&report, format)?;
    write_report(&rendered, out_file)?;

    Ok(())
}

/// Run the scan, finishing `pb` whether or not it succeeds.
fn scan_bam(
    bam: &Path,
    threshold: f64,
    in_memory: bool,
    pb: &ProgressBar,
) -> Result<CircleReport> {
    let result = scan_with_progress(bam, threshold, in_memory, pb);
    match &result {
        Ok(_) => pb.finish_with_message(format!("Scanned {}", bam.display())),
        Err(_) => pb.finish_and_clear(),
    }
    result
}

fn scan_with_progress(
    bam: &Path,
    threshold: f64,
    in_memory: bool,
    pb: &ProgressBar,
) -> Result<CircleReport> {
    let report = if in_memory || !has_bai(bam) {
        if !in_memory {
            info!(
                "No index found at {}, loading reads into memory",
                bai_path(bam).display()
            );
        }
        pb.set_message(format!("Loading {}", bam.display()));
        let index =
            load_bam(bam).with_context(|| format!("Failed to load BAM file: {:?}", bam))?;
        info!("Loaded {} mapped read(s)", index.len());

        pb.set_message(format!("Scanning {}", bam.display()));
        scan(index.stream().inspect(|_| pb.inc(1)), &mut &index, threshold)?
    } else {
        info!("Querying {} through {}", bam.display(), bai_path(bam).display());
        let mut index = BamReadIndex::from_path(bam)
            .with_context(|| format!("Failed to open indexed BAM file: {:?}", bam))?;
        let source = BamReadSource::from_path(bam)
            .with_context(|| format!("Failed to open BAM file: {:?}", bam))?;

        pb.set_message(format!("Scanning {}", bam.display()));
        scan(source.inspect(|_| pb.inc(1)), &mut index, threshold)?
    };

    Ok(report)
}

fn scan_spinner() -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg} ({pos} reads)")?,
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(pb)
}

/// Render a report in one of the `--format` choices.
pub fn render_report(report: &CircleReport, format: &str) -> Result<String> {
    let rendered = match format {
        FORMAT_JSON => serde_json::to_string_pretty(report)?,
        FORMAT_BLOCKS => render_with(report, ReportStyle::Blocks)?,
        FORMAT_COMPACT => render_with(report, ReportStyle::Compact)?,
        _ => anyhow::bail!(
            "Invalid format: {}. Valid options are '{}', '{}' or '{}'",
            format,
            FORMAT_COMPACT,
            FORMAT_BLOCKS,
            FORMAT_JSON
        ),
    };
    Ok(rendered)
}

/// Write rendered text to `out_file`, or to stdout followed by a newline.
pub fn write_report(rendered: &str, out_file: Option<&Path>) -> Result<()> {
    match out_file {
        Some(path) => {
            let mut writer = get_dynamic_writer(path)?;
            writer.write_all(rendered.as_bytes())?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            writeln!(writer, "{}", rendered)?;
            writer.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use circlescan_core::CircleScanError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::scan::cli::create_scan_cli;

    #[rstest]
    fn test_missing_sink_directory_fails_before_scanning() {
        let tempdir = tempfile::tempdir().unwrap();
        let out = tempdir.path().join("missing").join("report.txt");
        let out = out.to_str().unwrap();

        // the BAM does not exist either; the sink error must win
        let matches = create_scan_cli()
            .try_get_matches_from(["scan", "-r", "does/not/exist.bam", "-o", out])
            .unwrap();

        let err = run_scan(&matches).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CircleScanError>(),
            Some(CircleScanError::InvalidSink(_))
        ));
    }

    #[rstest]
    fn test_missing_bam_is_an_error() {
        let matches = create_scan_cli()
            .try_get_matches_from(["scan", "-r", "does/not/exist.bam"])
            .unwrap();
        assert!(run_scan(&matches).is_err());
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn test_spinner_is_finished_when_the_scan_fails(#[case] in_memory: bool) {
        let pb = ProgressBar::hidden();
        let result = scan_bam(Path::new("does/not/exist.bam"), 1.0, in_memory, &pb);

        assert!(result.is_err());
        assert!(pb.is_finished());
    }

    #[rstest]
    #[case(FORMAT_COMPACT, "")]
    #[case(FORMAT_BLOCKS, "")]
    fn test_render_empty_report(#[case] format: &str, #[case] expected: &str) {
        assert_eq!(render_report(&CircleReport::new(), format).unwrap(), expected);
    }

    #[rstest]
    fn test_render_empty_report_as_json() {
        let rendered = render_report(&CircleReport::new(), FORMAT_JSON).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value, serde_json::json!({ "entries": [] }));
    }

    #[rstest]
    fn test_render_unknown_format() {
        assert!(render_report(&CircleReport::new(), "xml").is_err());
    }

    #[rstest]
    fn test_write_report_to_file() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("report.txt");

        write_report("start: 10M5S / ACGT @ 100\n", Some(&path)).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "start: 10M5S / ACGT @ 100\n"
        );
    }
}
