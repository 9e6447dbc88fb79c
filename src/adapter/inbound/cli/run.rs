//! Handler for the `run` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use serde_json::json;
use tokio::signal;
use tracing::{info, warn};

use super::command::RunArgs;
use super::output;
use super::progress::BarProgress;
use super::summary;
use crate::adapter::inbound::file::read_entries;
use crate::adapter::outbound::file::CsvReportWriter;
use crate::application::{PipelineOutcome, PipelineSettings};
use crate::domain::{AddressUniverse, ClusterSummary};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;
use crate::port::outbound::store::CheckpointStore;

/// Report file name carrying the current local time.
#[must_use]
pub fn default_report_path() -> PathBuf {
    PathBuf::from(format!(
        "addrlink_report_{}.csv",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}

fn settings_for(config: &Config, args: &RunArgs) -> PipelineSettings {
    let mut settings = PipelineSettings::from_config(config);
    if let Some(threshold) = args.threshold {
        settings.interaction_threshold = threshold.max(1);
    }
    settings.clear_cache_on_success |= args.clear_cache;
    settings
}

/// Execute the run command.
pub async fn execute(config: &Config, args: &RunArgs) -> Result<()> {
    let universe = AddressUniverse::from_entries(read_entries(&args.input)?);
    if universe.is_empty() {
        return Err(Error::Input(format!(
            "no addresses found in {}",
            args.input.display()
        )));
    }

    if args.fresh {
        bootstrap::checkpoint_store(config).clear()?;
        info!("Saved checkpoint discarded");
    }

    let report_path = args.output.clone().unwrap_or_else(default_report_path);
    let settings = settings_for(config, args);

    output::header();
    output::field("Input", args.input.display());
    output::field("Addresses", universe.len());
    output::field("Endpoints", config.rpc.endpoints.len());
    output::field("Threshold", settings.interaction_threshold);
    output::field("Report", report_path.display());

    let progress = Arc::new(BarProgress::new(!args.no_progress));
    let mut pipeline = bootstrap::build_pipeline(config, settings)?.with_progress(progress);
    let sink = CsvReportWriter::new(report_path.clone());

    let result = tokio::select! {
        result = pipeline.run(&universe, &sink) => result,
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
            Err(Error::Interrupted)
        }
    };

    match result {
        Ok(outcome) => {
            report(&outcome, &report_path);
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Run stopped");
            if matches!(e, Error::Pipeline { .. } | Error::Interrupted) {
                output::warning("Progress saved, rerun the same command to resume");
            }
            Err(e)
        }
    }
}

fn report(outcome: &PipelineOutcome, path: &Path) {
    let summaries = ClusterSummary::from_rows(&outcome.rows);

    if output::is_json() {
        output::json_output(json!({
            "command": "run",
            "report": path.display().to_string(),
            "rows": outcome.rows.len(),
            "resumed_at": outcome.resumed_at,
            "summary": summary::summary_json(&summaries, &outcome.groups),
        }));
        return;
    }

    output::section("Clusters");
    output::lines(&summary::label_table(&summaries));

    output::section("Interaction groups");
    if outcome.groups.is_empty() {
        output::note("No addresses interact above the threshold");
    } else {
        output::lines(&summary::group_table(&outcome.groups, &outcome.rows));
    }

    println!();
    output::success(&format!(
        "Report written to {}",
        output::highlight(path.display())
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_report_name_has_timestamp() {
        let name = default_report_path().display().to_string();
        assert!(name.starts_with("addrlink_report_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "addrlink_report_YYYYMMDD_HHMMSS.csv".len());
    }

    #[test]
    fn threshold_override_applies() {
        let args = RunArgs {
            input: PathBuf::from("in.txt"),
            output: None,
            fresh: false,
            clear_cache: true,
            no_progress: true,
            threshold: Some(5),
        };
        let settings = settings_for(&Config::default(), &args);
        assert_eq!(settings.interaction_threshold, 5);
        assert!(settings.clear_cache_on_success);
    }
}
