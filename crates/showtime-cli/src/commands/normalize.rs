use super::progress::FileProgress;
use crate::output::Output;
use chrono::{Local, NaiveDateTime};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use comfy_table::{Cell, Color, Table};
use owo_colors::OwoColorize;
use showtime_config::Config;
use showtime_core::{discover_files, run_batch, BatchOptions, BatchSummary, NormalizeError};
use std::path::PathBuf;

pub struct NormalizeArgs {
    pub files: Vec<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub pattern: Option<String>,
    pub dry_run: bool,
    pub now: Option<NaiveDateTime>,
}

/// Returns whether every file was processed.
pub fn run_normalize(args: NormalizeArgs, config: &Config, output: &Output) -> Result<bool> {
    let now = args.now.unwrap_or_else(|| Local::now().naive_local());
    let options = BatchOptions {
        dry_run: args.dry_run || !config.normalize.write_output,
    };

    let paths = if args.files.is_empty() {
        let data_dir = args.data_dir.unwrap_or_else(|| config.normalize.data_dir.clone());
        let suffix = args.pattern.as_deref().unwrap_or(&config.normalize.file_suffix);
        discover_files(&data_dir, suffix)
            .wrap_err_with(|| format!("Failed to discover collection files in {}", data_dir.display()))?
    } else {
        args.files
    };

    if paths.is_empty() {
        output.error("No files found to process");
        return Ok(false);
    }

    tracing::debug!(files = paths.len(), now = %now, dry_run = options.dry_run, "Starting batch");

    let progress = FileProgress::new(paths.len(), output.is_human() && !output.is_quiet());
    let summary = run_batch(&paths, now, &options, |report| progress.file_done(report));
    progress.finish();

    if output.is_human() {
        print_summary(&summary, options.dry_run, output);
    } else {
        let mut json = serde_json::to_value(&summary).wrap_err("Failed to serialize summary")?;
        json["dry_run"] = serde_json::Value::Bool(options.dry_run);
        output.json(&json);
    }

    Ok(summary.is_success())
}

fn print_summary(summary: &BatchSummary, dry_run: bool, output: &Output) {
    if !output.is_quiet() {
        let mut table = Table::new();
        table.set_header(vec![
            Cell::new("File").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Normalized").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Missed").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Status").add_attribute(comfy_table::Attribute::Bold),
        ]);

        for report in &summary.reports {
            let status = match &report.error {
                None => Cell::new("ok").fg(Color::Green),
                Some(e) => Cell::new(failure_status(e)).fg(Color::Red),
            };
            table.add_row(vec![
                Cell::new(report.file_name()),
                Cell::new(format!("{}/{}", report.stats.normalized, report.stats.total)),
                Cell::new(report.stats.missed()),
                status,
            ]);
        }

        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        println!("{}", table);

        let totals = summary.totals();
        if !totals.by_strategy.is_empty() {
            let strategies: Vec<String> = totals
                .by_strategy
                .iter()
                .map(|(strategy, count)| format!("{} {}", strategy, count))
                .collect();
            println!("{}", strategies.join(", ").bright_black());
        }
        if dry_run {
            println!("{}", "Dry run: no files were written".bright_black());
        }
    }

    let message = format!(
        "Normalization complete: {}/{} files processed successfully",
        summary.files_ok(),
        summary.files_total()
    );
    if summary.is_success() {
        output.success(message);
    } else {
        output.error(message);
    }
}

/// Persistence failures happened after the file was normalized in memory.
fn failure_status(error: &NormalizeError) -> String {
    if error.is_persistence() {
        format!("normalized but not written: {}", error)
    } else {
        format!("skipped: {}", error)
    }
}
