//! CLI commands for data export
//!
//! Provides commands for exporting the filtered listing in various formats.

use clap::Subcommand;
use std::io::Write;
use std::path::PathBuf;

use super::{create_output, CliContext, FilterArgs};
use crate::error::GastosResult;
use crate::export::{csv, json, yaml, ReportBundle};

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the listing as a CSV movements sheet
    Csv {
        /// Output file path
        output: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Export the listing and every report as JSON
    Json {
        /// Output file path
        output: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// Write compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Export the listing and every report as YAML
    Yaml {
        /// Output file path
        output: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

/// Handle export commands
pub fn handle_export_command(ctx: &CliContext, cmd: ExportCommands) -> GastosResult<()> {
    let locale = ctx.locale();

    match cmd {
        ExportCommands::Csv { output, filters } => {
            let criteria = filters.to_criteria(&locale)?;
            let records = ctx.load_reports()?.filtered(&criteria);

            csv::export_records_csv(&records, create_output(&output)?)?;
            println!("Exported {} records to: {}", records.len(), output.display());
        }
        ExportCommands::Json {
            output,
            filters,
            compact,
        } => {
            let criteria = filters.to_criteria(&locale)?;
            let service = ctx.load_reports()?;
            let bundle =
                ReportBundle::build(service.snapshot().user_id, criteria, service.enriched());

            let mut writer = create_output(&output)?;
            json::export_report_json(&bundle, &mut writer, !compact)?;
            writer.flush()?;
            println!("Report exported to: {}", output.display());
        }
        ExportCommands::Yaml { output, filters } => {
            let criteria = filters.to_criteria(&locale)?;
            let service = ctx.load_reports()?;
            let bundle =
                ReportBundle::build(service.snapshot().user_id, criteria, service.enriched());

            let mut writer = create_output(&output)?;
            yaml::export_report_yaml(&bundle, &mut writer)?;
            writer.flush()?;
            println!("Report exported to: {}", output.display());
        }
    }

    Ok(())
}
