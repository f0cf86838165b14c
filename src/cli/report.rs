//! CLI commands for reports
//!
//! Summary totals, the monthly report and the category breakdown, printed
//! to the terminal or exported to CSV.

use clap::Subcommand;
use std::path::PathBuf;

use super::{create_output, CliContext, FilterArgs};
use crate::error::GastosResult;
use crate::reports::{CategoryReport, MonthlyReport};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Totals by currency and direction over every record
    ///
    /// Filter flags do not change the totals; they only report how many
    /// records match.
    Summary {
        #[command(flatten)]
        filters: FilterArgs,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Income and expense per month
    Monthly {
        #[command(flatten)]
        filters: FilterArgs,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Totals per category for one transaction type
    #[command(alias = "category")]
    Categories {
        /// Transaction type label (defaults to the configured one, "Egreso")
        #[arg(long = "kind")]
        kind: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(ctx: &CliContext, cmd: ReportCommands) -> GastosResult<()> {
    let locale = ctx.locale();

    match cmd {
        ReportCommands::Summary { filters, output } => {
            let criteria = filters.to_criteria(&locale)?;
            let service = ctx.load_reports()?;
            let totals = service.summary();

            if let Some(path) = output {
                totals.export_csv(create_output(&path)?)?;
                println!("Summary exported to: {}", path.display());
            } else {
                print!("{}", totals.format_terminal(&locale));
                if !criteria.is_empty() {
                    println!(
                        "{} de {} registros coinciden con los filtros",
                        service.filtered(&criteria).len(),
                        service.enriched().len()
                    );
                }
            }
        }
        ReportCommands::Monthly { filters, output } => {
            let criteria = filters.to_criteria(&locale)?;
            let report = MonthlyReport::generate(&ctx.load_reports()?.filtered(&criteria));

            if let Some(path) = output {
                report.export_csv(create_output(&path)?)?;
                println!("Monthly report exported to: {}", path.display());
            } else {
                print!("{}", report.format_terminal(&locale));
            }
        }
        ReportCommands::Categories {
            kind,
            filters,
            output,
        } => {
            let criteria = filters.to_criteria(&locale)?;
            let kind = kind.unwrap_or_else(|| ctx.settings.default_category_type.clone());
            let records = ctx.load_reports()?.filtered(&criteria);
            let report = CategoryReport::generate(&records, &kind);

            if let Some(path) = output {
                report.export_csv(create_output(&path)?)?;
                println!("Category report exported to: {}", path.display());
            } else {
                print!("{}", report.format_terminal(&locale));
            }
        }
    }

    Ok(())
}
