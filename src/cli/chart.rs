//! CLI commands for terminal charts

use clap::Subcommand;

use super::{CliContext, FilterArgs};
use crate::display::chart::{amount_series, category_series, monthly_series, ChartSeries};
use crate::display::format::NumberLocale;
use crate::error::GastosResult;
use crate::reports::{category_aggregate, monthly_aggregate};

const DEFAULT_WIDTH: usize = 40;

/// Chart subcommands
#[derive(Subcommand, Debug)]
pub enum ChartCommands {
    /// Income and expense bars per month
    Monthly {
        #[command(flatten)]
        filters: FilterArgs,

        /// Bar width in characters
        #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
        width: usize,

        /// Disable terminal colors
        #[arg(long)]
        no_color: bool,
    },

    /// One bar per category for a transaction type
    Categories {
        /// Transaction type label (defaults to the configured one, "Egreso")
        #[arg(long = "kind")]
        kind: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
        width: usize,

        #[arg(long)]
        no_color: bool,
    },

    /// One bar per record, labelled by date
    Amounts {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
        width: usize,

        #[arg(long)]
        no_color: bool,
    },
}

/// Handle chart commands
pub fn handle_chart_command(ctx: &CliContext, cmd: ChartCommands) -> GastosResult<()> {
    let locale = ctx.locale();

    match cmd {
        ChartCommands::Monthly {
            filters,
            width,
            no_color,
        } => {
            let criteria = filters.to_criteria(&locale)?;
            let records = ctx.load_reports()?.filtered(&criteria);
            let chart = monthly_series(&monthly_aggregate(&records));

            print!("{}", chart.income.render(&locale, width, !no_color));
            println!();
            print!("{}", chart.expense.render(&locale, width, !no_color));
        }
        ChartCommands::Categories {
            kind,
            filters,
            width,
            no_color,
        } => {
            let criteria = filters.to_criteria(&locale)?;
            let kind = kind.unwrap_or_else(|| ctx.settings.default_category_type.clone());
            let records = ctx.load_reports()?.filtered(&criteria);
            let series = category_series(&category_aggregate(&records, &kind));

            print_with_legend(&series, &locale, width, !no_color);
        }
        ChartCommands::Amounts {
            filters,
            width,
            no_color,
        } => {
            let criteria = filters.to_criteria(&locale)?;
            let series = amount_series(&ctx.load_reports()?.filtered(&criteria));

            print!("{}", series.render(&locale, width, !no_color));
        }
    }

    Ok(())
}

fn print_with_legend(series: &ChartSeries, locale: &NumberLocale, width: usize, colored: bool) {
    print!("{}", series.render(locale, width, colored));

    if !series.is_empty() {
        println!();
        println!("Colores:");
        for (label, color) in series.colors() {
            println!("  {:<24} {}", label, color);
        }
    }
}
