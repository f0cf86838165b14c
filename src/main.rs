use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gastos::cli::{
    handle_chart_command, handle_export_command, handle_list_command, handle_login,
    handle_logout, handle_report_command, handle_whoami, ChartCommands, CliContext,
    ExportCommands, FilterArgs, ReportCommands,
};
use gastos::config::{paths::GastosPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "gastos",
    version,
    about = "Expense and income reports from the terminal",
    long_about = "gastos loads a user's expense and income records together with \
                  their categories, payment methods, transaction types and \
                  currencies, and turns them into filtered listings, summary \
                  totals, monthly and per-category reports, charts and exports."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a session for a user
    Login {
        /// User ID (optional when --token is given)
        user_id: Option<String>,

        /// Backend token; the user ID is read from its payload
        #[arg(long, env = "GASTOS_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// End the current session
    Logout,

    /// Show the current session
    Whoami,

    /// List records with their resolved descriptions
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Summary, monthly and category reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Bar charts in the terminal
    #[command(subcommand)]
    Chart(ChartCommands),

    /// Export the listing to CSV, JSON or YAML
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show current configuration and paths
    Config,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Initialize paths and settings
    let paths = GastosPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Login { user_id, token }) => handle_login(&paths, user_id, token)?,
        Some(Commands::Logout) => handle_logout(&paths)?,
        Some(Commands::Whoami) => handle_whoami(&paths)?,
        Some(Commands::List { filters }) => {
            let ctx = CliContext::new(paths, settings);
            handle_list_command(&ctx, &filters)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&CliContext::new(paths, settings), cmd)?;
        }
        Some(Commands::Chart(cmd)) => {
            handle_chart_command(&CliContext::new(paths, settings), cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&CliContext::new(paths, settings), cmd)?;
        }
        Some(Commands::Config) => {
            println!("gastos Configuration");
            println!("====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data source:      {}", settings.source_dir(&paths).display());
            println!("Exports:          {}", paths.exports_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Session file:     {}", paths.session_file().display());
            println!();
            println!("Settings:");
            println!("  Locale:                 {:?}", settings.locale);
            println!("  Default category type:  {}", settings.default_category_type);
        }
        None => {
            println!("gastos - expense and income reports");
            println!();
            println!("Run 'gastos --help' for usage information.");
            println!("Run 'gastos login <user-id>' to start.");
        }
    }

    Ok(())
}
