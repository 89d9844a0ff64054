use crate::demo::{run_demo, run_health_report, DemoArgs, HealthReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use portfolio_health::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Portfolio Health",
    about = "Score property portfolio health from KPI history and open work orders",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a portfolio exported from the data store
    Health {
        #[command(subcommand)]
        command: HealthCommand,
    },
    /// Score a seeded sample portfolio
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum HealthCommand {
    /// Print per-asset health and a portfolio roll-up from CSV exports
    Report(HealthReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Health {
            command: HealthCommand::Report(args),
        } => run_health_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
