use crate::judge::{run_catalog, run_judge, CatalogArgs, JudgeArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use repair_judge::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Repair Judge",
    about = "Judge vehicle repair estimates against reference prices",
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
    /// Judge a JSON file of estimate line items and print the verdict
    Judge(JudgeArgs),
    /// Print the reference price catalog in use
    Catalog(CatalogArgs),
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
        Command::Judge(args) => run_judge(args),
        Command::Catalog(args) => run_catalog(args),
    }
}
