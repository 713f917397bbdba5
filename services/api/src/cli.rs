use crate::demo::{run_demo, run_evaluate, run_history, DemoArgs, EvaluateArgs, HistoryArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use nutriscan::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "NutriScan",
    about = "Evaluate food label text against a health profile and serve the scan API",
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
    /// Evaluate a single label and print the score, warnings, and recommendations
    Evaluate(EvaluateArgs),
    /// List scans recorded in the scan log
    History(HistoryArgs),
    /// Run sample labels through the evaluator using an in-memory scan log
    Demo(DemoArgs),
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
        Command::Evaluate(args) => run_evaluate(args),
        Command::History(args) => run_history(args),
        Command::Demo(args) => run_demo(args),
    }
}
