use crate::demo::{run_lookup, LookupArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hocs::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "HOCS",
    about = "Run the home ownership cost savings service or analyze an address from the command line",
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
    /// Analyze one address and print its savings opportunities
    Lookup(LookupArgs),
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
        Command::Lookup(args) => run_lookup(args).await,
    }
}
