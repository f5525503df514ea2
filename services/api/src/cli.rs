use crate::demo::{run_demo, run_search, run_show, DemoArgs, SearchArgs, ShowArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use estate_catalog::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Estate Catalog",
    about = "Browse, filter, and serve the property catalog from the command line",
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
    /// Filter the catalog and print matching listings
    Search(SearchArgs),
    /// Print one listing with similar listings nearby
    Show(ShowArgs),
    /// Walk through filtering, favorites, and map selection against the bundled catalog
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
        Command::Search(args) => run_search(args).await,
        Command::Show(args) => run_show(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
