use clap::Parser;
use creator_workflow::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Workflows(args) => cli::tools::workflows(args).await,
        Command::Run(args) => cli::run::run(args).await,
        Command::Keywords(args) => cli::tools::keywords(args).await,
        Command::Fetch(args) => cli::tools::fetch(args).await,
        Command::Render(args) => cli::tools::render(args).await,
    }
}
