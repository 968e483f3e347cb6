use clap::Parser;
use pmp_retrieval_gateway::cli::{self, Cli, Command};
use pmp_retrieval_gateway::infrastructure::logging::init_logging;
use pmp_retrieval_gateway::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = AppConfig::load()?;
    init_logging(&config.logging);

    match cli.command {
        Command::Serve(args) => cli::serve::run(config, args).await,
        Command::Worker => cli::worker::run(config).await,
        Command::Migrate => cli::migrate::run(config).await,
    }
}
