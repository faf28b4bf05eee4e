//! dbot: run the relay bot. Config from env (.env supported); `--token` overrides the bot token.

use anyhow::Result;
use clap::Parser;
use relay_bot::{load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
    }
}
