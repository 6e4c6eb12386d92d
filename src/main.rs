use clap::Parser;

use rank_relay::config::Config;
use rank_relay::http;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // This returns an error if the `.env` file doesn't exist, but that's not what we want
    // since we're not going to use a `.env` file if we deploy this application.
    dotenv::dotenv().ok();

    // Initialize the logger.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse our configuration from the environment.
    // This will exit with a help message if something is wrong.
    let config = Config::parse();
    config.validate()?;

    http::serve(config).await
}
