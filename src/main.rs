use crate::console::Console;
use hitler_engine::config::Config;
use hitler_engine::registry::GameRegistry;
use tokio::io::{AsyncBufReadExt, BufReader};

mod console;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::try_init().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("invalid configuration: {:#}", err);
            return;
        }
    };
    log::info!("Starting with {:?}", config);

    let registry: &'static GameRegistry = Box::leak(Box::new(GameRegistry::new(config.options, config.seed)));
    let console = Console::new(registry, config.vote_timeout);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        console.handle_line(&line);
    }
    log::info!("stdin closed, {} games still running", registry.num_games());
}
