use chart_history::connectors::{self, symbol_search::SymbolSearch};
use chart_history::utils::config::AppConfig;
use log::{error, info, warn};

#[tokio::main]
async fn main() {
    // 1. Pick up .env overrides before reading APP_* variables
    dotenv::dotenv().ok();

    let config: AppConfig = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return;
        }
    };

    // 2. Initialize Logger with the configured default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level)).init();

    info!(">>> Chart History Client is Starting... <<<");

    let request = config.default_request();

    // 3. Resolve the symbol first so a typo shows up as a search miss
    let search = SymbolSearch::new(&config);
    let ticker: &str = request.symbol.rsplit(':').next().unwrap_or(&request.symbol);
    let matches = search.search(ticker, "").await;
    if matches.iter().all(|m| m.symbol != request.symbol) {
        warn!("{} not found among {} search results", request.symbol, matches.len());
    }

    // 4. Fetch
    let client = connectors::websocket_client(&config);
    match client.get_hist(&request).await {
        Ok(outcome) => {
            for bar in outcome.series.bars() {
                info!(
                    "{:.0} O:{} H:{} L:{} C:{} V:{}",
                    bar.timestamp_ms, bar.open, bar.high, bar.low, bar.close, bar.volume
                );
            }
        }
        Err(e) => error!("History fetch failed: {}", e),
    }
}
