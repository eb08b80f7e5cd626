use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dealwatch_bot::scheduler::run_tick;
use dealwatch_bot::{telegram, CommandLayer, ConsoleSink, PollingScheduler, TelegramSink};
use dealwatch_core::{AppConfig, ChatId};
use dealwatch_scraper::{DealAggregator, DealExtractor, PageFetcher};
use teloxide::Bot;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dealwatch")]
#[command(about = "Polls deals pages and forwards offers to Telegram chats")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the Telegram bot (default).
    Run,
    /// Run one tick against stdout instead of a chat.
    Scan {
        /// Print records as JSON instead of chat messages.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = dealwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_bot(&config).await,
        Commands::Scan { json } => scan(&config, json).await,
    }
}

fn build_aggregator(config: &AppConfig) -> anyhow::Result<DealAggregator> {
    let fetcher = PageFetcher::new(config.request_timeout_secs, &config.user_agent)?;
    let extractor = DealExtractor::new(&config.site_origin);
    Ok(DealAggregator::new(
        fetcher,
        extractor,
        config.deal_pages.clone(),
    ))
}

async fn run_bot(config: &AppConfig) -> anyhow::Result<()> {
    let token = config
        .telegram_token
        .clone()
        .context("TELEGRAM_TOKEN is not set")?;
    let bot = Bot::new(token);

    let aggregator = Arc::new(build_aggregator(config)?);
    let sink = Arc::new(TelegramSink::new(bot.clone()));
    let scheduler = Arc::new(PollingScheduler::new(
        aggregator,
        sink,
        config.default_interval_secs,
    )?);

    tracing::info!(
        interval_secs = config.default_interval_secs,
        pages = config.deal_pages.len(),
        "dealwatch: bot starting"
    );
    telegram::run(bot, CommandLayer::new(Arc::clone(&scheduler))).await;

    scheduler.shutdown().await;
    tracing::info!("dealwatch: bot stopped");
    Ok(())
}

/// Chat id reported for messages printed by `scan`.
const CONSOLE_CHAT: ChatId = ChatId(0);

async fn scan(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let aggregator = build_aggregator(config)?;

    if json {
        let deals = aggregator.collect(aggregator.pages()).await;
        tracing::info!(count = deals.len(), "dealwatch: scan complete");
        println!("{}", serde_json::to_string_pretty(&deals)?);
    } else {
        run_tick(CONSOLE_CHAT, &aggregator, &ConsoleSink::stdout()).await;
    }
    Ok(())
}
