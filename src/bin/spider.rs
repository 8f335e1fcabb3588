// src/bin/spider.rs
// =============================================================================
// Entry point of the `spider` binary.
//
// What happens here:
// 1. Set up logging (stdout, filtered by RUST_LOG, default "info")
// 2. Parse command-line arguments using clap
// 3. Wire Ctrl-C to a cancellation token
// 4. Hand over to arachnida::crawl::run_spider
//
// Exit codes: 0 for every crawl, however many pages or images failed;
// 1 only when the download directory cannot be created.
// =============================================================================

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use arachnida::cli::SpiderCli;
use arachnida::crawl::run_spider;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing current request");
            on_interrupt.cancel();
        }
    });

    let exit_code = match run_spider(SpiderCli::parse(), cancel).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("{:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}
