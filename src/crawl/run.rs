// src/crawl/run.rs
// =============================================================================
// The `spider` program, minus process setup.
//
// 1. Create the download directory, parents included (the only fatal step)
// 2. Parse the start URL; a bad one is logged like any other fetch failure
// 3. Crawl with the depth the flags ask for
// 4. Print the JSON report when --json is set
//
// The binary owns logging, Ctrl-C and the exit code; everything it decides
// on comes back from here as Ok or Err.
// =============================================================================

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::cli::SpiderCli;
use crate::config::CrawlConfig;
use crate::crawl::engine::Spider;
use crate::errors::CrawlError;

pub async fn run_spider(cli: SpiderCli, cancel: CancellationToken) -> Result<()> {
    let config = cli.crawl_config();
    run_with_config(&cli, &config, cancel).await
}

async fn run_with_config(
    cli: &SpiderCli,
    config: &CrawlConfig,
    cancel: CancellationToken,
) -> Result<()> {
    tokio::fs::create_dir_all(&config.save_path)
        .await
        .with_context(|| format!("Cannot create output directory {}", config.save_path.display()))?;

    let start = match Url::parse(&cli.url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("{}", CrawlError::fetch(&cli.url, e));
            return Ok(());
        }
    };

    // Without a client nothing can be fetched; reported, not fatal
    let spider = match Spider::new(config) {
        Ok(spider) => spider.with_cancellation(cancel),
        Err(e) => {
            tracing::warn!("{}", e);
            return Ok(());
        }
    };

    let report = spider.crawl(start, cli.depth()).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
