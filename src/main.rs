use clap::Parser;
use pagewalk::utils::normalize_target;
use pagewalk::{CrawlResult, Crawler, CrawlerConfig};
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let target = match normalize_target(&args.url) {
        Ok(target) => target,
        Err(e) => {
            ::log::error!("Rejected URL {:?}: {}", args.url, e);
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let mut config = match &args.config {
        Some(path) => match CrawlerConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {}: {e}", path.display());
                return ExitCode::from(2);
            }
        },
        None => CrawlerConfig::default(),
    };
    config.apply_env();
    args.apply(&mut config);

    let crawler = match Crawler::new(config) {
        Ok(crawler) => crawler,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    ::log::info!("Starting crawl for: {}", target);
    let start_time = std::time::Instant::now();
    let result = crawler.crawl(&target).await;
    ::log::info!(
        "Crawl finished - {} pages in {:.2} seconds",
        result.total_pages,
        start_time.elapsed().as_secs_f64()
    );

    if let Err(e) = print_result(&result, args.pretty) {
        eprintln!("error: failed to write result: {e}");
        return ExitCode::FAILURE;
    }

    if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_result(result: &CrawlResult, pretty: bool) -> serde_json::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}
