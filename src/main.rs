//! yars - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use yars::{
    api::RedditApi,
    cli::{Args, Command},
    config::{validate_config, Config},
    download::Downloader,
    error::{exit_codes, Error, Result},
    output::{print_banner, print_config_summary, print_error, print_info, print_run_stats, print_warning},
    pipeline::Pipeline,
    resolve::UrlResolver,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(Error::Cancelled) => {
            print_warning("Interrupted, stopping");
            ExitCode::from(exit_codes::ABORT as u8)
        }
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Authentication(_) | Error::FeedFetch(_) | Error::Http(_) => {
                    ExitCode::from(exit_codes::API_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    if args.command == Command::Version {
        println!("yars {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Validate the target before touching anything else
    let Some(feed) = args.feed()? else {
        return Ok(());
    };

    print_banner();

    // Load configuration
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_default(&config_path)?;
    args.merge_into_config(&mut config);
    validate_config(&config)?;

    let output_dir = config.download_directory();
    print_config_summary(
        &feed,
        &output_dir.display().to_string(),
        config.account.credentials().is_some(),
    );

    // Initialize API client
    let api = Arc::new(RedditApi::new(
        &config.account.user_agent,
        config.account.credentials(),
        config.options.page_size,
    )?);
    if api.is_authenticated() {
        print_info("Logging in to Reddit...");
    }
    api.login().await?;

    // Ctrl-C stops discovery and any in-flight request
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Received interrupt, cancelling");
                cancel.cancel();
            }
        });
    }

    let downloader = Downloader::new(api.http_client().clone(), config.options.show_downloads);
    let pipeline = Pipeline::new(
        api.clone(),
        UrlResolver::new(api.clone()),
        downloader,
        output_dir,
        cancel,
    )
    .show_downloads(config.options.show_downloads)
    .show_skipped(config.options.show_skipped_downloads);

    let stats = pipeline.run(feed.clone()).await?;
    print_run_stats(&feed, &stats);

    Ok(())
}
