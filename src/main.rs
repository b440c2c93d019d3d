use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{debug, error, info};

use oledash::core::config::Config;
use oledash::core::tracing_init;
use oledash::daemon::client::{self, DelugeClient};
use oledash::display::format;
use oledash::display::oled::Oled;
use oledash::display::pages::{Page, PageScheduler};
use oledash::stats::aggregator;
use oledash::system::probe::SystemProbe;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let config_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("config.toml")
    };

    // Load and validate configuration
    let config = Config::from_file(&config_path)
        .context(format!(
            "Failed to load configuration from '{}'. \
            If this is the first run, copy config.example.toml to config.toml and set the daemon password.",
            config_path.display()
        ))?;

    // Initialize tracing/logging
    tracing_init::init_tracing(&config.logging);

    // Everything runs sequentially on one loop; no worker threads needed
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    runtime.block_on(async_main(config, config_path))
}

async fn async_main(config: Config, config_path: PathBuf) -> Result<()> {
    info!(
        config_path = %config_path.display(),
        endpoint = %config.daemon.endpoint,
        i2c_bus = %config.display.i2c_bus,
        tick_seconds = config.poll.tick_seconds,
        cleanup_enabled = config.cleanup.enabled,
        log_level = %config.logging.level,
        "OLED dashboard starting"
    );

    let client = Arc::new(
        DelugeClient::new(config.daemon.endpoint.clone(), config.daemon.password.clone())
            .context("Failed to create daemon client")?,
    );

    client
        .login()
        .await
        .context("Failed to authenticate against the daemon web endpoint")?;

    if !client
        .connected()
        .await
        .context("Failed to query daemon connection state")?
    {
        bail!("The web endpoint is not connected to a running Deluge daemon");
    }

    info!(endpoint = %config.daemon.endpoint, "Daemon connection established");

    let oled = Oled::new(&config.display).context("Failed to initialize the OLED display")?;

    info!(
        bus = %config.display.i2c_bus,
        address = config.display.i2c_address,
        "Display initialized"
    );

    // Spawn background cleanup task
    if config.cleanup.enabled {
        spawn_cleanup_task(
            Arc::clone(&client),
            config.cleanup.interval_seconds,
            config.cleanup.seed_time_secs,
            config.cleanup.ratio,
        );

        info!(
            interval_seconds = config.cleanup.interval_seconds,
            seed_time_secs = config.cleanup.seed_time_secs,
            ratio = config.cleanup.ratio,
            "Torrent cleanup task started"
        );
    }

    tokio::select! {
        result = run_display_loop(&config, &client, oled) => result,
        _ = shutdown_signal() => {
            info!("Shutting down");
            Ok(())
        }
    }
}

/// Fixed-cadence render loop: pick the page, gather its data, draw.
///
/// Data-source and render failures propagate out and end the process; only
/// the shutdown signal ends the loop cleanly.
async fn run_display_loop(config: &Config, client: &DelugeClient, mut oled: Oled) -> Result<()> {
    let mut probe = SystemProbe::new();
    let mut scheduler = PageScheduler::new();
    let mut ticker = tokio::time::interval(Duration::from_secs(config.poll.tick_seconds));

    loop {
        ticker.tick().await;

        let lines = match scheduler.on_tick() {
            Page::General => {
                let snapshot = probe.snapshot().context("Failed to read system metrics")?;
                format::general_lines(&snapshot)
            }
            Page::TorrentStats => {
                let torrents = client
                    .torrent_list()
                    .await
                    .context("Failed to fetch torrent list")?;

                if let Some(path) = &config.daemon.dump_path {
                    client::dump_torrents(path, &torrents)?;
                }

                format::torrent_lines(&aggregator::summarize(torrents.values()))
            }
        };

        oled.draw_frame(&lines).context("Failed to draw frame")?;
    }
}

/// One removal sweep: fetch the list, pick what the policy allows, remove
/// each in turn. The first failed removal aborts the rest of the sweep.
async fn run_cleanup_pass(
    client: &DelugeClient,
    seed_time_secs: i64,
    ratio: f64,
) -> Result<usize> {
    let torrents = client
        .torrent_list()
        .await
        .context("Failed to fetch torrent list for cleanup")?;

    let retirable = aggregator::select_retirable(&torrents, seed_time_secs, ratio);

    let mut removed = 0;
    for hash in retirable {
        client
            .remove_torrent(hash)
            .await
            .with_context(|| format!("Failed to remove torrent {hash}"))?;
        removed += 1;

        if let Some(torrent) = torrents.get(hash) {
            info!(name = %torrent.name, hash = hash, "Torrent removed");
        }
    }

    Ok(removed)
}

/// Spawn a background task that periodically removes torrents done seeding
fn spawn_cleanup_task(
    client: Arc<DelugeClient>,
    interval_seconds: u64,
    seed_time_secs: i64,
    ratio: f64,
) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds));

        loop {
            interval.tick().await;

            debug!("Running torrent cleanup");
            match run_cleanup_pass(&client, seed_time_secs, ratio).await {
                Ok(0) => debug!("Torrent cleanup completed, nothing retirable"),
                Ok(removed) => info!(removed_torrents = removed, "Torrent cleanup completed"),
                Err(e) => error!(error = %e, "Torrent cleanup pass failed"),
            }
        }
    });
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
