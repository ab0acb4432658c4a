//! SONiC Orchagent entry point.

use clap::Parser;
use log::{error, info, warn};
use sonic_orchagent::daemon::{OrchDaemon, OrchDaemonConfig};
use std::process::ExitCode;

/// SONiC Switch Orchestration Agent
#[derive(Parser, Debug)]
#[command(name = "orchagent")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Switch MAC address
    #[arg(short = 'm', long)]
    mac_address: Option<String>,

    /// Batch size for consumer table operations
    #[arg(short = 'b', long, default_value = "128")]
    batch_size: usize,

    /// Enable recording mode for debugging
    #[arg(short = 'r', long)]
    record: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,

    /// Heartbeat interval in milliseconds
    #[arg(long, default_value = "1000")]
    heartbeat_interval: u64,

    /// Redis host for APPL_DB/CONFIG_DB/STATE_DB/COUNTER_DB
    #[arg(long, default_value = "127.0.0.1")]
    redis_host: String,

    /// Redis port
    #[arg(long, default_value = "6379")]
    redis_port: u16,
}

fn main() -> ExitCode {
    color_eyre::install().ok();

    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    info!("Starting SONiC orchagent (Rust)");
    info!("Batch size: {}", args.batch_size);
    if let Some(ref mac) = args.mac_address {
        info!("Switch MAC: {}", mac);
    }
    if args.record {
        info!("Recording mode enabled (swss-record compatible trace)");
    }

    // ASIC_VENDOR / onie_platform gate which SAI adapter would be loaded by a
    // real vendor build; in the absence of a linked adapter we only log the
    // detected environment and proceed in simulation mode.
    match std::env::var("ASIC_VENDOR") {
        Ok(vendor) => info!("ASIC_VENDOR={vendor}"),
        Err(_) => warn!("ASIC_VENDOR not set; running without a vendor SAI adapter"),
    }
    if let Ok(platform) = std::env::var("onie_platform") {
        info!("onie_platform={platform}");
    }

    let config = OrchDaemonConfig {
        heartbeat_interval_ms: args.heartbeat_interval,
        batch_size: args.batch_size,
        warm_boot: false,
        redis_host: args.redis_host,
        redis_port: args.redis_port,
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to start tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(async move {
        let mut daemon = OrchDaemon::new(config);

        if !daemon.init().await {
            error!("OrchDaemon initialization failed");
            return ExitCode::FAILURE;
        }

        info!("OrchDaemon initialized, entering event loop");

        tokio::select! {
            _ = daemon.run() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Received SIGINT, shutting down");
                daemon.stop();
            }
        }

        ExitCode::SUCCESS
    })
}
