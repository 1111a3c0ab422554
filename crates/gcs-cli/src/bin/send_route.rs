use anyhow::Result;
use clap::Parser;
use gcs_cli::RouteInput;
use gcs_sdk::{http_to_ws_url, GcsConfig, RouteChannel};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Push a route to the backend and wait for the ack", long_about = None)]
struct Args {
    #[command(flatten)]
    route: RouteInput,

    /// Backend URL (defaults to GCS_API_URL)
    #[arg(long)]
    url: Option<String>,

    /// WebSocket path on the backend (defaults to GCS_WS_PATH)
    #[arg(long)]
    ws_path: Option<String>,

    /// Mission name (defaults to mission_manual_<timestamp>)
    #[arg(long)]
    name: Option<String>,

    /// Seconds to wait for the acknowledgement
    #[arg(long)]
    timeout: Option<u64>,

    /// Export altitude in meters
    #[arg(long)]
    alt: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    gcs_cli::logging::init()?;
    let args = Args::parse();
    let config = GcsConfig::from_env();

    let route = args.route.to_route(args.alt.unwrap_or(config.default_altitude_m))?;
    if !route.can_send() {
        anyhow::bail!("Need at least 2 waypoints to send route (got {})", route.len());
    }

    let base = args.url.unwrap_or(config.api_url);
    let ws_path = args.ws_path.unwrap_or(config.ws_path);
    let timeout = args.timeout.map(Duration::from_secs).unwrap_or(config.ack_timeout);
    let ws_url = http_to_ws_url(&base, &ws_path)?;

    tracing::info!(
        waypoints = route.len(),
        distance_m = route.total_distance_m(),
        url = %ws_url,
        "Sending route"
    );

    let mut channel = RouteChannel::connect(ws_url.as_str()).await?;
    let ack = match args.name {
        Some(name) => {
            let mission = route.to_mission(name)?;
            channel.send_route_and_wait(&mission, timeout).await?
        }
        None => channel.send_manual_route(&route, timeout).await?,
    };
    println!("Route saved: {} ({} pts)", ack.name, ack.count);

    if let Err(e) = channel.close().await {
        tracing::debug!(error = %e, "Close handshake failed");
    }
    Ok(())
}
