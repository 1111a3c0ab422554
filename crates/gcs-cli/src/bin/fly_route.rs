use anyhow::Result;
use clap::Parser;
use gcs_cli::RouteInput;
use gcs_core::{FlightSimulator, FlightState, RouteModel};
use gcs_sdk::{GcsConfig, MissionClient};
use tokio::time::{interval, sleep, Duration};

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulate a flight along a route", long_about = None)]
struct Args {
    #[command(flatten)]
    route: RouteInput,

    /// Load the route from a stored mission instead
    #[arg(long, conflicts_with_all = ["points", "file"])]
    mission: Option<String>,

    /// Backend URL for --mission (defaults to GCS_API_URL)
    #[arg(long)]
    url: Option<String>,

    /// Tick interval in milliseconds
    #[arg(long, default_value_t = 500)]
    interval_ms: u64,

    /// Fraction of a leg flown per tick
    #[arg(long, default_value_t = 0.02)]
    step: f64,

    /// Pause after this many ticks
    #[arg(long)]
    pause_after: Option<u64>,

    /// How long to stay paused, in seconds
    #[arg(long, default_value_t = 3)]
    pause_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    gcs_cli::logging::init()?;
    let args = Args::parse();
    let config = GcsConfig::from_env();

    let route = match &args.mission {
        Some(name) => {
            let client = MissionClient::new(args.url.clone().unwrap_or(config.api_url.clone()));
            let mut route = RouteModel::editable().with_export_altitude(config.default_altitude_m);
            client.load_into(&mut route, name).await?;
            route
        }
        None => args.route.to_route(config.default_altitude_m)?,
    };

    let mut sim = FlightSimulator::new()
        .with_step_size(args.step)
        .with_altitude(route.export_altitude_m());
    sim.start(route.waypoints())?;
    println!(
        "Flying {} waypoints, {:.0} m planned",
        route.len(),
        route.total_distance_m()
    );

    let mut ticker = interval(Duration::from_millis(args.interval_ms.max(1)));
    loop {
        ticker.tick().await;

        if args.pause_after == Some(sim.ticks()) && sim.pause() {
            println!("Mission paused for {}s", args.pause_secs);
            sleep(Duration::from_secs(args.pause_secs)).await;
            sim.resume();
            println!("Mission resumed");
            ticker.reset();
        }

        let Some(report) = sim.tick() else { break };
        tracing::info!(
            lat = report.lat,
            lon = report.lon,
            alt = report.altitude_m,
            heading = report.heading_deg.round(),
            battery = report.battery_pct,
            travelled_m = report.distance_travelled_m.round(),
            "Telemetry"
        );

        if sim.state() == FlightState::Completed {
            println!(
                "Trajectory complete - drone arrived after {:.0} m",
                sim.distance_travelled_m()
            );
            break;
        }
    }

    Ok(())
}
