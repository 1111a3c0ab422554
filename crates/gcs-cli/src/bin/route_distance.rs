use anyhow::Result;
use clap::Parser;
use gcs_cli::RouteInput;
use gcs_sdk::GcsConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Print the legs and total length of a route", long_about = None)]
struct Args {
    #[command(flatten)]
    route: RouteInput,

    /// Export altitude in meters (defaults to GCS_DEFAULT_ALT_M or 20)
    #[arg(long)]
    alt: Option<f64>,

    /// Print the mission payload as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    gcs_cli::logging::init()?;
    let args = Args::parse();
    let config = GcsConfig::from_env();

    if args.route.is_empty() {
        anyhow::bail!("No waypoints given (use --point lat,lon or --file)");
    }
    let route = args.route.to_route(args.alt.unwrap_or(config.default_altitude_m))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&route.export_points())?);
        return Ok(());
    }

    println!("{:>4}  {:>12}  {:>12}  {:>10}", "seq", "lat", "lon", "leg (m)");
    let legs = route.segment_distances_m();
    for (i, wp) in route.waypoints().iter().enumerate() {
        let leg = if i == 0 { 0.0 } else { legs[i - 1] };
        println!("{:>4}  {:>12.7}  {:>12.7}  {:>10.1}", wp.sequence, wp.lat, wp.lon, leg);
    }

    let total = route.total_distance_m();
    if total >= 1000.0 {
        println!("Total: {:.2} km over {} waypoints", total / 1000.0, route.len());
    } else {
        println!("Total: {:.0} m over {} waypoints", total, route.len());
    }
    if !route.can_send() {
        tracing::warn!("Route needs at least 2 waypoints before it can be sent");
    }

    Ok(())
}
