use anyhow::Result;
use clap::{Parser, Subcommand};
use gcs_cli::RouteInput;
use gcs_core::RouteModel;
use gcs_sdk::{GcsConfig, MissionClient};

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage missions in the backend store", long_about = None)]
struct Args {
    /// Backend URL (defaults to GCS_API_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Save a route under a name
    Save {
        name: String,
        #[command(flatten)]
        route: RouteInput,
        /// Export altitude in meters
        #[arg(long)]
        alt: Option<f64>,
    },
    /// List stored mission names
    List,
    /// Load a mission into a route and print it
    Show {
        name: String,
        /// Print the loaded points as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    gcs_cli::logging::init()?;
    let args = Args::parse();
    let config = GcsConfig::from_env();
    let client = MissionClient::new(args.url.unwrap_or(config.api_url));

    match args.command {
        Command::Save { name, route, alt } => {
            let route = route.to_route(alt.unwrap_or(config.default_altitude_m))?;
            let mission = route.to_mission(name)?;
            let saved = client.save_mission(&mission).await?;
            println!(
                "Mission '{}' saved ({} waypoints, {:.0} m)",
                saved.mission_name,
                saved.waypoint_count,
                route.total_distance_m()
            );
        }
        Command::List => {
            let list = client.list_missions().await?;
            if list.missions.is_empty() {
                println!("No saved missions found");
            }
            for (i, name) in list.missions.iter().enumerate() {
                println!("{}. {}", i + 1, name);
            }
        }
        Command::Show { name, json } => {
            let mut route = RouteModel::editable().with_export_altitude(config.default_altitude_m);
            let loaded = client.load_into(&mut route, &name).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&route.export_points())?);
            } else {
                println!("Mission '{}' loaded ({} waypoints)", name, loaded);
                for wp in route.waypoints() {
                    println!("  {:>3}: {:.7}, {:.7}", wp.sequence, wp.lat, wp.lon);
                }
                println!("Total distance: {:.0} m", route.total_distance_m());
            }
        }
    }

    Ok(())
}
