use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use globeteller::{
    config::ClientConfig,
    gpx_export::write_trip_gpx,
    loader::load_trip,
    route::{camera_position, summarize, trip_path},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(author, version, about = "Inspect and convert Globeteller trip files")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a trip file and print its summary
    Inspect {
        /// Path to a trip .json file
        trip: PathBuf,
    },
    /// Print the globe path (3D arc points) of a trip as JSON
    Path {
        trip: PathBuf,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Export a trip as a GPX 1.1 track
    Export {
        trip: PathBuf,
        /// Where the .gpx file should be written
        #[arg(long)]
        output: PathBuf,
    },
    /// Show the client configuration read from the environment
    Config,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match Args::parse().command {
        Command::Inspect { trip } => {
            let trip = load_trip(&trip)?;
            let summary = summarize(&trip);
            println!("title:       {}", trip.title());
            if let Some(language) = trip.language() {
                println!("language:    {language}");
            }
            println!("segments:    {}", summary.segment_count);
            println!("coordinates: {}", summary.coordinate_count);
            println!("distance:    {:.1} km", summary.distance_km);
            println!("start:       {}", summary.start_time.to_rfc3339());
            println!("end:         {}", summary.end_time.to_rfc3339());
            println!("duration:    {}", format_duration(trip.total_duration()));
            for (index, segment) in trip.segments().iter().enumerate() {
                let transport = segment.transport().map(|t| t.to_string());
                println!(
                    "  [{index}] {} {} point(s){}{}",
                    segment.time(),
                    segment.coordinates().len(),
                    transport.map(|t| format!(" by {t}")).unwrap_or_default(),
                    segment.note().map(|n| format!(" - {n}")).unwrap_or_default(),
                );
            }
        }
        Command::Path { trip, pretty } => {
            let trip = load_trip(&trip)?;
            let output = serde_json::json!({
                "path": trip_path(&trip),
                "camera": camera_position(&trip),
            });
            let text = if pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{text}");
        }
        Command::Export { trip, output } => {
            let trip = load_trip(&trip)?;
            let mut writer = BufWriter::new(File::create(&output)?);
            write_trip_gpx(&trip, &mut writer)?;
            writer.flush()?;
            tracing::info!("wrote {:?} to {:?}", trip.title(), output);
        }
        Command::Config => {
            println!("{}", ClientConfig::from_env());
        }
    }
    Ok(())
}

fn format_duration(duration: chrono::Duration) -> String {
    let total_minutes = duration.num_minutes();
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    }
}
