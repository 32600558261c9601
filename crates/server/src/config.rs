use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vigie-server")]
#[command(about = "Crowd-sourced sighting reports on a transit map")]
pub struct Config {
    /// Directory or zip holding entrances.txt and lines.txt
    #[arg(short, long, env = "VIGIE_DATASET")]
    pub dataset: PathBuf,

    /// Search radius for nearby stations, in meters
    #[arg(short, long, env = "VIGIE_RADIUS", default_value = "150")]
    pub radius: f64,

    /// Port to run the HTTP server on
    #[arg(short, long, env = "VIGIE_PORT", default_value = "3000")]
    pub port: u16,

    /// JSON lines file keeping the reports, in memory when absent
    #[arg(short, long, env = "VIGIE_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Submit a report from the given position to a running server
    Report {
        /// Base url of the server
        #[arg(long, env = "VIGIE_SERVER", default_value = "http://localhost:3000")]
        server: String,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Category key (controleur, musicien, incident)
        #[arg(short, long)]
        category: Option<String>,

        /// Index of the direction to pick among those listed
        #[arg(long, default_value = "0")]
        direction: usize,
    },
}
