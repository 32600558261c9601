mod api;
mod client;
mod config;
mod dto;
mod state;

use crate::{
    client::{ArgsChooser, HttpReportApi},
    config::{Command, Config},
    state::AppState,
};
use clap::Parser;
use std::{process::ExitCode, sync::Arc, time::Instant};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use vigie::{
    dataset::{self, Dataset},
    network::Network,
    reports::{FileStore, MemoryStore, ReportStore},
    shared::{Coordinate, Distance},
    workflow::{Layer, LayerSet, Outcome, Workflow},
};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::parse();

    info!("Loading data...");
    let now = Instant::now();
    let network = match load_network(&config) {
        Ok(network) => network,
        Err(err) => {
            error!("Failed to load dataset {}: {err}", config.dataset.display());
            return ExitCode::FAILURE;
        }
    };
    info!("Loading data took {:?}", now.elapsed());
    let radius = Distance::from_meters(config.radius);

    match config.command {
        None | Some(Command::Serve) => serve(&config, network, radius).await,
        Some(Command::Report {
            ref server,
            lat,
            lng,
            ref category,
            direction,
        }) => {
            let chooser = ArgsChooser {
                category: category.clone(),
                direction,
            };
            report(&network, server, Coordinate::from((lat, lng)), chooser, radius).await
        }
    }
}

fn load_network(config: &Config) -> Result<Network, dataset::Error> {
    let path = config.dataset.canonicalize()?;
    let dataset = Dataset::new(dataset::Config::default()).from_path(path);
    Network::new().with_dataset(dataset)
}

async fn serve(config: &Config, network: Network, radius: Distance) -> ExitCode {
    let store: Arc<dyn ReportStore> = match &config.store {
        Some(path) => match FileStore::open(path) {
            Ok(store) => Arc::new(store),
            Err(err) => {
                error!("Failed to open report store {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => {
            warn!("No report store given, reports are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };
    let state = Arc::new(AppState {
        network,
        store,
        radius,
    });

    let app = api::router(state);

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await
    {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {}: {err}", config.port);
            return ExitCode::FAILURE;
        }
    };
    info!("Listening to port {}", config.port);
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn report(
    network: &Network,
    server: &str,
    position: Coordinate,
    chooser: ArgsChooser,
    radius: Distance,
) -> ExitCode {
    let api = HttpReportApi::new(server);
    let mut workflow =
        Workflow::new(network, position, api, chooser, LayerSet::new()).with_radius(radius);

    let outcome = workflow.submit().await;
    match outcome {
        Ok(Outcome::Submitted {
            report,
            station,
            direction,
            total,
        }) => {
            match direction {
                Some(direction) => println!(
                    "Report {} sent from {station} (line {} toward {})",
                    report.id, direction.line, direction.terminus
                ),
                None => println!("Report {} sent from {station}", report.id),
            }
            println!("{total} reports on the map:");
            for marker in workflow.surface().markers(Layer::Reports) {
                println!("  {} ({})", marker.label, marker.coordinate);
            }
            ExitCode::SUCCESS
        }
        Ok(Outcome::NothingNearby) => {
            println!("No station within {radius} of {position}");
            ExitCode::FAILURE
        }
        Ok(Outcome::LocationUnavailable(reason)) => {
            println!("Location unavailable: {reason}");
            ExitCode::FAILURE
        }
        Ok(Outcome::Cancelled) => {
            println!("Report cancelled");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Report not sent: {err}");
            ExitCode::FAILURE
        }
    }
}
