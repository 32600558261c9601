//! Client side report submission.
//!
//! The workflow chains the pieces a user goes through when reporting:
//! position, nearest station, direction, category, submission and a refresh
//! of the reports drawn on the map. Everything outside the crate is reached
//! through a port: [`LocationSource`], [`ReportApi`], [`Chooser`] and
//! [`MapSurface`].

use std::{error::Error as StdError, future::Future, sync::Arc};

use chrono::Local;
use thiserror::Error;
use tracing::{info, warn};

mod render;
pub use render::*;

use crate::{
    network::{DEFAULT_RADIUS, Direction, Network, Station},
    reports::{self, Category, NewReport, Report, ReportStore},
    shared::{Coordinate, Distance},
};

/// View used before the position of the user is known.
pub const DEFAULT_VIEW: (Coordinate, u8) = (
    Coordinate {
        latitude: 45.764043,
        longitude: 4.835659,
    },
    13,
);
pub const USER_ZOOM: u8 = 15;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Position unavailable")]
    PositionUnavailable,
    #[error("Timed out waiting for a position")]
    Timeout,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Report api error: {0}")]
    Api(#[source] Box<dyn StdError + Send + Sync>),
    #[error("No direction {index}, only {count} offered")]
    InvalidDirection { index: usize, count: usize },
}

impl Error {
    fn api<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Error::Api(Box::new(err))
    }
}

/// Device position provider.
pub trait LocationSource {
    fn current_position(&self) -> impl Future<Output = Result<Coordinate, GeolocationError>>;
}

/// A fixed position, for when the coordinate is already known.
impl LocationSource for Coordinate {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        Ok(*self)
    }
}

/// Remote or local access to the report store.
pub trait ReportApi {
    type Error: StdError + Send + Sync + 'static;

    fn list_reports(&self) -> impl Future<Output = Result<Vec<Report>, Self::Error>> + Send;
    fn create_report(
        &self,
        report: NewReport,
    ) -> impl Future<Output = Result<Report, Self::Error>> + Send;
}

impl<S: ReportStore> ReportApi for S {
    type Error = reports::Error;

    async fn list_reports(&self) -> Result<Vec<Report>, Self::Error> {
        self.list()
    }

    async fn create_report(&self, report: NewReport) -> Result<Report, Self::Error> {
        self.create(report)
    }
}

/// User decisions. Returning None cancels the submission.
pub trait Chooser {
    /// Index into `directions`, which is never empty.
    fn choose_direction(&mut self, station: &Station, directions: &[Direction]) -> Option<usize>;
    fn choose_category(&mut self, categories: &[Category]) -> Option<Category>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Submitted {
        report: Report,
        station: Arc<str>,
        /// Shown to the user only, it is not part of the submitted report.
        direction: Option<Direction>,
        /// Number of reports drawn after the refresh.
        total: usize,
    },
    NothingNearby,
    LocationUnavailable(GeolocationError),
    Cancelled,
}

pub struct Workflow<'a, L, A, C, M> {
    network: &'a Network,
    location: L,
    api: A,
    chooser: C,
    surface: M,
    radius: Distance,
}

impl<'a, L, A, C, M> Workflow<'a, L, A, C, M>
where
    L: LocationSource,
    A: ReportApi,
    C: Chooser,
    M: MapSurface,
{
    pub fn new(network: &'a Network, location: L, api: A, chooser: C, mut surface: M) -> Self {
        let (center, zoom) = DEFAULT_VIEW;
        surface.set_view(center, zoom);
        Self {
            network,
            location,
            api,
            chooser,
            surface,
            radius: DEFAULT_RADIUS,
        }
    }

    pub fn with_radius(mut self, radius: Distance) -> Self {
        self.radius = radius;
        self
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }

    pub fn into_surface(self) -> M {
        self.surface
    }

    /// Centers the map on the user and redraws the user marker.
    /// On failure the map is left as it was.
    pub async fn locate(&mut self) -> Result<Coordinate, GeolocationError> {
        let position = self.location.current_position().await?;
        self.surface.set_view(position, USER_ZOOM);
        self.surface.clear_layer(Layer::User);
        self.surface.add_marker(Marker {
            layer: Layer::User,
            coordinate: position,
            label: "Vous êtes ici".to_string(),
            color: "green",
        });
        Ok(position)
    }

    /// Lists every report and redraws the reports layer. Returns the report count.
    pub async fn refresh(&mut self) -> Result<usize, Error> {
        let reports = self.api.list_reports().await.map_err(Error::api)?;
        self.surface.clear_layer(Layer::Reports);
        for report in reports.iter() {
            self.surface.add_marker(report_marker(report));
        }
        Ok(reports.len())
    }

    pub async fn submit(&mut self) -> Result<Outcome, Error> {
        let position = match self.locate().await {
            Ok(position) => position,
            Err(reason) => {
                warn!("Location unavailable: {reason}");
                return Ok(Outcome::LocationUnavailable(reason));
            }
        };

        let network = self.network;
        let Some(found) = network.nearest_station(&position, self.radius) else {
            info!("No station within {} of {position}", self.radius);
            return Ok(Outcome::NothingNearby);
        };
        let station = found.station;

        let directions = network.directions(&station.name);
        let direction = if directions.is_empty() {
            None
        } else {
            let Some(index) = self.chooser.choose_direction(station, &directions) else {
                return Ok(Outcome::Cancelled);
            };
            let direction = directions
                .get(index)
                .cloned()
                .ok_or(Error::InvalidDirection {
                    index,
                    count: directions.len(),
                })?;
            Some(direction)
        };

        let Some(category) = self.chooser.choose_category(&Category::CHOICES) else {
            return Ok(Outcome::Cancelled);
        };

        let report = NewReport::new(station.center.latitude, station.center.longitude)
            .with_category(category.key());
        let report = self
            .api
            .create_report(report)
            .await
            .map_err(Error::api)?;
        info!(
            "Reported {} at {} ({})",
            report.category, station.name, found.distance
        );

        let total = self.refresh().await?;
        Ok(Outcome::Submitted {
            report,
            station: station.name.clone(),
            direction,
            total,
        })
    }
}

fn report_marker(report: &Report) -> Marker {
    let category = report.display_category();
    let time = report.timestamp.with_timezone(&Local).format("%H:%M:%S");
    Marker {
        layer: Layer::Reports,
        coordinate: Coordinate::from((report.lat, report.lng)),
        label: format!("{} à {time}", category.label()),
        color: category.color(),
    }
}
