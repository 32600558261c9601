//! Sighting reports and the stores keeping them.
//!
//! A report is created once and never changes afterwards. Stores only know
//! two operations, [`ReportStore::list`] and [`ReportStore::create`].

use crate::shared::Coordinate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{io, sync::Arc};
use thiserror::Error;

mod category;
mod file;
mod memory;
pub use category::*;
pub use file::*;
pub use memory::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Coordinates missing or invalid: {lat}, {lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },
    #[error("Category must be a non-empty string")]
    InvalidCategory,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Report store lock poisoned")]
    Poisoned,
}

impl Error {
    /// True when the caller sent bad input, as opposed to a storage fault.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidCoordinate { .. } | Error::InvalidCategory
        )
    }
}

/// A stored sighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: u64,
    pub lat: f64,
    pub lng: f64,
    /// Category key as submitted, see [`Category::from_key`] for display.
    #[serde(rename = "type")]
    pub category: String,
    /// Creation time, assigned by the store.
    pub timestamp: DateTime<Utc>,
}

impl Report {
    pub fn display_category(&self) -> Category {
        Category::from_key(&self.category)
    }
}

/// A report as submitted, before the store gives it an id and a timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub lat: f64,
    pub lng: f64,
    pub category: Option<String>,
}

impl NewReport {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            category: None,
        }
    }

    pub fn with_category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !Coordinate::from((self.lat, self.lng)).is_finite() {
            return Err(Error::InvalidCoordinate {
                lat: self.lat,
                lng: self.lng,
            });
        }
        if let Some(category) = &self.category
            && category.trim().is_empty()
        {
            return Err(Error::InvalidCategory);
        }
        Ok(())
    }

    /// Validates and stamps the report. Stores call this before writing anything.
    pub(crate) fn into_report(self, id: u64) -> Result<Report, Error> {
        self.validate()?;
        let category = match self.category {
            Some(category) => category.trim().to_string(),
            None => Category::DEFAULT_KEY.to_string(),
        };
        Ok(Report {
            id,
            lat: self.lat,
            lng: self.lng,
            category,
            timestamp: Utc::now(),
        })
    }
}

/// Persisted collection of reports.
pub trait ReportStore: Send + Sync {
    /// All reports, in creation order.
    fn list(&self) -> Result<Vec<Report>, Error>;

    /// Validates, stamps and persists a report. Nothing is written when validation fails.
    fn create(&self, report: NewReport) -> Result<Report, Error>;
}

impl<S: ReportStore + ?Sized> ReportStore for Arc<S> {
    fn list(&self) -> Result<Vec<Report>, Error> {
        (**self).list()
    }

    fn create(&self, report: NewReport) -> Result<Report, Error> {
        (**self).create(report)
    }
}

impl<S: ReportStore + ?Sized> ReportStore for &S {
    fn list(&self) -> Result<Vec<Report>, Error> {
        (**self).list()
    }

    fn create(&self, report: NewReport) -> Result<Report, Error> {
        (**self).create(report)
    }
}

pub(crate) fn next_id(reports: &[Report]) -> u64 {
    reports.last().map_or(1, |report| report.id + 1)
}

#[test]
fn missing_category_gets_default() {
    let report = NewReport::new(45.76, 4.83).into_report(1).unwrap();
    assert_eq!(report.category, Category::DEFAULT_KEY);
}

#[test]
fn blank_category_is_rejected() {
    let result = NewReport::new(45.76, 4.83).with_category("  ").into_report(1);
    assert!(matches!(result, Err(Error::InvalidCategory)));
}

#[test]
fn infinite_coordinate_is_rejected() {
    let result = NewReport::new(45.76, f64::INFINITY).into_report(1);
    assert!(result.unwrap_err().is_validation());
}

#[test]
fn report_serializes_with_wire_names() {
    let report = NewReport::new(45.76, 4.83)
        .with_category("musicien")
        .into_report(7)
        .unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["id"], 7);
    assert_eq!(value["type"], "musicien");
    assert!(value["timestamp"].is_string());
}
