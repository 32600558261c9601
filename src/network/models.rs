use std::sync::Arc;

use crate::shared::{
    Identifiable,
    geo::{Coordinate, Distance},
};

/// A named transit stop, merged from all of its physical entrances.
#[derive(Debug, Default, Clone)]
pub struct Station {
    /// Position of the station in [`super::Network::stations`].
    pub index: u32,
    /// Display name, the base name of the first entrance seen.
    pub name: Arc<str>,
    /// Lower cased base name, used as grouping key and for search.
    pub normalized_name: Arc<str>,
    pub entrances: Vec<Coordinate>,
    /// Arithmetic mean of [`Station::entrances`].
    pub center: Coordinate,
}

impl Station {
    pub(crate) fn new(index: u32, name: Arc<str>, normalized_name: Arc<str>) -> Self {
        Self {
            index,
            name,
            normalized_name,
            entrances: Vec::new(),
            center: Coordinate::default(),
        }
    }

    /// Folds one more entrance into the running mean of the center.
    pub(crate) fn add_entrance(&mut self, coordinate: Coordinate) {
        self.entrances.push(coordinate);
        self.center.fold_mean(&coordinate, self.entrances.len());
    }
}

impl Identifiable for Station {
    fn normalized_name(&self) -> &str {
        &self.normalized_name
    }
}

/// A transit line, stations ordered from one terminus to the other.
#[derive(Debug, Default, Clone)]
pub struct Line {
    pub label: Arc<str>,
    pub stations: Box<[Arc<str>]>,
}

/// One branch of a line, starting at the pivot station and ending at `terminus`.
#[derive(Debug, Clone, PartialEq)]
pub struct Direction {
    pub line: Arc<str>,
    pub terminus: Arc<str>,
    /// Pivot first, terminus last.
    pub stations: Box<[Arc<str>]>,
}

#[derive(Debug, Clone, Copy)]
pub struct StationMatch<'a> {
    pub station: &'a Station,
    pub distance: Distance,
}
