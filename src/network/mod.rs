use std::{cmp::Ordering, collections::HashMap, sync::Arc, time::Instant};

mod models;
pub use models::*;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    dataset::{self, Dataset, EntranceRecord, LineStopRecord},
    shared::{
        self,
        fuzzy,
        geo::{Coordinate, Distance},
    },
};

/// Search radius used when none is configured.
pub const DEFAULT_RADIUS: Distance = Distance::from_meters(150.0);

/// Separators after which an entrance name carries a qualifier (exit number, side, ...).
const QUALIFIER_SEPARATORS: [&str; 3] = [" - ", " (", ","];

type NameToIndex = HashMap<Arc<str>, usize>;

#[derive(Debug, Clone, Default)]
pub struct Network {
    pub stations: Box<[Station]>,
    pub lines: Box<[Line]>,

    station_lookup: Arc<NameToIndex>,
}

impl Network {
    pub fn new() -> Self {
        Default::default()
    }

    /// Streams the dataset into the network, grouping entrances into stations
    /// and ordering every line by its station sequence.
    pub fn with_dataset(self, dataset: Dataset) -> Result<Self, dataset::Error> {
        let now = Instant::now();
        let mut entrances: Vec<EntranceRecord> = Vec::new();
        dataset.stream_entrances(|(_, record)| entrances.push(record))?;
        let mut line_stops: Vec<LineStopRecord> = Vec::new();
        dataset.stream_line_stops(|(_, record)| line_stops.push(record))?;

        let network = self.with_records(entrances, line_stops);
        info!(
            "Loaded {} stations and {} lines in {:?}",
            network.stations.len(),
            network.lines.len(),
            now.elapsed()
        );
        Ok(network)
    }

    pub fn with_records<E, L>(mut self, entrances: E, line_stops: L) -> Self
    where
        E: IntoIterator<Item = EntranceRecord>,
        L: IntoIterator<Item = LineStopRecord>,
    {
        let (stations, station_lookup) = group_entrances(entrances);
        self.stations = stations.into();
        self.station_lookup = station_lookup.into();
        self.lines = build_lines(line_stops).into();
        self
    }

    /// Looks a station up by its base name, ignoring case and entrance qualifiers.
    pub fn station_by_name(&self, name: &str) -> Option<&Station> {
        let index = self.station_lookup.get(normalize(name).as_str())?;
        Some(&self.stations[*index])
    }

    /// All stations whose center is within `radius`, nearest first.
    /// Stations at the same distance keep their dataset order.
    pub fn stations_within(
        &self,
        coordinate: &Coordinate,
        radius: Distance,
    ) -> Vec<StationMatch<'_>> {
        let mut matches: Vec<StationMatch> = self
            .stations
            .par_iter()
            .filter_map(|station| {
                let distance = station.center.distance(coordinate);
                (distance <= radius).then_some(StationMatch { station, distance })
            })
            .collect();
        matches.par_sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
        });
        matches
    }

    /// The closest station within `radius`, or None when nothing is nearby.
    pub fn nearest_station(
        &self,
        coordinate: &Coordinate,
        radius: Distance,
    ) -> Option<StationMatch<'_>> {
        let nearest = self.stations_within(coordinate, radius).into_iter().next();
        match &nearest {
            Some(found) => debug!(
                "Nearest station to {coordinate} is {} at {}",
                found.station.name, found.distance
            ),
            None => debug!("No station within {radius} of {coordinate}"),
        }
        nearest
    }

    /// Both branches of every line through `station_name`.
    ///
    /// The line's station names are compared against the lower cased first
    /// two tokens of the base name of `station_name`, so "Hôtel de Ville Louis
    /// Pradel" finds "Hôtel de Ville". The first matching station of a line is
    /// the pivot.
    pub fn directions(&self, station_name: &str) -> Vec<Direction> {
        let prefix = fuzzy::prefix(base_name(station_name));
        self.lines
            .iter()
            .filter_map(|line| {
                let pivot = line
                    .stations
                    .iter()
                    .position(|name| fuzzy::prefix_matches(&prefix, name))?;
                Some((line, pivot))
            })
            .flat_map(|(line, pivot)| {
                let forward: Box<[Arc<str>]> = line.stations[pivot..].iter().cloned().collect();
                let backward: Box<[Arc<str>]> =
                    line.stations[..=pivot].iter().rev().cloned().collect();
                [forward, backward].into_iter().filter_map(move |stations| {
                    Some(Direction {
                        line: line.label.clone(),
                        terminus: stations.last()?.clone(),
                        stations,
                    })
                })
            })
            .collect()
    }

    /// Does a fuzzy search on all the stations, comparing their name to the needle.
    pub fn search_stations(&self, needle: &str) -> Vec<&Station> {
        shared::search(needle, &self.stations)
    }
}

/// Strips the trailing qualifier of an entrance name.
pub fn base_name(name: &str) -> &str {
    let end = QUALIFIER_SEPARATORS
        .iter()
        .filter_map(|separator| name.find(separator))
        .min()
        .unwrap_or(name.len());
    name[..end].trim()
}

fn normalize(name: &str) -> String {
    base_name(name).to_lowercase()
}

fn group_entrances<E>(entrances: E) -> (Vec<Station>, NameToIndex)
where
    E: IntoIterator<Item = EntranceRecord>,
{
    let mut stations: Vec<Station> = Vec::new();
    let mut lookup: NameToIndex = HashMap::new();
    for record in entrances {
        let key = normalize(&record.entrance_name);
        if key.is_empty() {
            debug!(
                "Ignoring entrance without name at {}, {}",
                record.entrance_lat, record.entrance_lon
            );
            continue;
        }
        let index = match lookup.get(key.as_str()) {
            Some(index) => *index,
            None => {
                let index = stations.len();
                let key: Arc<str> = key.into();
                let name: Arc<str> = base_name(&record.entrance_name).into();
                stations.push(Station::new(index as u32, name, key.clone()));
                lookup.insert(key, index);
                index
            }
        };
        stations[index].add_entrance(Coordinate::from((
            record.entrance_lat,
            record.entrance_lon,
        )));
    }
    (stations, lookup)
}

fn build_lines<L>(line_stops: L) -> Vec<Line>
where
    L: IntoIterator<Item = LineStopRecord>,
{
    let mut order: Vec<Arc<str>> = Vec::new();
    let mut grouped: HashMap<Arc<str>, Vec<(u32, Arc<str>)>> = HashMap::new();
    for record in line_stops {
        let label: Arc<str> = record.line_label.into();
        let stops = grouped.entry(label.clone()).or_insert_with(|| {
            order.push(label);
            Vec::new()
        });
        stops.push((record.station_sequence, record.station_name.into()));
    }

    order
        .into_iter()
        .filter_map(|label| {
            let mut stops = grouped.remove(&label)?;
            stops.sort_by_key(|(sequence, _)| *sequence);
            Some(Line {
                label,
                stations: stops.into_iter().map(|(_, name)| name).collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_qualifiers() {
        assert_eq!(base_name("Bellecour - Sortie 2"), "Bellecour");
        assert_eq!(base_name("Perrache (Accès Nord)"), "Perrache");
        assert_eq!(base_name("Cordeliers, côté Rhône"), "Cordeliers");
        assert_eq!(base_name("Vaulx-en-Velin La Soie"), "Vaulx-en-Velin La Soie");
    }

    #[test]
    fn lines_follow_sequence_not_row_order() {
        let stops = [("A", 3, "Gorge de Loup"), ("A", 1, "Perrache"), ("A", 2, "Ampère")].map(
            |(label, sequence, name)| LineStopRecord {
                line_label: label.into(),
                station_sequence: sequence,
                station_name: name.into(),
            },
        );
        let lines = build_lines(stops);
        assert_eq!(lines.len(), 1);
        let names: Vec<_> = lines[0].stations.iter().map(|name| name.as_ref()).collect();
        assert_eq!(names, ["Perrache", "Ampère", "Gorge de Loup"]);
    }
}
