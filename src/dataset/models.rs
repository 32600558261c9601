use serde::{Deserialize, Serialize};

/// One physical station entrance. Several entrances share a base name.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct EntranceRecord {
    pub entrance_name: String,
    pub entrance_lat: f64,
    pub entrance_lon: f64,
}

/// One stop of a line, positioned by `station_sequence`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct LineStopRecord {
    pub line_label: String,
    pub station_sequence: u32,
    pub station_name: String,
}
