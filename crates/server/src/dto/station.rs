use serde::{Deserialize, Serialize};
use vigie::{
    network::{Direction, Station, StationMatch},
    reports::Category,
    shared::Coordinate,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationDto {
    pub name: String,
    pub coordinate: Coordinate,
    pub entrances: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,
}

impl StationDto {
    pub fn from(station: &Station) -> Self {
        Self {
            name: station.name.to_string(),
            coordinate: station.center,
            entrances: station.entrances.len(),
            distance_m: None,
        }
    }

    pub fn from_match(found: &StationMatch) -> Self {
        Self {
            distance_m: Some(found.distance.as_meters()),
            ..Self::from(found.station)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionDto {
    pub line: String,
    pub terminus: String,
    pub stations: Vec<String>,
}

impl DirectionDto {
    pub fn from(direction: &Direction) -> Self {
        Self {
            line: direction.line.to_string(),
            terminus: direction.terminus.to_string(),
            stations: direction
                .stations
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryDto {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

impl CategoryDto {
    pub fn from(category: Category) -> Self {
        Self {
            key: category.key(),
            label: category.label(),
            color: category.color(),
        }
    }
}
