use crate::shared::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// The current position of the user.
    User,
    /// One marker per stored report.
    Reports,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub layer: Layer,
    pub coordinate: Coordinate,
    /// Popup text.
    pub label: String,
    pub color: &'static str,
}

/// Whatever draws the map. Implemented over the mapping library in use.
pub trait MapSurface {
    fn add_marker(&mut self, marker: Marker);
    fn clear_layer(&mut self, layer: Layer);
    fn set_view(&mut self, center: Coordinate, zoom: u8);
}

/// Surface that only keeps what was drawn.
#[derive(Debug, Clone, Default)]
pub struct LayerSet {
    pub view: Option<(Coordinate, u8)>,
    markers: Vec<Marker>,
}

impl LayerSet {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn markers(&self, layer: Layer) -> impl Iterator<Item = &Marker> {
        self.markers
            .iter()
            .filter(move |marker| marker.layer == layer)
    }
}

impl MapSurface for LayerSet {
    fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn clear_layer(&mut self, layer: Layer) {
        self.markers.retain(|marker| marker.layer != layer);
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.view = Some((center, zoom));
    }
}

impl<M: MapSurface + ?Sized> MapSurface for &mut M {
    fn add_marker(&mut self, marker: Marker) {
        (**self).add_marker(marker);
    }

    fn clear_layer(&mut self, layer: Layer) {
        (**self).clear_layer(layer);
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        (**self).set_view(center, zoom);
    }
}
