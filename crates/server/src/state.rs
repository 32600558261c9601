use std::sync::Arc;
use vigie::{network::Network, reports::ReportStore, shared::Distance};

pub struct AppState {
    pub network: Network,
    pub store: Arc<dyn ReportStore>,
    /// Radius used by station lookups that do not pass one.
    pub radius: Distance,
}
