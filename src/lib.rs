pub mod dataset;
pub mod network;
pub mod reports;
pub mod shared;
pub mod workflow;

pub mod prelude {
    pub use crate::dataset::Dataset;
    pub use crate::network::{DEFAULT_RADIUS, Direction, Line, Network, Station, StationMatch};
    pub use crate::reports::{Category, FileStore, MemoryStore, NewReport, Report, ReportStore};
    pub use crate::shared::{Coordinate, Distance};
    pub use crate::workflow::{
        Chooser, GeolocationError, LocationSource, MapSurface, Outcome, ReportApi, Workflow,
    };
}
