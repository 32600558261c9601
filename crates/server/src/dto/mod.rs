mod report;
mod station;

pub use report::*;
pub use station::*;
