use std::sync::RwLock;

use tracing::debug;

use super::{Error, NewReport, Report, ReportStore, next_id};

/// Keeps reports for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    reports: RwLock<Vec<Report>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Default::default()
    }
}

impl ReportStore for MemoryStore {
    fn list(&self) -> Result<Vec<Report>, Error> {
        let reports = self.reports.read().map_err(|_| Error::Poisoned)?;
        Ok(reports.clone())
    }

    fn create(&self, report: NewReport) -> Result<Report, Error> {
        report.validate()?;
        let mut reports = self.reports.write().map_err(|_| Error::Poisoned)?;
        let report = report.into_report(next_id(&reports))?;
        debug!("Stored report {} ({})", report.id, report.category);
        reports.push(report.clone());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase() {
        let store = MemoryStore::new();
        let first = store.create(NewReport::new(45.0, 4.0)).unwrap();
        let second = store.create(NewReport::new(45.1, 4.1)).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(second.timestamp >= first.timestamp);
    }

    #[test]
    fn rejected_report_is_not_listed() {
        let store = MemoryStore::new();
        assert!(store.create(NewReport::new(f64::NAN, 4.0)).is_err());
        assert!(store.list().unwrap().is_empty());
    }
}
