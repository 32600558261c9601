use std::{
    fs::{File, OpenOptions},
    io::{Read, Write},
    path::Path,
    sync::RwLock,
};

use tracing::{debug, info, warn};

use super::{Error, NewReport, Report, ReportStore, next_id};

#[derive(Debug)]
struct FileState {
    reports: Vec<Report>,
    file: File,
}

/// Reports stored as JSON lines, one report per line, appended on create.
#[derive(Debug)]
pub struct FileStore {
    state: RwLock<FileState>,
}

impl FileStore {
    /// Opens or creates the file and reads every stored report.
    ///
    /// A last line without its newline is the remains of an interrupted write
    /// and is cut off.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(path)?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let mut reports: Vec<Report> = Vec::new();
        let mut complete = 0;
        for line in contents.split_inclusive('\n') {
            if !line.ends_with('\n') {
                warn!(
                    "Dropping unterminated line at the end of {}",
                    path.display()
                );
                break;
            }
            complete += line.len();
            if line.trim().is_empty() {
                continue;
            }
            reports.push(serde_json::from_str(line)?);
        }
        if complete < contents.len() {
            file.set_len(complete as u64)?;
        }
        info!("Opened {} with {} reports", path.display(), reports.len());

        Ok(Self {
            state: RwLock::new(FileState { reports, file }),
        })
    }
}

/// Appends `line`, truncating back to the previous length when the write fails.
fn append(file: &mut File, line: &[u8]) -> Result<(), Error> {
    let previous_len = file.metadata()?.len();
    let written = file.write_all(line).and_then(|()| file.flush());
    if let Err(err) = written {
        warn!("Write failed, truncating back to {previous_len} bytes");
        file.set_len(previous_len)?;
        return Err(err.into());
    }
    Ok(())
}

impl ReportStore for FileStore {
    fn list(&self) -> Result<Vec<Report>, Error> {
        let state = self.state.read().map_err(|_| Error::Poisoned)?;
        Ok(state.reports.clone())
    }

    fn create(&self, report: NewReport) -> Result<Report, Error> {
        report.validate()?;
        let mut state = self.state.write().map_err(|_| Error::Poisoned)?;
        let report = report.into_report(next_id(&state.reports))?;

        let mut line = serde_json::to_string(&report)?;
        line.push('\n');
        append(&mut state.file, line.as_bytes())?;

        debug!("Stored report {} ({})", report.id, report.category);
        state.reports.push(report.clone());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.jsonl");

        let created = {
            let store = FileStore::open(&path).unwrap();
            store
                .create(NewReport::new(45.7578, 4.8320).with_category("musicien"))
                .unwrap()
        };

        let store = FileStore::open(&path).unwrap();
        let reports = store.list().unwrap();
        assert_eq!(reports, vec![created]);

        let next = store.create(NewReport::new(45.76, 4.83)).unwrap();
        assert_eq!(next.id, 2);
    }

    #[test]
    fn corrupted_line_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.jsonl");
        std::fs::write(&path, "{not json}\n").unwrap();
        assert!(matches!(FileStore::open(&path), Err(Error::Json(_))));
    }

    #[test]
    fn interrupted_write_is_cut_off_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.jsonl");
        let created = {
            let store = FileStore::open(&path).unwrap();
            store.create(NewReport::new(45.0, 4.0)).unwrap()
        };
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(br#"{"id":2,"lat":45.1,"ln"#).unwrap();
        drop(file);

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.list().unwrap(), vec![created.clone()]);
        let next = store.create(NewReport::new(45.1, 4.1)).unwrap();
        assert_eq!(next.id, 2);
        drop(store);

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.list().unwrap(), vec![created, next]);
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);
    }

    #[test]
    fn failed_append_leaves_no_fragment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.jsonl");
        std::fs::write(&path, "{}\n").unwrap();
        let mut read_only = File::open(&path).unwrap();

        assert!(matches!(
            append(&mut read_only, b"{\"id\":1}\n"),
            Err(Error::Io(_))
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");
    }
}
