//! Static reference data: station entrances and line topology.
//!
//! Both files are CSV and are read either from a plain directory or from a
//! zip archive, which is picked from the path extension.

use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::warn;
use zip::ZipArchive;

mod config;
pub mod models;
pub use config::*;
pub use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
}

#[derive(Default, Debug, Clone)]
pub enum StorageType {
    #[default]
    None,
    Directory(PathBuf),
    Zip(PathBuf),
}

#[derive(Default)]
pub struct Dataset {
    config: Config,
    storage: StorageType,
}

impl Dataset {
    pub fn new(config: self::Config) -> Self {
        Self {
            config,
            storage: Default::default(),
        }
    }

    pub fn from_zip<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.storage = StorageType::Zip(path.into());
        self
    }

    pub fn from_directory<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.storage = StorageType::Directory(path.into());
        self
    }

    /// Picks zip storage for `.zip` paths and directory storage otherwise.
    pub fn from_path<P: Into<PathBuf>>(self, path: P) -> Self {
        let path = path.into();
        let is_zip = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
        if is_zip {
            self.from_zip(path)
        } else {
            self.from_directory(path)
        }
    }

    pub fn storage(&self) -> &StorageType {
        &self.storage
    }

    pub fn stream_entrances<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, EntranceRecord)),
    {
        self.stream(&self.config.entrances_file_name, f)
    }

    pub fn stream_line_stops<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, LineStopRecord)),
    {
        self.stream(&self.config.lines_file_name, f)
    }

    fn stream<T, F>(&self, file_name: &str, f: F) -> Result<(), self::Error>
    where
        T: DeserializeOwned,
        F: FnMut((usize, T)),
    {
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Directory(path) => stream_from_directory(path, file_name, f),
            StorageType::Zip(path) => stream_from_zip(path, file_name, f),
        }
    }
}

fn stream_from_directory<T, F>(dir: &Path, file_name: &str, f: F) -> Result<(), self::Error>
where
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let path = dir.join(file_name);
    let file = File::open(&path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => self::Error::FileNotFound(file_name.to_string()),
        _ => self::Error::Io(err),
    })?;
    stream_csv(file, file_name, f)
}

fn stream_from_zip<T, F>(zip_path: &Path, file_name: &str, f: F) -> Result<(), self::Error>
where
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let zip_file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(zip_file)?;
    let index = archive
        .index_for_name(file_name)
        .ok_or(self::Error::FileNotFound(file_name.to_string()))?;
    let file = archive.by_index(index)?;
    stream_csv(file, file_name, f)
}

fn stream_csv<R, T, F>(reader: R, file_name: &str, f: F) -> Result<(), self::Error>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    reader
        .deserialize()
        .filter_map(|record| match record {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("Skipping malformed row in {file_name}: {err}");
                None
            }
        })
        .enumerate()
        .for_each(f);
    Ok(())
}
