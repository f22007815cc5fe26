use std::{
    fs::File,
    io::{self, Read, Seek},
    path::Path,
};
use thiserror::Error;
use tracing::trace;
use zip::ZipArchive;

mod config;
pub mod delays;
pub mod directive;
pub mod driving;
pub mod stations;
pub mod values;

pub use config::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Archive has no city descriptor entry")]
    MissingCityFile,
    #[error("Could not find entry with name: {0}")]
    EntryNotFound(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    City,
    Lines,
    View,
    Text,
    Image,
}

/// Entry names of an archive grouped by kind, in processing order.
#[derive(Debug, Default, Clone)]
pub struct Entries {
    pub city: Option<String>,
    pub lines: Vec<String>,
    pub views: Vec<String>,
    pub texts: Vec<String>,
    pub images: Vec<String>,
}

impl Entries {
    fn push(&mut self, kind: EntryKind, name: String, config: &Config) {
        match kind {
            // The last descriptor listed wins
            EntryKind::City => self.city = Some(name),
            EntryKind::Lines if name.eq_ignore_ascii_case(&config.canonical_lines) => {
                self.lines.insert(0, name)
            }
            EntryKind::Lines => self.lines.push(name),
            EntryKind::View if name.eq_ignore_ascii_case(&config.canonical_view) => {
                self.views.insert(0, name)
            }
            EntryKind::View => self.views.push(name),
            EntryKind::Text => self.texts.push(name),
            EntryKind::Image => self.images.push(name),
        }
    }
}

/// A PMZ container opened for reading.
pub struct PmzArchive<R> {
    archive: ZipArchive<R>,
    entries: Entries,
    config: Config,
}

impl PmzArchive<File> {
    pub fn open<P: AsRef<Path>>(path: P, config: Config) -> Result<Self, self::Error> {
        let file = File::open(path)?;
        Self::new(file, config)
    }
}

impl<R: Read + Seek> PmzArchive<R> {
    pub fn new(reader: R, config: Config) -> Result<Self, self::Error> {
        let mut archive = ZipArchive::new(reader)?;
        let mut entries = Entries::default();
        for i in 0..archive.len() {
            let file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            match config.classify(&name) {
                Some(kind) => entries.push(kind, name, &config),
                None => trace!("Skipping entry {name}"),
            }
        }
        entries.texts.sort();
        Ok(Self {
            archive,
            entries,
            config,
        })
    }

    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads a text entry and decodes it with the configured single-byte encoding.
    pub fn read_text(&mut self, name: &str) -> Result<String, self::Error> {
        let index = self
            .archive
            .index_for_name(name)
            .ok_or(self::Error::EntryNotFound(name.to_string()))?;
        let mut file = self.archive.by_index(index)?;
        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes)?;
        let (text, _, had_errors) = self.config.encoding.decode(&bytes);
        if had_errors {
            trace!("Entry {name} contains bytes outside of {}", self.config.encoding.name());
        }
        Ok(text.into_owned())
    }
}
