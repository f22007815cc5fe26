use std::{collections::HashMap, path::PathBuf, sync::Arc};

use chrono::{DateTime, Utc};

mod directory;
mod entities;
mod locale;
mod source;
mod view;

pub use directory::*;
pub use entities::*;
pub use locale::*;
pub use view::*;

use crate::shared::geo::Coordinate;

/// The normalized network built from one archive.
///
/// Every entity lives in a dense array and refers to others by index. Names and descriptions
/// are indices into the locale text tables, so switching locale never touches structural data.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub system_name: Arc<str>,
    pub file_path: Option<PathBuf>,
    pub timestamp: Option<DateTime<Utc>>,

    pub city_name: TextId,
    pub country_name: TextId,
    pub authors: Box<[TextId]>,
    pub comments: Box<[TextId]>,
    /// Names of the delay profiles, indexed like `TransportLine::delays`.
    pub delay_names: Box<[TextId]>,
    /// Number of leading text entries that belong to the city description.
    pub text_length_description: usize,
    pub location: Option<Coordinate>,

    pub maps: Box<[TransportMap]>,
    pub lines: Box<[TransportLine]>,
    pub stations: Box<[TransportStation]>,
    pub segments: Box<[TransportSegment]>,
    pub transfers: Box<[TransportTransfer]>,
    pub views: Box<[MapView]>,
    pub view_names: Box<[Arc<str>]>,
    pub station_infos: Box<[Option<StationInfo>]>,

    pub locales: Box<[Locale]>,
    pub locale_texts: Box<[Box<[String]>]>,
    current_locale: usize,

    // Lookups
    station_lookup: HashMap<String, u32>,
    line_lookup: HashMap<Arc<str>, u32>,
    segment_lookup: HashMap<(u32, u32), u32>,
    transfer_lookup: HashMap<(u32, u32), u32>,
}

/// Key of the `line\station` index used to cross reference stations by system name.
pub(crate) fn station_key(line: &str, station: &str) -> String {
    format!("{line}\\{station}")
}

impl Model {
    pub fn locale(&self) -> Option<Locale> {
        self.locales.get(self.current_locale).copied()
    }

    /// Switches the current text table. Returns false for a locale the model does not carry.
    pub fn set_locale(&mut self, code: &str) -> bool {
        let position = Locale::from_code(code)
            .and_then(|locale| self.locales.iter().position(|l| *l == locale));
        match position {
            Some(position) => {
                self.current_locale = position;
                true
            }
            None => false,
        }
    }

    pub fn texts(&self) -> &[String] {
        self.locale_texts
            .get(self.current_locale)
            .map(|texts| &texts[..])
            .unwrap_or_default()
    }

    pub fn text(&self, id: TextId) -> &str {
        self.texts()
            .get(id as usize)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn city(&self) -> &str {
        self.text(self.city_name)
    }

    pub fn country(&self) -> &str {
        self.text(self.country_name)
    }

    pub fn station_name(&self, station_id: u32) -> Option<&str> {
        self.stations
            .get(station_id as usize)
            .map(|station| self.text(station.name))
    }

    pub fn line_name(&self, line_id: u32) -> Option<&str> {
        self.lines
            .get(line_id as usize)
            .map(|line| self.text(line.name))
    }

    pub fn line_by_name(&self, line: &str) -> Option<&TransportLine> {
        let idx = self.line_lookup.get(line)?;
        self.lines.get(*idx as usize)
    }

    /// Finds a station by the system names of its line and itself.
    pub fn station_by_name(&self, line: &str, station: &str) -> Option<&TransportStation> {
        let idx = self.station_lookup.get(&station_key(line, station))?;
        self.stations.get(*idx as usize)
    }

    pub fn segment_between(&self, from: u32, to: u32) -> Option<&TransportSegment> {
        let idx = self.segment_lookup.get(&(from, to))?;
        self.segments.get(*idx as usize)
    }

    /// Finds a transfer stored in the `from -> to` direction.
    pub fn transfer_between(&self, from: u32, to: u32) -> Option<&TransportTransfer> {
        let idx = self.transfer_lookup.get(&(from, to))?;
        self.transfers.get(*idx as usize)
    }

    pub fn view_by_name(&self, name: &str) -> Option<&MapView> {
        let idx = self.view_names.iter().position(|view| view.as_ref() == name)?;
        self.views.get(idx)
    }

    pub fn station_info(&self, station_id: u32) -> Option<&StationInfo> {
        self.station_infos.get(station_id as usize)?.as_ref()
    }

    pub fn stations_by_map(&self, map_id: u32) -> impl Iterator<Item = &TransportStation> {
        self.stations
            .iter()
            .filter(move |station| station.map_id == map_id)
    }

    /// Case-insensitive substring search over station names in the current locale.
    pub fn search_stations_by_name<'a>(
        &'a self,
        needle: &'a str,
    ) -> impl Iterator<Item = &'a TransportStation> {
        let needle = needle.trim().to_lowercase();
        self.stations
            .iter()
            .filter(move |station| self.text(station.name).to_lowercase().contains(&needle))
    }

    /// Indexes the frozen arrays. Called once by the assembler.
    pub(crate) fn build_lookups(&mut self) {
        self.line_lookup = HashMap::with_capacity(self.lines.len());
        for line in self.lines.iter() {
            self.line_lookup
                .entry(line.system_name.clone())
                .or_insert(line.id);
        }
        self.station_lookup = HashMap::with_capacity(self.stations.len());
        for station in self.stations.iter() {
            if let Some(line) = self.lines.get(station.line_id as usize) {
                self.station_lookup
                    .entry(station_key(&line.system_name, &station.system_name))
                    .or_insert(station.id);
            }
        }
        self.segment_lookup = HashMap::with_capacity(self.segments.len());
        for segment in self.segments.iter() {
            self.segment_lookup
                .entry((segment.from_station_id, segment.to_station_id))
                .or_insert(segment.id);
        }
        self.transfer_lookup = HashMap::with_capacity(self.transfers.len());
        for transfer in self.transfers.iter() {
            self.transfer_lookup
                .entry((transfer.from_station_id, transfer.to_station_id))
                .or_insert(transfer.id);
        }
    }
}

#[test]
fn lookups_keep_first_duplicate_test() {
    let segment = |id| TransportSegment {
        id,
        from_station_id: 0,
        to_station_id: 1,
        ..Default::default()
    };
    let transfer = |id| TransportTransfer {
        id,
        from_station_id: 0,
        to_station_id: 1,
        ..Default::default()
    };
    let mut model = Model {
        segments: vec![segment(0), segment(1)].into(),
        transfers: vec![transfer(0), transfer(1)].into(),
        ..Default::default()
    };
    model.build_lookups();
    assert_eq!(model.segment_between(0, 1).map(|s| s.id), Some(0));
    assert_eq!(model.transfer_between(0, 1).map(|t| t.id), Some(0));
    assert!(model.segment_between(1, 0).is_none());
}
