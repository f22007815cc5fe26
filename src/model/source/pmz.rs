use std::{
    collections::HashMap,
    fs,
    io::{Read, Seek},
    mem,
    path::Path,
    sync::Arc,
    time::Instant,
};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::{
    model::{
        Locale, MapView, Model, References, StationInfo, TextId, TransportLine, TransportMap,
        TransportSegment, TransportStation, TransportTransfer, TransportType, station_key,
        transliterate,
    },
    pmz::{
        self, Config, PmzArchive,
        directive::{Directive, DirectiveReader, SectionConsumer, drive},
        driving::DrivingGraph,
        values::{parse_delay, parse_delay_array, parse_string_array},
    },
    shared::Color,
};

impl Model {
    /// Imports an archive from disk. The file name becomes the model's system name.
    pub fn from_pmz_path<P: AsRef<Path>>(
        path: P,
        config: Config,
        references: References<'_>,
    ) -> Result<Self, pmz::Error> {
        let path = path.as_ref();
        let archive = PmzArchive::open(path, config)?;
        let system_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut model = Assembler::new(&system_name, references).load(archive)?;
        model.file_path = Some(fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()));
        model.timestamp = fs::metadata(path)?
            .modified()
            .ok()
            .map(DateTime::<Utc>::from);
        Ok(model)
    }

    /// Imports an archive from any seekable source.
    pub fn from_pmz_reader<R: Read + Seek>(
        reader: R,
        system_name: &str,
        config: Config,
        references: References<'_>,
    ) -> Result<Self, pmz::Error> {
        let archive = PmzArchive::new(reader, config)?;
        Assembler::new(system_name, references).load(archive)
    }
}

/// Accumulation buffers of one import. Frozen into a `Model` once every entry is read.
pub(super) struct Assembler<'r> {
    pub(super) references: References<'r>,
    pub(super) model: Model,
    pub(super) texts: Vec<String>,
    pub(super) maps: Vec<TransportMap>,
    pub(super) lines: Vec<TransportLine>,
    pub(super) stations: Vec<TransportStation>,
    pub(super) segments: Vec<TransportSegment>,
    pub(super) transfers: Vec<TransportTransfer>,
    pub(super) views: Vec<MapView>,
    pub(super) station_infos: Vec<Option<StationInfo>>,

    pub(super) map_index: HashMap<String, u32>,
    pub(super) line_index: HashMap<String, u32>,
    pub(super) station_index: HashMap<String, u32>,
    /// Colors of a line's first view, inherited by its later views.
    pub(super) line_view_defaults: HashMap<u32, (Color, Color)>,
    pending_transfers: Vec<String>,
}

impl<'r> Assembler<'r> {
    pub(super) fn new(system_name: &str, references: References<'r>) -> Self {
        Self {
            references,
            model: Model {
                system_name: system_name.into(),
                ..Default::default()
            },
            texts: Vec::new(),
            maps: Vec::new(),
            lines: Vec::new(),
            stations: Vec::new(),
            segments: Vec::new(),
            transfers: Vec::new(),
            views: Vec::new(),
            station_infos: Vec::new(),
            map_index: HashMap::new(),
            line_index: HashMap::new(),
            station_index: HashMap::new(),
            line_view_defaults: HashMap::new(),
            pending_transfers: Vec::new(),
        }
    }

    pub(super) fn load<R: Read + Seek>(
        mut self,
        mut archive: PmzArchive<R>,
    ) -> Result<Model, pmz::Error> {
        let entries = archive.entries().clone();
        let city = entries.city.as_deref().ok_or(pmz::Error::MissingCityFile)?;
        let config = archive.config().clone();

        let text = archive.read_text(city)?;
        self.load_city(&text);

        if !config.description_only {
            self.load_lines(&mut archive, &entries.lines)?;
            self.load_views(&mut archive, &entries.views, &config)?;
            if config.import_texts {
                self.load_station_infos(&mut archive, &entries.texts)?;
            }
        }
        Ok(self.freeze())
    }

    pub(super) fn push_text(&mut self, text: impl Into<String>) -> TextId {
        let id = self.texts.len() as TextId;
        self.texts.push(text.into());
        id
    }

    pub(super) fn push_texts<I, S>(&mut self, texts: I) -> Box<[TextId]>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts.into_iter().map(|text| self.push_text(text)).collect()
    }

    pub(super) fn station(&self, line: &str, station: &str) -> Option<&TransportStation> {
        let idx = self.station_index.get(&station_key(line, station))?;
        self.stations.get(*idx as usize)
    }

    fn load_city(&mut self, text: &str) {
        debug!("Loading city...");
        let now = Instant::now();
        let mut city = String::new();
        let mut country = String::new();
        let mut authors = Vec::new();
        let mut comments = Vec::new();
        let mut delay_names = Vec::new();
        for directive in DirectiveReader::new(text) {
            if directive.key_is("RusName") || directive.key_is("CityName") {
                city = directive.value.to_string();
            } else if directive.key_is("Country") {
                country = directive.value.to_string();
            } else if directive.key_is("MapAuthors") {
                authors.push(directive.value.to_string());
            } else if directive.key_is("Comment") {
                comments.push(directive.value.to_string());
            } else if directive.key_is("DelayNames") {
                delay_names = parse_string_array(directive.value);
            }
        }
        self.model.city_name = self.push_text(city);
        self.model.country_name = self.push_text(country);
        self.model.authors = self.push_texts(authors);
        self.model.comments = self.push_texts(comments);
        self.model.delay_names = self.push_texts(delay_names);
        self.model.text_length_description = self.texts.len();
        debug!("Loading city took {:?}", now.elapsed());
    }

    fn load_lines<R: Read + Seek>(
        &mut self,
        archive: &mut PmzArchive<R>,
        names: &[String],
    ) -> Result<(), pmz::Error> {
        debug!("Loading lines...");
        let now = Instant::now();
        for name in names {
            let text = archive.read_text(name)?;
            let map_id = self.maps.len() as u32;
            let mut reader = LineSectionReader {
                assembler: self,
                map_id,
                transport_type: TransportType::Default,
            };
            drive(DirectiveReader::new(&text), &mut reader);
            let transport_type = reader.transport_type;
            self.maps.push(TransportMap {
                id: map_id,
                system_name: name.as_str().into(),
                transport_type,
            });
            self.map_index.entry(name.clone()).or_insert(map_id);
        }
        self.resolve_transfers();
        debug!("Loading lines took {:?}", now.elapsed());
        Ok(())
    }

    /// Allocates the stations and segments of one finished line section.
    fn make_line(&mut self, map_id: u32, record: LineRecord) {
        let line_id = self.lines.len() as u32;
        let system_name = record
            .name
            .clone()
            .unwrap_or_else(|| record.section.clone());
        let aliases = alias_dictionary(record.aliases.as_deref().unwrap_or_default());
        let graph = DrivingGraph::build(
            record.stations.as_deref().unwrap_or_default(),
            record.driving.as_deref(),
        );

        let mut local_index: HashMap<&str, u32> = HashMap::with_capacity(graph.stations.len());
        let mut station_ids = Vec::with_capacity(graph.stations.len());
        for station_name in graph.stations.iter() {
            let id = self.stations.len() as u32;
            let display = aliases
                .get(station_name.as_str())
                .map(String::as_str)
                .unwrap_or(station_name);
            let name = self.push_text(display);
            self.stations.push(TransportStation {
                id,
                line_id,
                map_id,
                system_name: station_name.as_str().into(),
                name,
                location: None,
            });
            self.station_index
                .entry(station_key(&system_name, station_name))
                .or_insert(id);
            local_index.insert(station_name, id);
            station_ids.push(id);
        }

        for info in graph.segments() {
            let (Some(from), Some(to)) = (local_index.get(info.from), local_index.get(info.to))
            else {
                warn!("Dropping segment {} -> {} of {system_name}", info.from, info.to);
                continue;
            };
            self.segments.push(TransportSegment {
                id: self.segments.len() as u32,
                map_id,
                line_id,
                from_station_id: *from,
                to_station_id: *to,
                delay: info.delay,
                flags: 0,
            });
        }

        let display_name = record.alias.unwrap_or_else(|| system_name.clone());
        let name = self.push_text(display_name);
        self.line_index.entry(system_name.clone()).or_insert(line_id);
        self.lines.push(TransportLine {
            id: line_id,
            map_id,
            system_name: system_name.into(),
            name,
            line_map: record.line_map.map(Into::into),
            stations: station_ids.into(),
            delays: parse_delay_array(record.delays.as_deref().unwrap_or_default()).into(),
        });
    }

    /// Transfers are resolved once every line entry is read so they may reference any line.
    fn resolve_transfers(&mut self) {
        for value in mem::take(&mut self.pending_transfers) {
            let parts = parse_string_array(&value);
            if parts.len() < 4 {
                warn!("Dropping malformed transfer {value:?}");
                continue;
            }
            let from = self.station(&parts[0], &parts[1]).cloned();
            let to = self.station(&parts[2], &parts[3]).cloned();
            let (Some(from), Some(to)) = (from, to) else {
                warn!("Dropping transfer {value:?}: unknown station");
                continue;
            };
            let delay = parts.get(4).and_then(|delay| parse_delay(delay));
            let invisible = parts
                .get(5)
                .is_some_and(|flags| flags.to_lowercase().contains("invisible"));
            self.transfers.push(TransportTransfer {
                id: self.transfers.len() as u32,
                from_map_id: from.map_id,
                from_line_id: from.line_id,
                from_station_id: from.id,
                to_map_id: to.map_id,
                to_line_id: to.line_id,
                to_station_id: to.id,
                delay,
                flags: if invisible {
                    TransportTransfer::INVISIBLE
                } else {
                    0
                },
            });
        }
    }

    fn freeze(mut self) -> Model {
        debug!("Freezing model...");
        let now = Instant::now();
        self.resolve_locations();
        self.make_globalization();

        let mut model = self.model;
        model.maps = self.maps.into();
        model.lines = self.lines.into();
        model.stations = self.stations.into();
        model.segments = self.segments.into();
        model.transfers = self.transfers.into();
        model.view_names = self
            .views
            .iter()
            .map(|view| view.system_name.clone())
            .collect();
        model.views = self.views.into();
        model.station_infos = self.station_infos.into();
        model.build_lookups();
        debug!("Freezing model took {:?}", now.elapsed());
        model
    }

    fn resolve_locations(&mut self) {
        let Some(directory) = self.references.stations else {
            return;
        };
        for station in self.stations.iter_mut() {
            let Some(line) = self.lines.get(station.line_id as usize) else {
                continue;
            };
            if let Some(location) = directory.location(&line.system_name, &station.system_name) {
                station.location = Some(location);
            }
        }
    }

    /// Builds one text table per locale. The archive's own locale comes first.
    fn make_globalization(&mut self) {
        let original = mem::take(&mut self.texts);
        let locale = Locale::detect(original.iter().map(String::as_str));

        let text_at = |id: TextId| original.get(id as usize).map(String::as_str).unwrap_or("");
        let info = self.references.countries.and_then(|countries| {
            countries.lookup(text_at(self.model.country_name), text_at(self.model.city_name))
        });
        self.model.location = info.as_ref().and_then(|info| info.location);

        let localized = |transliterated: bool| -> Box<[String]> {
            let mut texts: Vec<String> = original
                .iter()
                .map(|text| {
                    if transliterated {
                        transliterate(text)
                    } else {
                        text.clone()
                    }
                })
                .collect();
            if let Some(info) = &info {
                let names = [
                    (self.model.country_name, &info.country_name_en),
                    (self.model.city_name, &info.city_name_en),
                ];
                for (id, name) in names {
                    if let Some(text) = texts.get_mut(id as usize) {
                        *text = name.clone();
                    }
                }
            }
            texts.into()
        };

        let (locales, texts) = match locale {
            Locale::Ru => (
                vec![Locale::Ru, Locale::En],
                vec![original.clone().into_boxed_slice(), localized(true)],
            ),
            Locale::En => (
                vec![Locale::En, Locale::Ru],
                vec![localized(false), original.clone().into_boxed_slice()],
            ),
        };
        self.model.locales = locales.into();
        self.model.locale_texts = texts.into();
    }
}

/// Builds the `name -> display name` dictionary from `old=new` tokens or alternating pairs.
fn alias_dictionary(value: &str) -> HashMap<String, String> {
    let parts = parse_string_array(value);
    if parts.iter().any(|part| part.contains('=')) {
        parts
            .iter()
            .filter_map(|part| part.split_once('='))
            .map(|(name, display)| (name.trim().to_string(), display.trim().to_string()))
            .collect()
    } else {
        parts
            .chunks_exact(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect()
    }
}

#[derive(Debug, Default)]
struct LineRecord {
    section: String,
    name: Option<String>,
    alias: Option<String>,
    aliases: Option<String>,
    line_map: Option<String>,
    stations: Option<String>,
    driving: Option<String>,
    delays: Option<String>,
}

struct LineSectionReader<'a, 'r> {
    assembler: &'a mut Assembler<'r>,
    map_id: u32,
    transport_type: TransportType,
}

impl SectionConsumer for LineSectionReader<'_, '_> {
    type Record = LineRecord;

    fn open(&mut self, directive: &Directive<'_>) -> Option<Self::Record> {
        directive.section_starts_with("Line").then(|| LineRecord {
            section: directive.section.to_string(),
            ..Default::default()
        })
    }

    fn field(&mut self, record: Option<&mut Self::Record>, directive: &Directive<'_>) {
        let Some(record) = record else {
            if directive.section_is("Transfers") {
                self.assembler
                    .pending_transfers
                    .push(directive.value.to_string());
            } else if directive.section_is("Options") && directive.key_is("Type") {
                self.transport_type = TransportType::from_native_name(directive.value);
            }
            return;
        };
        let value = Some(directive.value.to_string());
        if directive.key_is("Name") {
            record.name = value;
        } else if directive.key_is("Alias") {
            record.alias = value;
        } else if directive.key_is("Aliases") {
            record.aliases = value;
        } else if directive.key_is("LineMap") {
            record.line_map = value;
        } else if directive.key_is("Stations") {
            record.stations = value;
        } else if directive.key_is("Driving") {
            record.driving = value;
        } else if directive.key_is("Delays") {
            record.delays = value;
        }
    }

    fn close(&mut self, record: Self::Record) {
        self.assembler.make_line(self.map_id, record);
    }
}

#[test]
fn alias_dictionary_test() {
    let aliases = alias_dictionary("Old=New,Park = Central Park");
    assert_eq!(aliases.get("Old").map(String::as_str), Some("New"));
    assert_eq!(aliases.get("Park").map(String::as_str), Some("Central Park"));

    let aliases = alias_dictionary("A,Alpha,B,Beta,C");
    assert_eq!(aliases.len(), 2);
    assert_eq!(aliases.get("B").map(String::as_str), Some("Beta"));
    assert!(alias_dictionary("").is_empty());
}
