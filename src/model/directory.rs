//! Read-only reference data consulted while assembling a model.

use std::{collections::HashMap, io::Read};

use csv::Reader;
use serde::{Deserialize, Serialize};

use crate::{pmz, shared::geo::Coordinate};

/// Resolves station coordinates from an external gazetteer.
pub trait StationDirectory {
    fn location(&self, line: &str, station: &str) -> Option<Coordinate>;
}

/// Resolves English country and city names for a city descriptor.
pub trait CountryDirectory {
    fn lookup(&self, country: &str, city: &str) -> Option<CountryRecord>;
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CountryRecord {
    pub country_name_en: String,
    pub city_name_en: String,
    pub location: Option<Coordinate>,
}

/// Reference data injected into an import. Every directory is optional.
#[derive(Clone, Copy, Default)]
pub struct References<'a> {
    pub stations: Option<&'a dyn StationDirectory>,
    pub countries: Option<&'a dyn CountryDirectory>,
}

impl<'a> References<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_stations(mut self, stations: &'a dyn StationDirectory) -> Self {
        self.stations = Some(stations);
        self
    }

    pub fn with_countries(mut self, countries: &'a dyn CountryDirectory) -> Self {
        self.countries = Some(countries);
        self
    }
}

fn key(first: &str, second: &str) -> (String, String) {
    (first.trim().to_lowercase(), second.trim().to_lowercase())
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StationRecord {
    pub line_name: String,
    pub station_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Station coordinates keyed by `(line, station)`, compared case-insensitively.
#[derive(Debug, Default, Clone)]
pub struct StationDictionary {
    locations: HashMap<(String, String), Coordinate>,
}

impl StationDictionary {
    /// Loads a `line_name,station_name,latitude,longitude` table.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, pmz::Error> {
        let mut dictionary = Self::default();
        let mut rdr = Reader::from_reader(reader);
        for result in rdr.deserialize() {
            let record: StationRecord = result?;
            dictionary.insert(record);
        }
        Ok(dictionary)
    }

    pub fn insert(&mut self, record: StationRecord) {
        let coordinate = Coordinate::new(record.latitude, record.longitude);
        if coordinate.is_valid() {
            self.locations
                .insert(key(&record.line_name, &record.station_name), coordinate);
        }
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl StationDirectory for StationDictionary {
    fn location(&self, line: &str, station: &str) -> Option<Coordinate> {
        self.locations.get(&key(line, station)).copied()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CountryCityRecord {
    pub country: String,
    pub city: String,
    pub country_name_en: String,
    pub city_name_en: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// English names and city coordinates keyed by the native `(country, city)` pair.
#[derive(Debug, Default, Clone)]
pub struct CountryDictionary {
    records: HashMap<(String, String), CountryRecord>,
}

impl CountryDictionary {
    /// Loads a `country,city,country_name_en,city_name_en,latitude,longitude` table.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, pmz::Error> {
        let mut dictionary = Self::default();
        let mut rdr = Reader::from_reader(reader);
        for result in rdr.deserialize() {
            let record: CountryCityRecord = result?;
            dictionary.insert(record);
        }
        Ok(dictionary)
    }

    pub fn insert(&mut self, record: CountryCityRecord) {
        let location = match (record.latitude, record.longitude) {
            (Some(latitude), Some(longitude)) => {
                Some(Coordinate::new(latitude, longitude)).filter(Coordinate::is_valid)
            }
            _ => None,
        };
        self.records.insert(
            key(&record.country, &record.city),
            CountryRecord {
                country_name_en: record.country_name_en,
                city_name_en: record.city_name_en,
                location,
            },
        );
    }
}

impl CountryDirectory for CountryDictionary {
    fn lookup(&self, country: &str, city: &str) -> Option<CountryRecord> {
        self.records.get(&key(country, city)).cloned()
    }
}

#[test]
fn station_dictionary_test() {
    let csv = "line_name,station_name,latitude,longitude\n\
               Red,Central,59.33,18.06\n\
               Red,Broken,999,0\n";
    let dictionary = StationDictionary::from_csv(csv.as_bytes()).unwrap();
    assert_eq!(dictionary.len(), 1);
    assert_eq!(
        dictionary.location("red", " CENTRAL "),
        Some(Coordinate::new(59.33, 18.06))
    );
    assert_eq!(dictionary.location("Red", "Broken"), None);
}

#[test]
fn country_dictionary_test() {
    let csv = "country,city,country_name_en,city_name_en,latitude,longitude\n\
               Россия,Москва,Russia,Moscow,55.75,37.62\n\
               Россия,Тверь,Russia,Tver,,\n";
    let dictionary = CountryDictionary::from_csv(csv.as_bytes()).unwrap();
    let moscow = dictionary.lookup("Россия", "Москва").unwrap();
    assert_eq!(moscow.city_name_en, "Moscow");
    assert_eq!(moscow.location, Some(Coordinate::new(55.75, 37.62)));
    let tver = dictionary.lookup("россия", "тверь").unwrap();
    assert_eq!(tver.location, None);
    assert!(dictionary.lookup("Russia", "Moscow").is_none());
}
