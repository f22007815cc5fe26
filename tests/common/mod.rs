#![allow(dead_code)]

use std::io::{Cursor, Write};

use encoding_rs::WINDOWS_1251;
use transitmap::{
    model::{Model, References},
    pmz::{self, Config},
};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

pub const CITY: &str = "\
[Options]
RusName=Москва
Country=Россия
MapAuthors=Иван
MapAuthors=Пётр
Comment=Тестовая схема
DelayNames=День,Ночь
";

pub const METRO: &str = "\
[Options]
Type=Метро

[Line 1]
Name=Красная
Stations=Алфа,Бета,Гамма
Driving=2,3
Delays=1,4

[Line 2]
Name=Синяя
Alias=Синяя линия
Stations=Дельта,Эпсилон
Driving=(5,6)
Aliases=Дельта=Дельта-Центр

[Transfers]
1=Красная,Бета,Синяя,Дельта,3
2=Красная,Гамма,Трамвай 1,Жета,4,invisible
3=Красная,Омега,Синяя,Дельта,2
";

pub const TRAM: &str = "\
[Options]
Type=Трамвай

[Line 1]
Name=Трамвай 1
Stations=Жета,Эта
Driving=7
";

/// Builds a PMZ archive in memory. Text entries are stored windows-1251 encoded.
#[derive(Default)]
pub struct ArchiveBuilder {
    entries: Vec<(String, Vec<u8>)>,
    directories: Vec<String>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The city, a tram network and the metro network, listed tram first.
    pub fn moscow() -> Self {
        Self::new()
            .text("moscow.cty", CITY)
            .text("tram.trp", TRAM)
            .text("metro.trp", METRO)
    }

    pub fn text(mut self, name: &str, content: &str) -> Self {
        let (bytes, _, _) = WINDOWS_1251.encode(content);
        self.entries.push((name.to_string(), bytes.into_owned()));
        self
    }

    pub fn bytes(mut self, name: &str, content: &[u8]) -> Self {
        self.entries.push((name.to_string(), content.to_vec()));
        self
    }

    pub fn directory(mut self, name: &str) -> Self {
        self.directories.push(name.to_string());
        self
    }

    pub fn build(self) -> Cursor<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for name in self.directories {
            writer.add_directory(name, options).unwrap();
        }
        for (name, bytes) in self.entries {
            writer.start_file(name, options).unwrap();
            writer.write_all(&bytes).unwrap();
        }
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    pub fn try_import(self, config: Config, references: References<'_>) -> Result<Model, pmz::Error> {
        Model::from_pmz_reader(self.build(), "test.pmz", config, references)
    }

    pub fn import(self) -> Model {
        self.try_import(Config::default(), References::none())
            .expect("archive should import")
    }
}

pub fn station_id(model: &Model, line: &str, station: &str) -> u32 {
    model
        .station_by_name(line, station)
        .unwrap_or_else(|| panic!("missing station {line}\\{station}"))
        .id
}
