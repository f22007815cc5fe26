use encoding_rs::Encoding;

use crate::pmz::EntryKind;

/// Geometry defaults applied to every view before its own options are read.
#[derive(Debug, Clone)]
pub struct ViewDefaults {
    pub margin: i32,
    pub station_diameter: i32,
    pub line_width: i32,
    pub upper_case: bool,
    pub word_wrap: bool,
    pub vector: bool,
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            margin: 80,
            station_diameter: 11,
            line_width: 9,
            upper_case: true,
            word_wrap: true,
            vector: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub city_suffix: String,
    pub lines_suffix: String,
    pub view_suffix: String,
    pub text_suffix: String,
    pub image_suffixes: Vec<String>,
    /// Line entry processed before every other line entry.
    pub canonical_lines: String,
    /// View entry processed before every other view entry.
    pub canonical_view: String,
    pub encoding: &'static Encoding,
    /// Only read the city descriptor.
    pub description_only: bool,
    pub import_texts: bool,
    pub view: ViewDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            city_suffix: ".cty".into(),
            lines_suffix: ".trp".into(),
            view_suffix: ".map".into(),
            text_suffix: ".txt".into(),
            image_suffixes: vec![".vec".into(), ".gif".into(), ".png".into(), ".bmp".into()],
            canonical_lines: "metro.trp".into(),
            canonical_view: "metro.map".into(),
            encoding: encoding_rs::WINDOWS_1251,
            description_only: false,
            import_texts: true,
            view: ViewDefaults::default(),
        }
    }
}

impl Config {
    pub fn description_only(mut self) -> Self {
        self.description_only = true;
        self
    }

    pub fn classify(&self, name: &str) -> Option<EntryKind> {
        let name = name.to_lowercase();
        if name.ends_with(&self.city_suffix) {
            Some(EntryKind::City)
        } else if name.ends_with(&self.lines_suffix) {
            Some(EntryKind::Lines)
        } else if name.ends_with(&self.view_suffix) {
            Some(EntryKind::View)
        } else if name.ends_with(&self.text_suffix) {
            Some(EntryKind::Text)
        } else if self
            .image_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
        {
            Some(EntryKind::Image)
        } else {
            None
        }
    }
}

#[test]
fn classify_test() {
    let config = Config::default();
    assert_eq!(config.classify("moscow.cty"), Some(EntryKind::City));
    assert_eq!(config.classify("Metro.TRP"), Some(EntryKind::Lines));
    assert_eq!(config.classify("tram.map"), Some(EntryKind::View));
    assert_eq!(config.classify("info.txt"), Some(EntryKind::Text));
    assert_eq!(config.classify("metro.vec"), Some(EntryKind::Image));
    assert_eq!(config.classify("readme.md"), None);
}
