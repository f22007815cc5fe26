use std::{
    collections::BTreeMap,
    io::{Read, Seek},
    time::Instant,
};

use tracing::{debug, warn};

use super::pmz::Assembler;
use crate::{
    model::StationInfo,
    pmz::{self, PmzArchive, directive::DirectiveReader},
};

/// Caption and text lines gathered for one station, in caption order.
#[derive(Debug, Default)]
struct InfoDraft {
    captions: Vec<String>,
    lines: Vec<Vec<String>>,
}

impl InfoDraft {
    fn push(&mut self, caption: &str, line: String) {
        let idx = match self.captions.iter().position(|c| c == caption) {
            Some(idx) => idx,
            None => {
                self.captions.push(caption.to_string());
                self.lines.push(Vec::new());
                self.captions.len() - 1
            }
        };
        self.lines[idx].push(line);
    }
}

impl Assembler<'_> {
    pub(super) fn load_station_infos<R: Read + Seek>(
        &mut self,
        archive: &mut PmzArchive<R>,
        names: &[String],
    ) -> Result<(), pmz::Error> {
        debug!("Loading station infos...");
        let now = Instant::now();
        let mut drafts: BTreeMap<u32, InfoDraft> = BTreeMap::new();
        for name in names {
            let text = archive.read_text(name)?;
            self.read_annotations(&text, &mut drafts);
        }

        let mut infos: Vec<Option<StationInfo>> = vec![None; self.stations.len()];
        for (station_id, draft) in drafts {
            let captions = self.push_texts(draft.captions);
            let lines = draft
                .lines
                .into_iter()
                .map(|lines| self.push_texts(lines))
                .collect();
            if let Some(info) = infos.get_mut(station_id as usize) {
                *info = Some(StationInfo { captions, lines });
            }
        }
        self.station_infos = infos;
        debug!("Loading station infos took {:?}", now.elapsed());
        Ok(())
    }

    /// Sections other than `Options` name a line; their keys name stations of that line.
    fn read_annotations(&self, text: &str, drafts: &mut BTreeMap<u32, InfoDraft>) {
        let mut enabled = false;
        let mut caption = String::new();
        let mut prefix = String::new();
        for directive in DirectiveReader::new(text) {
            if directive.section_starts_with("Options") {
                if directive.key_is("AddToInfo") {
                    enabled = directive.value == "1";
                } else if directive.key_is("Caption") {
                    caption = directive.value.to_string();
                } else if directive.key_is("StringToAdd") {
                    prefix = strip_quotes(directive.value).to_string();
                }
                continue;
            }
            if !enabled {
                continue;
            }
            let Some(station) = self.station(directive.section, directive.key) else {
                warn!(
                    "Dropping annotation for unknown station {}\\{}",
                    directive.section, directive.key
                );
                continue;
            };
            let draft = drafts.entry(station.id).or_default();
            for line in directive.value.replace("\\n", ";").split(';') {
                draft.push(&caption, format!("{prefix}{line}"));
            }
        }
    }
}

fn strip_quotes(value: &str) -> &str {
    let value = value.trim();
    match value
        .strip_prefix('\'')
        .and_then(|value| value.strip_suffix('\''))
    {
        Some(inner) => inner.trim(),
        None => value,
    }
}

#[test]
fn strip_quotes_test() {
    assert_eq!(strip_quotes("' Exit: '"), "Exit:");
    assert_eq!(strip_quotes("Exit: "), "Exit:");
    assert_eq!(strip_quotes("'"), "'");
}

#[test]
fn info_draft_test() {
    let mut draft = InfoDraft::default();
    draft.push("Exits", "North".into());
    draft.push("Hours", "24h".into());
    draft.push("Exits", "South".into());
    assert_eq!(draft.captions, vec!["Exits", "Hours"]);
    assert_eq!(draft.lines[0], vec!["North", "South"]);
}
