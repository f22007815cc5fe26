//! The `[section]` + `key=value` text format shared by every PMZ text entry.

use std::{mem, str::Lines};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    pub section: &'a str,
    pub key: &'a str,
    pub value: &'a str,
    /// True for the first record after a section header.
    pub section_changed: bool,
}

impl Directive<'_> {
    pub fn key_is(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key)
    }

    pub fn section_is(&self, section: &str) -> bool {
        self.section.eq_ignore_ascii_case(section)
    }

    pub fn section_starts_with(&self, prefix: &str) -> bool {
        self.section
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    }
}

/// Streams the records of one text entry. Malformed lines are skipped.
pub struct DirectiveReader<'a> {
    lines: Lines<'a>,
    section: &'a str,
    section_changed: bool,
}

impl<'a> DirectiveReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.trim_start_matches('\u{feff}').lines(),
            section: "",
            // Records before any header open the unnamed section
            section_changed: true,
        }
    }
}

impl<'a> Iterator for DirectiveReader<'a> {
    type Item = Directive<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }
            if let Some(header) = line.strip_prefix('[') {
                if let Some(end) = header.find(']') {
                    self.section = header[..end].trim();
                    self.section_changed = true;
                }
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            return Some(Directive {
                section: self.section,
                key,
                value: value.trim(),
                section_changed: mem::take(&mut self.section_changed),
            });
        }
        None
    }
}

/// A parser that builds one record per section of a directive stream.
///
/// `open` decides whether a section starts a record, `field` sees every directive together
/// with the record in progress (if any) and `close` receives each finished record.
pub trait SectionConsumer {
    type Record;

    fn open(&mut self, directive: &Directive<'_>) -> Option<Self::Record>;

    fn field(&mut self, record: Option<&mut Self::Record>, directive: &Directive<'_>);

    fn close(&mut self, record: Self::Record);
}

enum SectionState<T> {
    Idle,
    Accumulating(T),
}

impl<T> SectionState<T> {
    fn take(&mut self) -> Option<T> {
        match mem::replace(self, SectionState::Idle) {
            SectionState::Accumulating(record) => Some(record),
            SectionState::Idle => None,
        }
    }

    fn record(&mut self) -> Option<&mut T> {
        match self {
            SectionState::Accumulating(record) => Some(record),
            SectionState::Idle => None,
        }
    }
}

/// Feeds a directive stream into a consumer, flushing the record in progress on every
/// section change and at the end of the stream.
pub fn drive<'a, I, C>(directives: I, consumer: &mut C)
where
    I: IntoIterator<Item = Directive<'a>>,
    C: SectionConsumer,
{
    let mut state = SectionState::Idle;
    for directive in directives {
        if directive.section_changed {
            if let Some(record) = state.take() {
                consumer.close(record);
            }
            if let Some(record) = consumer.open(&directive) {
                state = SectionState::Accumulating(record);
            }
        }
        consumer.field(state.record(), &directive);
    }
    if let Some(record) = state.take() {
        consumer.close(record);
    }
}

#[test]
fn reader_sections_test() {
    let text = "\u{feff}[Options]\nType=Metro\n; comment\n\n[Line 1]\nName=Red\nStations=A,B\n";
    let directives: Vec<_> = DirectiveReader::new(text).collect();
    assert_eq!(directives.len(), 3);
    assert_eq!(directives[0].section, "Options");
    assert!(directives[0].section_changed);
    assert_eq!(directives[1].section, "Line 1");
    assert!(directives[1].section_changed);
    assert_eq!(directives[1].value, "Red");
    assert!(!directives[2].section_changed);
}

#[test]
fn reader_skips_malformed_test() {
    let text = "[Broken\nno separator here\n=empty key\n[Good]\nkey = value with = sign\n";
    let directives: Vec<_> = DirectiveReader::new(text).collect();
    assert_eq!(directives.len(), 1);
    assert_eq!(directives[0].section, "Good");
    assert_eq!(directives[0].key, "key");
    assert_eq!(directives[0].value, "value with = sign");
}

#[test]
fn reader_empty_section_test() {
    let text = "[First]\n[Second]\nA=1\n";
    let directives: Vec<_> = DirectiveReader::new(text).collect();
    assert_eq!(directives.len(), 1);
    assert_eq!(directives[0].section, "Second");
    assert!(directives[0].section_changed);
}

#[test]
fn key_is_case_insensitive_test() {
    let directive = DirectiveReader::new("[line 2]\nSTATIONS=A").next();
    let directive = directive.expect("one directive");
    assert!(directive.key_is("Stations"));
    assert!(directive.section_starts_with("Line"));
    assert!(!directive.section_is("Line"));
}

#[test]
fn drive_flushes_every_section_test() {
    struct Collect(Vec<(String, Vec<String>)>);

    impl SectionConsumer for Collect {
        type Record = (String, Vec<String>);

        fn open(&mut self, directive: &Directive<'_>) -> Option<Self::Record> {
            directive
                .section_starts_with("Line")
                .then(|| (directive.section.to_string(), vec![]))
        }

        fn field(&mut self, record: Option<&mut Self::Record>, directive: &Directive<'_>) {
            if let Some((_, keys)) = record {
                keys.push(directive.key.to_string());
            }
        }

        fn close(&mut self, record: Self::Record) {
            self.0.push(record);
        }
    }

    let text = "[Line 1]\nName=A\n[Options]\nType=x\n[Line 2]\nName=B\nDriving=1\n";
    let mut consumer = Collect(vec![]);
    drive(DirectiveReader::new(text), &mut consumer);
    assert_eq!(consumer.0.len(), 2);
    assert_eq!(consumer.0[0], ("Line 1".to_string(), vec!["Name".to_string()]));
    assert_eq!(consumer.0[1].1, vec!["Name".to_string(), "Driving".to_string()]);
}
