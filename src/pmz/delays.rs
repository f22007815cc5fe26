//! Tokenizer for the `Driving` value of a line, read in step with the station list.
//!
//! A plain token is one delay. A bracketed token `(d1,d2,...)` either holds one delay per
//! station of a branch group or, at an ordinary position, a `forward,reverse` pair.

use crate::pmz::values::{parse_delay, parse_delay_array};

pub struct DelayListTokenizer<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> DelayListTokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// True when the next token is a bracket group.
    pub fn begin_bracket(&self) -> bool {
        self.text[self.pos..].trim_start().starts_with('(')
    }

    fn next_block(&mut self) -> Option<&'a str> {
        if self.pos >= self.text.len() {
            return None;
        }
        let rest = &self.text[self.pos..];
        let search_from = if self.begin_bracket() {
            rest.find(')').unwrap_or(rest.len())
        } else {
            0
        };
        let block = match rest[search_from..].find(',') {
            Some(comma) => {
                self.pos += search_from + comma + 1;
                &rest[..search_from + comma]
            }
            None => {
                self.pos = self.text.len();
                rest
            }
        };
        Some(block.trim())
    }

    /// Reads one plain delay; `None` when unknown or exhausted.
    pub fn next(&mut self) -> Option<u32> {
        self.next_block().and_then(parse_delay)
    }

    /// Reads a bracket group. A plain token at this position reads as a one element group.
    pub fn next_bracket(&mut self) -> Vec<Option<u32>> {
        let Some(block) = self.next_block() else {
            return vec![];
        };
        let inner = block.trim_start_matches('(').trim_end_matches(')');
        parse_delay_array(inner)
    }
}

#[test]
fn plain_tokens_test() {
    let mut delays = DelayListTokenizer::new("2, ,4");
    assert!(!delays.begin_bracket());
    assert_eq!(delays.next(), Some(2));
    assert_eq!(delays.next(), None);
    assert_eq!(delays.next(), Some(4));
    assert_eq!(delays.next(), None);
}

#[test]
fn bracket_tokens_test() {
    let mut delays = DelayListTokenizer::new("2,(3,4),5,(6,)");
    assert_eq!(delays.next(), Some(2));
    assert!(delays.begin_bracket());
    assert_eq!(delays.next_bracket(), vec![Some(3), Some(4)]);
    assert_eq!(delays.next(), Some(5));
    assert!(delays.begin_bracket());
    assert_eq!(delays.next_bracket(), vec![Some(6), None]);
    assert!(delays.next_bracket().is_empty());
}

#[test]
fn empty_text_test() {
    let mut delays = DelayListTokenizer::new("");
    assert!(!delays.begin_bracket());
    assert_eq!(delays.next(), None);
    assert!(delays.next_bracket().is_empty());
}
