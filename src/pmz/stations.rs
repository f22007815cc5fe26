//! Tokenizer for the `Stations` value of a line.
//!
//! Stations are comma separated. A parenthesized group lists branch stations attached to the
//! station right before it (`A,B(C,-D),E` and `A,B,(C,-D),E` are equivalent). Consecutive groups
//! (`A,B(C),(D)`) all hang off the same station. Double quotes protect `,`, `(` and `)` inside a name.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// The next token continues the current sequence.
    Comma,
    /// The next token opens a branch group, possibly right after another one closed.
    Open,
    /// The current branch group is closed.
    Close,
    End,
}

const fn is_delimiter(byte: u8) -> bool {
    matches!(byte, b',' | b'(' | b')')
}

pub struct StationListTokenizer<'a> {
    text: &'a str,
    pos: usize,
    next_delimiter: Delimiter,
}

impl<'a> StationListTokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            next_delimiter: Delimiter::End,
        }
    }

    pub fn has_next(&self) -> bool {
        self.text.as_bytes()[self.pos..]
            .iter()
            .any(|byte| !is_delimiter(*byte) && !byte.is_ascii_whitespace())
    }

    /// The delimiter that followed the last token returned by `next`.
    pub fn next_delimiter(&self) -> Delimiter {
        self.next_delimiter
    }

    fn skip_separators(&mut self) {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len()
            && (is_delimiter(bytes[self.pos]) || bytes[self.pos].is_ascii_whitespace())
        {
            self.pos += 1;
        }
    }

    fn delimiter_after_group(&self, from: usize) -> Delimiter {
        let rest = self.text[from..].trim_start();
        let rest = rest.strip_prefix(',').unwrap_or(rest).trim_start();
        if rest.starts_with('(') {
            Delimiter::Open
        } else {
            Delimiter::Close
        }
    }

    /// Moves past the `(` announced by `Delimiter::Open`. An empty group `()` is consumed whole
    /// and reported as false, with the delimiter updated to what follows it.
    pub fn enter_group(&mut self) -> bool {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos] != b'(' {
            self.pos += 1;
        }
        self.pos = (self.pos + 1).min(bytes.len());
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if bytes.get(self.pos) != Some(&b')') {
            return true;
        }
        self.pos += 1;
        self.next_delimiter = self.delimiter_after_group(self.pos);
        false
    }

    fn read_delimiter(&self) -> Delimiter {
        let bytes = self.text.as_bytes();
        match bytes.get(self.pos) {
            None => Delimiter::End,
            Some(b'(') => Delimiter::Open,
            Some(b')') => self.delimiter_after_group(self.pos + 1),
            Some(_) => {
                // A group written after a comma still belongs to the preceding station
                let opens_group = bytes[self.pos + 1..]
                    .iter()
                    .find(|byte| !byte.is_ascii_whitespace())
                    .is_some_and(|byte| *byte == b'(');
                if opens_group {
                    Delimiter::Open
                } else {
                    Delimiter::Comma
                }
            }
        }
    }
}

impl Iterator for StationListTokenizer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_separators();
        let bytes = self.text.as_bytes();
        if self.pos >= bytes.len() {
            self.next_delimiter = Delimiter::End;
            return None;
        }
        let start = self.pos;
        let mut quoted = false;
        while self.pos < bytes.len() && (quoted || !is_delimiter(bytes[self.pos])) {
            if bytes[self.pos] == b'"' {
                quoted = !quoted;
            }
            self.pos += 1;
        }
        let token = self.text[start..self.pos].trim().replace('"', "");
        self.next_delimiter = self.read_delimiter();
        Some(token)
    }
}

#[test]
fn plain_sequence_test() {
    let mut tokens = StationListTokenizer::new("A, B ,C");
    assert_eq!(tokens.next().as_deref(), Some("A"));
    assert_eq!(tokens.next_delimiter(), Delimiter::Comma);
    assert_eq!(tokens.next().as_deref(), Some("B"));
    assert_eq!(tokens.next().as_deref(), Some("C"));
    assert_eq!(tokens.next_delimiter(), Delimiter::End);
    assert!(!tokens.has_next());
    assert_eq!(tokens.next(), None);
}

#[test]
fn branch_group_test() {
    let mut tokens = StationListTokenizer::new("A,B,(C,-D),E");
    assert_eq!(tokens.next().as_deref(), Some("A"));
    assert_eq!(tokens.next().as_deref(), Some("B"));
    assert_eq!(tokens.next_delimiter(), Delimiter::Open);
    assert_eq!(tokens.next().as_deref(), Some("C"));
    assert_eq!(tokens.next_delimiter(), Delimiter::Comma);
    assert_eq!(tokens.next().as_deref(), Some("-D"));
    assert_eq!(tokens.next_delimiter(), Delimiter::Close);
    assert!(tokens.has_next());
    assert_eq!(tokens.next().as_deref(), Some("E"));
    assert_eq!(tokens.next_delimiter(), Delimiter::End);
}

#[test]
fn attached_group_test() {
    let mut tokens = StationListTokenizer::new("A,B(C)");
    tokens.next();
    assert_eq!(tokens.next().as_deref(), Some("B"));
    assert_eq!(tokens.next_delimiter(), Delimiter::Open);
    assert_eq!(tokens.next().as_deref(), Some("C"));
    assert_eq!(tokens.next_delimiter(), Delimiter::Close);
    assert!(!tokens.has_next());
}

#[test]
fn quoted_token_test() {
    let tokens: Vec<_> = StationListTokenizer::new("\"Park (North), East\",B").collect();
    assert_eq!(tokens, vec!["Park (North), East", "B"]);
}

#[test]
fn empty_group_test() {
    let mut tokens = StationListTokenizer::new("A,( ),B");
    assert_eq!(tokens.next().as_deref(), Some("A"));
    assert_eq!(tokens.next_delimiter(), Delimiter::Open);
    assert!(!tokens.enter_group());
    assert_eq!(tokens.next_delimiter(), Delimiter::Close);
    assert_eq!(tokens.next().as_deref(), Some("B"));
    assert_eq!(tokens.next_delimiter(), Delimiter::End);
}

#[test]
fn consecutive_groups_test() {
    let mut tokens = StationListTokenizer::new("A,B,(C),(D),E");
    tokens.next();
    assert_eq!(tokens.next().as_deref(), Some("B"));
    assert_eq!(tokens.next_delimiter(), Delimiter::Open);
    assert!(tokens.enter_group());
    assert_eq!(tokens.next().as_deref(), Some("C"));
    assert_eq!(tokens.next_delimiter(), Delimiter::Open);
    assert!(tokens.enter_group());
    assert_eq!(tokens.next().as_deref(), Some("D"));
    assert_eq!(tokens.next_delimiter(), Delimiter::Close);
    assert_eq!(tokens.next().as_deref(), Some("E"));
}
