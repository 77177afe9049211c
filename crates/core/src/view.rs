//! Client view maps
//!
//! A view is an ordered list of `<depot> <client>` rules. Order is significant:
//! rules are kept in insertion order and that order is the tie-break between
//! overlapping rules. An exclusion rule carries a leading `-` on the depot side.

use crate::error::{ConfigError, PathError};
use crate::path::DepotPath;
use std::fmt;
use std::str::FromStr;

/// Whether a rule maps files into the client or removes them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Include,
    Exclude,
}

impl Polarity {
    fn marker(self) -> &'static str {
        match self {
            Polarity::Include => "",
            Polarity::Exclude => "-",
        }
    }
}

/// A single view rule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewMapEntry {
    pub depot: DepotPath,
    pub client: DepotPath,
    pub polarity: Polarity,
}

impl ViewMapEntry {
    pub fn include(depot: DepotPath, client: DepotPath) -> Self {
        Self {
            depot,
            client,
            polarity: Polarity::Include,
        }
    }

    pub fn exclude(depot: DepotPath, client: DepotPath) -> Self {
        Self {
            depot,
            client,
            polarity: Polarity::Exclude,
        }
    }

    /// Both sides are quoted when either contains a space
    pub fn needs_quoting(&self) -> bool {
        self.depot.needs_quoting() || self.client.needs_quoting()
    }
}

impl fmt::Display for ViewMapEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = self.polarity.marker();
        if self.needs_quoting() {
            write!(f, "\"{}{}\" \"{}\"", marker, self.depot, self.client)
        } else {
            write!(f, "{}{} {}", marker, self.depot, self.client)
        }
    }
}

/// Ordered client view, immutable once built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewMap {
    entries: Vec<ViewMapEntry>,
}

impl ViewMap {
    pub fn from_entries(entries: Vec<ViewMapEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ViewMapEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewMapEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Depot paths of the include rules, in view order
    pub fn depot_paths(&self) -> Vec<&DepotPath> {
        self.entries
            .iter()
            .filter(|e| e.polarity == Polarity::Include)
            .map(|e| &e.depot)
            .collect()
    }

    /// View text as written into a client spec's `View:` field
    pub fn client_spec_view(&self) -> String {
        self.to_string()
    }

    /// Client name taken from the first rule's client side
    pub fn client_root(&self) -> Option<&str> {
        self.entries
            .first()
            .and_then(|e| e.client.segments().first())
            .map(String::as_str)
    }
}

impl fmt::Display for ViewMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

impl FromStr for ViewMap {
    type Err = ConfigError;

    /// Parse view text, one rule per line
    ///
    /// Tokens are either bare or wrapped in double quotes; the exclusion
    /// marker may sit inside or outside the quotes.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut entries = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let malformed = || ConfigError::MalformedViewLine {
                line: line_no,
                text: line.to_string(),
            };

            let tokens = tokenize(line).ok_or_else(malformed)?;
            let [depot, client] = <[String; 2]>::try_from(tokens).map_err(|_| malformed())?;

            let (polarity, depot) = match depot.strip_prefix('-') {
                Some(rest) => (Polarity::Exclude, rest.to_string()),
                None => (Polarity::Include, depot),
            };

            let parse = |text: &str| {
                DepotPath::parse(text).map_err(|source: PathError| ConfigError::InvalidPath {
                    line: line_no,
                    source,
                })
            };

            entries.push(ViewMapEntry {
                depot: parse(&depot)?,
                client: parse(&client)?,
                polarity,
            });
        }

        Ok(Self { entries })
    }
}

/// Split a view line into tokens, honoring double quotes
///
/// Returns `None` on an unterminated quote.
fn tokenize(line: &str) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut token = String::new();
        if c == '"' {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some(ch) => token.push(ch),
                    None => return None,
                }
            }
        } else {
            // Bare token; a `-` may precede a quoted path
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                chars.next();
                if ch == '"' {
                    loop {
                        match chars.next() {
                            Some('"') => break,
                            Some(inner) => token.push(inner),
                            None => return None,
                        }
                    }
                } else {
                    token.push(ch);
                }
            }
        }
        tokens.push(token);
    }

    Some(tokens)
}
