//! Playset text loader: a single forward pass turning marker-prefixed lines
//! into a `Playset` tree.
//!
//! Format:
//! - first content line → playset name, verbatim
//! - `# Title` → section
//! - `## 1 Title` → category under the current section (ordinal optional)
//! - `1 Text` → item under the current category (ordinal optional)
//!
//! Blank lines are ignored and do not count as positions.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::schema::playset::Playset;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("line {line}: {message}")]
    Structural { line: usize, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const SECTION_MARKER: &str = "#";
const CATEGORY_MARKER: &str = "##";

/// Content position the first section marker must occupy.
const FIRST_SECTION_POSITION: usize = 2;
/// Content position the first category marker must occupy.
const FIRST_CATEGORY_POSITION: usize = 3;

/// Classification of a trimmed, non-blank line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Text after the `##` marker.
    Category(&'a str),
    /// Text after the `#` marker.
    Section(&'a str),
    /// The whole line.
    Item(&'a str),
}

/// Classify a line. Category markers are tested before section markers.
pub fn classify(line: &str) -> LineKind<'_> {
    if let Some(rest) = line.strip_prefix(CATEGORY_MARKER) {
        LineKind::Category(rest.trim())
    } else if let Some(rest) = line.strip_prefix(SECTION_MARKER) {
        LineKind::Section(rest.trim())
    } else {
        LineKind::Item(line.trim())
    }
}

/// Drop a leading numeric ordinal (`"5 this is a test"` → `"this is a test"`).
pub fn strip_ordinal(text: &str) -> &str {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((head, rest)) if head.chars().all(|c| c.is_ascii_digit()) => rest.trim(),
        _ => text,
    }
}

fn structural(line: usize, message: &str) -> LoadError {
    LoadError::Structural {
        line,
        message: message.to_string(),
    }
}

/// Streaming parser. Holds only the tree under construction and the
/// positions of the current section and category.
#[derive(Debug, Default)]
pub struct PlaysetParser {
    playset: Option<Playset>,
    line_number: usize,
    position: usize,
    current_section: Option<usize>,
    current_category: Option<usize>,
    seen_section: bool,
    seen_category: bool,
}

impl PlaysetParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the next raw line.
    pub fn feed(&mut self, raw: &str) -> Result<(), LoadError> {
        self.line_number += 1;
        let line = self.line_number;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        self.position += 1;

        let Some(playset) = self.playset.as_mut() else {
            debug!(line, playset = trimmed, "playset named");
            self.playset = Some(Playset::new(trimmed));
            return Ok(());
        };

        match classify(trimmed) {
            LineKind::Category(title) => {
                if !self.seen_category && self.position != FIRST_CATEGORY_POSITION {
                    return Err(structural(
                        line,
                        "the first category must directly follow the first section",
                    ));
                }
                let section = match self.current_section {
                    Some(slot) => playset.section_at_mut(slot),
                    None => None,
                }
                .ok_or_else(|| structural(line, "category declared before any section"))?;
                let name = strip_ordinal(title).to_lowercase();
                section.new_category(&name);
                self.current_category = section.category_slot(&name);
                self.seen_category = true;
                debug!(line, section = %section.name, category = %name, "category declared");
            }
            LineKind::Section(title) => {
                if !self.seen_section && self.position != FIRST_SECTION_POSITION {
                    return Err(structural(
                        line,
                        "the first section must directly follow the playset name",
                    ));
                }
                let name = title.to_lowercase();
                playset.new_section(&name);
                self.current_section = playset.section_slot(&name);
                self.current_category = None;
                self.seen_section = true;
                debug!(line, section = %name, "section declared");
            }
            LineKind::Item(text) => {
                let category = match (self.current_section, self.current_category) {
                    (Some(section), Some(category)) => playset
                        .section_at_mut(section)
                        .and_then(|s| s.category_at_mut(category)),
                    _ => None,
                }
                .ok_or_else(|| structural(line, "item listed before any category"))?;
                category.add_item(strip_ordinal(text));
            }
        }
        Ok(())
    }

    /// Finish the pass and hand over the tree.
    pub fn finish(self) -> Result<Playset, LoadError> {
        let playset = self
            .playset
            .ok_or_else(|| structural(0, "empty playset: no name line"))?;
        info!(
            playset = %playset.name,
            sections = playset.len(),
            categories = playset.sections().map(|s| s.len()).sum::<usize>(),
            items = playset.sections().map(|s| s.item_count()).sum::<usize>(),
            "playset loaded"
        );
        Ok(playset)
    }
}

/// Parse a playset from a sequence of lines.
pub fn parse_lines<I, S>(lines: I) -> Result<Playset, LoadError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = PlaysetParser::new();
    for line in lines {
        parser.feed(line.as_ref())?;
    }
    parser.finish()
}

/// Parse a playset from a string.
pub fn parse_str(input: &str) -> Result<Playset, LoadError> {
    parse_lines(input.lines())
}

/// Parse a playset from a buffered reader, one line at a time.
pub fn load_from_reader<R: BufRead>(reader: R) -> Result<Playset, LoadError> {
    let mut parser = PlaysetParser::new();
    for line in reader.lines() {
        parser.feed(&line?)?;
    }
    parser.finish()
}

/// Load a playset from a file.
pub fn load_from_file(path: &Path) -> Result<Playset, LoadError> {
    let file = File::open(path)?;
    load_from_reader(BufReader::new(file))
}
