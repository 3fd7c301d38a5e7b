//! Outline parser: indented text to `(level, label)` records.

use tracing::{debug, instrument, trace};

use crate::domain::entities::OutlineRecord;
use crate::domain::error::{DomainError, DomainResult};

/// Spaces per nesting level unless configured otherwise.
pub const DEFAULT_INDENT_WIDTH: usize = 2;
pub const MAX_INDENT_WIDTH: usize = 8;

const BULLET: &str = "- ";

/// A single non-blank input line, alive only while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OutlineLine<'a> {
    raw: &'a str,
    indent: usize,
    level: usize,
    label: &'a str,
}

/// Splits outline text into records.
///
/// Never fails on content: blank lines are skipped and indentation that is
/// not a multiple of the unit width rounds down to the shallower level.
#[derive(Debug, Clone)]
pub struct OutlineParser {
    indent_width: usize,
}

impl Default for OutlineParser {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

impl OutlineParser {
    pub fn new(indent_width: usize) -> DomainResult<Self> {
        if !(1..=MAX_INDENT_WIDTH).contains(&indent_width) {
            return Err(DomainError::out_of_range(
                "indent_width",
                indent_width,
                1,
                MAX_INDENT_WIDTH,
            ));
        }
        Ok(Self { indent_width })
    }

    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    #[instrument(level = "debug", skip(self, text), fields(bytes = text.len()))]
    pub fn parse(&self, text: &str) -> Vec<OutlineRecord> {
        let records: Vec<OutlineRecord> = text
            .lines()
            .filter_map(|raw| self.parse_line(raw))
            .map(|line| {
                trace!(indent = line.indent, level = line.level, "line {:?}", line.raw);
                OutlineRecord::new(line.level, line.label)
            })
            .collect();
        debug!("parsed {} outline records", records.len());
        records
    }

    fn parse_line<'a>(&self, raw: &'a str) -> Option<OutlineLine<'a>> {
        if raw.trim().is_empty() {
            return None;
        }

        let indent = raw.chars().take_while(|c| c.is_whitespace()).count();
        let content = raw.trim_start();
        let label = content.strip_prefix(BULLET).unwrap_or(content).trim_end();

        Some(OutlineLine {
            raw,
            indent,
            level: indent / self.indent_width,
            label,
        })
    }
}

/// Parse with the default two-space unit.
pub fn parse_outline(text: &str) -> Vec<OutlineRecord> {
    OutlineParser::default().parse(text)
}
