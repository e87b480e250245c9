//! Header-keyed row reader with optional delimiter detection.

use std::io::{self, BufRead, Chain, Cursor, Read};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::row::RawRow;
use crate::error::{GateError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Bytes buffered for delimiter detection before giving up on a full line.
const SNIFF_LIMIT: usize = 8 * 1024;

/// Physical line number of the first data row when nothing precedes it.
pub const FIRST_DATA_LINE: usize = 2;

/// Reader configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Delimiter to use (None = auto-detect from the leading lines, reading
    /// ahead until a full line or 8 KiB is buffered).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
    /// Treat empty cells as absent rather than as empty strings.
    ///
    /// Quoted empty fields (`""`) are indistinguishable from unquoted ones
    /// at this layer, so they are absent too while this is set.
    pub empty_is_absent: bool,
    /// Trim surrounding whitespace from headers and fields.
    pub trim: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: Some(b','),
            quote: b'"',
            empty_is_absent: true,
            trim: false,
        }
    }
}

impl ReaderConfig {
    /// Check that the configuration can drive a reader.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter == Some(self.quote) {
            return Err(GateError::Config(format!(
                "delimiter and quote are both {:?}",
                self.quote as char
            )));
        }
        if matches!(self.delimiter, Some(b'\n' | b'\r')) {
            return Err(GateError::Config(
                "delimiter cannot be a line terminator".to_string(),
            ));
        }
        Ok(())
    }
}

/// Iterator over the data rows of a delimited source.
///
/// The first record is the header row. Each following record becomes a
/// [`RawRow`] keyed by header and numbered by the physical line it starts
/// on, so blank lines are skipped but still counted and a quoted field
/// spanning several lines advances the numbering of the rows after it.
/// Rows shorter than the header leave the missing columns absent; extra
/// fields are ignored.
pub struct RowReader<R: Read> {
    reader: csv::Reader<LineTracker<Chain<Cursor<Vec<u8>>, R>>>,
    headers: Vec<String>,
    record: csv::StringRecord,
    empty_is_absent: bool,
    delimiter: u8,
}

impl<R: Read> RowReader<R> {
    /// Create a reader and consume the header row.
    pub fn new(source: R, config: &ReaderConfig) -> Result<Self> {
        config.validate()?;

        let mut source = source;
        let (delimiter, prefix) = match config.delimiter {
            Some(d) => (d, Vec::new()),
            None => {
                let prefix = read_prefix(&mut source)?;
                let sample = match complete_lines(&prefix) {
                    [] => &prefix[..],
                    lines => lines,
                };
                (detect_delimiter(sample)?, prefix)
            }
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .quote(config.quote)
            .has_headers(true)
            .flexible(true)
            .trim(if config.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(LineTracker::new(Cursor::new(prefix).chain(source)));

        let headers = reader
            .headers()?
            .iter()
            .map(normalize_header)
            .collect();
        let consumed = reader.position().byte();
        reader.get_mut().release(consumed);

        Ok(Self {
            reader,
            headers,
            record: csv::StringRecord::new(),
            empty_is_absent: config.empty_is_absent,
            delimiter,
        })
    }

    /// Column headers in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The delimiter in use, after any auto-detection.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn to_raw_row(&self, line: usize) -> RawRow {
        let mut values = IndexMap::with_capacity(self.headers.len());
        for (idx, header) in self.headers.iter().enumerate() {
            let value = match self.record.get(idx) {
                None => None,
                Some("") if self.empty_is_absent => None,
                Some(field) => Some(field.to_string()),
            };
            // First occurrence of a duplicated header wins.
            values.entry(header.clone()).or_insert(value);
        }
        RawRow { line, values }
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => {
                // The recorded position is taken before the parser skips
                // blank lines, so add the ones it skipped.
                let line = self.record.position().map_or(FIRST_DATA_LINE, |pos| {
                    pos.line() as usize + self.reader.get_ref().blank_lines_at(pos.byte())
                });
                let consumed = self.reader.position().byte();
                self.reader.get_mut().release(consumed);
                Some(Ok(self.to_raw_row(line)))
            }
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}

/// Source wrapper that keeps the bytes the parser has read but not yet
/// finished with, so blank lines it skipped can still be counted.
struct LineTracker<R> {
    inner: R,
    window: Vec<u8>,
    window_start: u64,
}

impl<R> LineTracker<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            window: Vec::new(),
            window_start: 0,
        }
    }

    /// Number of line feeds in the run of line terminators starting at `byte`.
    fn blank_lines_at(&self, byte: u64) -> usize {
        let offset = byte.saturating_sub(self.window_start) as usize;
        self.window
            .get(offset..)
            .unwrap_or_default()
            .iter()
            .take_while(|&&b| b == b'\n' || b == b'\r')
            .filter(|&&b| b == b'\n')
            .count()
    }

    /// Drop buffered bytes before stream offset `byte`.
    fn release(&mut self, byte: u64) {
        let n = (byte.saturating_sub(self.window_start) as usize).min(self.window.len());
        self.window.drain(..n);
        self.window_start += n as u64;
    }
}

impl<R: Read> Read for LineTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.window.extend_from_slice(&buf[..n]);
        Ok(n)
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').to_string()
}

/// Read from the source until it holds a complete non-blank line, the sniff
/// limit is reached, or the source ends.
fn read_prefix<R: Read>(source: &mut R) -> Result<Vec<u8>> {
    let mut prefix = Vec::new();
    let mut chunk = [0u8; 1024];

    while prefix.len() < SNIFF_LIMIT && complete_lines(&prefix).trim_ascii().is_empty() {
        let n = match source.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(csv::Error::from(e).into()),
        };
        prefix.extend_from_slice(&chunk[..n]);
    }

    Ok(prefix)
}

/// Drop a trailing partial line so it cannot skew delimiter counts.
fn complete_lines(prefix: &[u8]) -> &[u8] {
    match prefix.iter().rposition(|&b| b == b'\n') {
        Some(end) => &prefix[..end],
        None => &[],
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let lines: Vec<String> = bytes
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(GateError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Consistent counts across lines beat a higher but ragged count
        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
