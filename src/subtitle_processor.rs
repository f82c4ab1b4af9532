use std::borrow::Cow;
use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use log::{debug, warn};
use crate::errors::SubtitleError;

// @module: SRT container reading and writing

// @const: SRT time-range line, tolerant of '.' separators, long hours and trailing coordinates
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(\d+):(\d{2}):(\d{2})[,.](\d{3})").unwrap()
});

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

// @struct: Single subtitle cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedBlock {
    // @field: Cue index as written in the file
    pub index: usize,

    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Raw cue text, lines joined with '\n'
    pub text: String,
}

impl TimedBlock {
    /// Creates a new cue
    pub fn new(index: usize, start_ms: u64, end_ms: u64, text: impl Into<String>) -> Self {
        TimedBlock {
            index,
            start_ms,
            end_ms,
            text: text.into(),
        }
    }

    /// Parse a single SRT timestamp (HH:MM:SS,mmm) to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64, SubtitleError> {
        let invalid = || SubtitleError::InvalidTimestamp(timestamp.to_string());
        let parts: Vec<&str> = timestamp.trim().split(&[':', ',', '.'][..]).collect();

        if parts.len() != 4 {
            return Err(invalid());
        }

        let mut values = [0u64; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part.parse().map_err(|_| invalid())?;
        }

        Self::to_millis(values[0], values[1], values[2], values[3]).ok_or_else(invalid)
    }

    fn to_millis(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Option<u64> {
        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return None;
        }
        // Hours are unbounded in the time line; overflow makes the timestamp invalid
        hours
            .checked_mul(3_600_000)?
            .checked_add(minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_ms)
    }
}

impl fmt::Display for TimedBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        if !self.text.is_empty() {
            writeln!(f, "{}", self.text)?;
        }
        writeln!(f)
    }
}

/// Ordered cues of one SRT file, in file position order
#[derive(Debug, Clone, Default)]
pub struct SubtitleDocument {
    /// Cues in file order
    pub blocks: Vec<TimedBlock>,
}

impl SubtitleDocument {
    /// Create a document from already-built cues
    pub fn from_blocks(blocks: Vec<TimedBlock>) -> Self {
        SubtitleDocument { blocks }
    }

    /// Parse raw SRT bytes, tolerating non UTF-8 encodings
    pub fn parse(bytes: &[u8]) -> Result<Self, SubtitleError> {
        let content = decode_srt_bytes(bytes);
        let blocks = Self::parse_srt_string(&content)?;
        Ok(Self::from_blocks(blocks))
    }

    /// Number of cues
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the document has no cues
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Serialize the cues back to SRT text
    pub fn to_srt_string(&self) -> String {
        self.blocks.iter().map(|block| block.to_string()).collect()
    }

    /// Serialize the cues back to UTF-8 SRT bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_srt_string().into_bytes()
    }

    /// Parse SRT format string into cues, keeping file order and original indices
    pub fn parse_srt_string(content: &str) -> Result<Vec<TimedBlock>, SubtitleError> {
        let lines: Vec<&str> = content.lines().collect();
        let mut blocks = Vec::new();

        // State variables for parsing
        let mut current_index: Option<usize> = None;
        let mut current_times: Option<(u64, u64)> = None;
        let mut current_text: Vec<&str> = Vec::new();
        // Set after a malformed time line; everything up to the next blank line is dropped
        let mut skipping = false;

        let mut finish = |index: usize, times: (u64, u64), text: &mut Vec<&str>| {
            blocks.push(TimedBlock::new(index, times.0, times.1, text.join("\n")));
            text.clear();
        };

        for (line_no, line) in lines.iter().enumerate() {
            let trimmed = line.trim();

            if trimmed.is_empty() {
                match (current_index, current_times) {
                    (Some(index), Some(times)) => finish(index, times, &mut current_text),
                    (Some(index), None) => warn!("Cue {} has no time line, skipping", index),
                    _ => {}
                }
                current_index = None;
                current_times = None;
                skipping = false;
                continue;
            }

            if skipping {
                continue;
            }

            // A cue missing its blank separator: an index line directly followed by a time line
            if let (Some(index), Some(times)) = (current_index, current_times) {
                if !current_text.is_empty()
                    && trimmed.parse::<usize>().is_ok()
                    && lines.get(line_no + 1).is_some_and(|next| TIMESTAMP_REGEX.is_match(next.trim()))
                {
                    debug!("Cue {} is missing its blank separator line", index);
                    finish(index, times, &mut current_text);
                    current_index = None;
                    current_times = None;
                }
            }

            let Some(index) = current_index else {
                match trimmed.parse::<usize>() {
                    Ok(index) => current_index = Some(index),
                    Err(_) => warn!("Unexpected text at line {} before a cue index: {}", line_no + 1, trimmed),
                }
                continue;
            };

            if current_times.is_none() {
                match Self::parse_time_range(trimmed) {
                    Ok(times) => current_times = Some(times),
                    Err(e) => {
                        warn!("Skipping cue {} at line {}: {}", index, line_no + 1, e);
                        current_index = None;
                        skipping = true;
                    }
                }
                continue;
            }

            current_text.push(line.trim_end());
        }

        // Add the last cue if there is one
        if let (Some(index), Some(times)) = (current_index, current_times) {
            finish(index, times, &mut current_text);
        }

        if blocks.is_empty() {
            warn!("No valid subtitle cues found in content");
            return Err(SubtitleError::NoCues);
        }

        debug!("Parsed {} subtitle cues", blocks.len());
        Ok(blocks)
    }

    /// Parse an `HH:MM:SS,mmm --> HH:MM:SS,mmm` line to (start, end) milliseconds
    fn parse_time_range(line: &str) -> Result<(u64, u64), SubtitleError> {
        let invalid = || SubtitleError::InvalidTimestamp(line.to_string());
        let caps = TIMESTAMP_REGEX.captures(line).ok_or_else(invalid)?;

        let start = Self::parse_timestamp_to_ms(&caps, 1).ok_or_else(invalid)?;
        let end = Self::parse_timestamp_to_ms(&caps, 5).ok_or_else(invalid)?;
        Ok((start, end))
    }

    /// Parse timestamp captures starting at `start_idx` to milliseconds
    fn parse_timestamp_to_ms(caps: &regex::Captures, start_idx: usize) -> Option<u64> {
        let field = |offset: usize| -> Option<u64> {
            caps.get(start_idx + offset)?.as_str().parse().ok()
        };

        TimedBlock::to_millis(field(0)?, field(1)?, field(2)?, field(3)?)
    }
}

/// Decode SRT bytes: BOM-aware, UTF-8 first, permissive fallback
pub fn decode_srt_bytes(bytes: &[u8]) -> Cow<'_, str> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return decode_utf8(rest);
    }

    if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        debug!("Decoding subtitle content as UTF-16LE");
        return Cow::Owned(decode_utf16(rest, u16::from_le_bytes));
    }

    if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        debug!("Decoding subtitle content as UTF-16BE");
        return Cow::Owned(decode_utf16(rest, u16::from_be_bytes));
    }

    decode_utf8(bytes)
}

fn decode_utf8(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(e) => {
            warn!("Subtitle content is not valid UTF-8 ({}), decoding permissively", e);
            String::from_utf8_lossy(bytes)
        }
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}
