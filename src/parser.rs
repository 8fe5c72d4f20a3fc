use crate::error::Result;
use crate::source;
use crate::srt::{Cue, IndexMode};
use crate::store::CueStore;

use encoding_rs::{Encoding, UTF_8};
use nom::bytes::complete::take_while_m_n;
use nom::character::complete::{char, one_of};
use nom::combinator::{all_consuming, map_res};
use nom::error::VerboseError;
use nom::IResult;
use regex::Regex;

// Sequence number line, then the timing line. The cue text is everything up
// to the next blank line or the end of the payload.
const BLOCK_HEADER: &str = r"([0-9]+)\n([0-9:,.]+)\s+-{2}>\s+([0-9:,.]+)\n";
const TIMESTAMP: &str = r"[0-9]{1,2}:[0-9]{1,2}:[0-9]{1,2}[,.][0-9]{1,3}";

pub struct Parser {
    mode: IndexMode,
    encoding: &'static Encoding,
    header: Regex,
    timestamp: Regex,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::with_index_mode(IndexMode::Natural)
    }

    pub fn with_index_mode(mode: IndexMode) -> Self {
        Self {
            mode,
            encoding: UTF_8,
            header: Regex::new(BLOCK_HEADER).expect("block header pattern is valid"),
            timestamp: Regex::new(TIMESTAMP).expect("timestamp pattern is valid"),
        }
    }

    /// Sets the encoding used by [`Parser::parse_bytes`]. Defaults to UTF-8.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn index_mode(&self) -> IndexMode {
        self.mode
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Decodes a raw payload and parses it. Decoding is the only way this can fail.
    pub fn parse_bytes(&self, payload: &[u8]) -> Result<CueStore> {
        let text = source::decode(payload, self.encoding)?;
        Ok(self.parse(&text))
    }

    /// Parses a SubRip payload. Blocks that do not have exactly two
    /// timestamps, or have no text, are skipped.
    pub fn parse(&self, payload: &str) -> CueStore {
        let payload = normalise_line_endings(payload);

        let mut entries = Vec::new();
        let mut next_index = 1;
        for block in self.blocks(&payload) {
            let cue = match self.cue(block) {
                Some(cue) => cue,
                None => continue,
            };
            let key = match self.mode {
                // A number too large to be a key cannot be addressed naturally.
                IndexMode::Natural => match cue.sequence_number {
                    Some(number) => number,
                    None => continue,
                },
                IndexMode::Synthetic => {
                    let key = next_index;
                    next_index += 1;
                    key
                }
            };
            entries.push((key, cue));
        }

        CueStore::build(self.mode, entries)
    }

    fn blocks<'a>(&'a self, payload: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let mut pos = 0;
        std::iter::from_fn(move || {
            let header = self.header.find_at(payload, pos)?;
            let end = payload[header.end()..]
                .find("\n\n")
                .map_or(payload.len(), |i| header.end() + i);
            pos = end;
            Some(&payload[header.start()..end])
        })
    }

    fn cue(&self, block: &str) -> Option<Cue> {
        let digits_end = block
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(block.len());
        let sequence_number = block[..digits_end].parse::<usize>().ok();

        let stamps: Vec<_> = self.timestamp.find_iter(block).collect();
        if stamps.len() != 2 {
            return None;
        }
        let start = timestamp_secs(stamps[0].as_str())?;
        let end = timestamp_secs(stamps[1].as_str())?;

        // Drop the header up to and including the character after the end time.
        let rest = &block[stamps[1].end()..];
        let rest = match rest.chars().next() {
            Some(c) => &rest[c.len_utf8()..],
            None => rest,
        };
        let text = rest.trim();
        if text.is_empty() {
            return None;
        }

        Some(Cue {
            sequence_number,
            start,
            end,
            text: text.to_string(),
        })
    }
}

/// The three replacements are applied once each, in order. Longer runs of
/// blank lines are not collapsed further.
pub fn normalise_line_endings(payload: &str) -> String {
    payload
        .replace("\n\r\n", "\n\n")
        .replace("\n\n\n", "\n\n")
        .replace("\r\n", "\n")
}

/// Converts `H:MM:SS,mmm` (or with `.`) to seconds. The fraction is always
/// read as thousandths, so `,5` is 5ms.
pub fn timestamp_secs(input: &str) -> Option<f64> {
    all_consuming(timestamp)(input).ok().map(|(_, secs)| secs)
}

fn take_number<'a>(
    min: usize,
    max: usize,
) -> impl FnMut(&'a str) -> IResult<&'a str, u32, VerboseError<&'a str>> {
    map_res(
        take_while_m_n(min, max, |c: char| c.is_ascii_digit()),
        |s: &str| s.parse::<u32>(),
    )
}

fn timestamp(input: &str) -> IResult<&str, f64, VerboseError<&str>> {
    let (input, hours) = take_number(1, 2)(input)?;
    let (input, _) = char(':')(input)?;
    let (input, minutes) = take_number(1, 2)(input)?;
    let (input, _) = char(':')(input)?;
    let (input, seconds) = take_number(1, 2)(input)?;
    let (input, _) = one_of(",.")(input)?;
    let (input, millis) = take_number(1, 3)(input)?;

    Ok((
        input,
        f64::from(hours) * 3600.0
            + f64::from(minutes) * 60.0
            + f64::from(seconds)
            + f64::from(millis) / 1000.0,
    ))
}
