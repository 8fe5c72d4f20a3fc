use crate::error::Result;
use crate::parser::Parser;
use crate::source::{self, Source};
use crate::srt::{Cue, IndexMode};

use std::collections::BTreeMap;
use std::path::Path;

use encoding_rs::Encoding;

/// Parsed cues, immutable once built.
///
/// Cues are addressable by key (the written sequence number, or a synthetic
/// running index) and are also kept in timeline order, sorted by start time
/// and then by key. Lookups return the first cue in timeline order whose
/// interval contains the query time.
#[derive(Debug, Clone)]
pub struct CueStore {
    mode: IndexMode,
    timeline: Vec<(usize, Cue)>,
    // Running maximum of `end` over `timeline`, used to binary search lookups.
    max_end: Vec<f64>,
    by_key: BTreeMap<usize, usize>,
}

impl CueStore {
    pub(crate) fn build(mode: IndexMode, entries: Vec<(usize, Cue)>) -> Self {
        let mut keyed = BTreeMap::new();
        for (key, cue) in entries {
            keyed.insert(key, cue);
        }

        let mut timeline: Vec<(usize, Cue)> = keyed.into_iter().collect();
        timeline.sort_by(|(ka, a), (kb, b)| a.start.total_cmp(&b.start).then(ka.cmp(kb)));

        let mut max_end = Vec::with_capacity(timeline.len());
        let mut running = f64::NEG_INFINITY;
        for (_, cue) in &timeline {
            running = running.max(cue.end);
            max_end.push(running);
        }

        let by_key = timeline
            .iter()
            .enumerate()
            .map(|(pos, (key, _))| (*key, pos))
            .collect();

        Self {
            mode,
            timeline,
            max_end,
            by_key,
        }
    }

    pub fn from_text(text: &str, mode: IndexMode) -> Self {
        Parser::with_index_mode(mode).parse(text)
    }

    pub fn from_bytes(
        payload: &[u8],
        mode: IndexMode,
        encoding: &'static Encoding,
    ) -> Result<Self> {
        Parser::with_index_mode(mode)
            .with_encoding(encoding)
            .parse_bytes(payload)
    }

    /// Reads and parses a subtitle file. Pass `encoding_rs::UTF_8` for
    /// ordinary `.srt` files.
    pub fn open<P: AsRef<Path>>(
        path: P,
        mode: IndexMode,
        encoding: &'static Encoding,
    ) -> Result<Self> {
        Self::load(Source::Path(path.as_ref().to_path_buf()), mode, encoding)
    }

    pub fn load(source: Source, mode: IndexMode, encoding: &'static Encoding) -> Result<Self> {
        let text = source::read_all_text(source, encoding)?;
        Ok(Self::from_text(&text, mode))
    }

    pub fn index_mode(&self) -> IndexMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    pub fn get(&self, key: usize) -> Option<&Cue> {
        self.by_key.get(&key).map(|&pos| &self.timeline[pos].1)
    }

    /// Cues in key order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Cue)> + '_ {
        self.by_key
            .iter()
            .map(move |(&key, &pos)| (key, &self.timeline[pos].1))
    }

    /// Cues ordered by start time, ties broken by key.
    pub fn timeline(&self) -> impl Iterator<Item = (usize, &Cue)> + '_ {
        self.timeline.iter().map(|(key, cue)| (*key, cue))
    }

    pub fn cue_at(&self, time: f64) -> Option<&Cue> {
        // Only cues starting at or before `time` can contain it.
        let started = self.timeline.partition_point(|(_, cue)| cue.start <= time);
        let first = self.max_end[..started].partition_point(|&end| end < time);
        self.timeline[..started].get(first).map(|(_, cue)| cue)
    }

    pub fn lookup(&self, time: f64) -> Option<&str> {
        self.cue_at(time).map(|cue| cue.text.trim())
    }
}

/// Looks up `time` in a store that may not have been loaded.
pub fn lookup(store: Option<&CueStore>, time: f64) -> Option<&str> {
    store.and_then(|store| store.lookup(time))
}
