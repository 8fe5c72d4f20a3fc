/// A single SubRip entry. Times are seconds from the start of the media.
///
/// `sequence_number` is `None` when the written number does not fit a `usize`.
///
/// `start <= end` is not enforced: a cue written with its times reversed is
/// kept as-is and simply never matches a lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub sequence_number: Option<usize>,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Cue {
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time <= self.end
    }
}

/// How cues are keyed inside a [`CueStore`](crate::store::CueStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexMode {
    /// Key by the sequence number written in the file. Duplicates overwrite.
    Natural,
    /// Key by a running counter (1, 2, 3, ...) in the order cues are accepted.
    Synthetic,
}

impl Default for IndexMode {
    fn default() -> Self {
        IndexMode::Natural
    }
}

impl IndexMode {
    pub fn from_flag(use_synthetic_index: bool) -> Self {
        if use_synthetic_index {
            IndexMode::Synthetic
        } else {
            IndexMode::Natural
        }
    }
}
