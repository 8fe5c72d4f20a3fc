//! SubRip (`.srt`) parsing and point-in-time cue lookup.
//!
//! ```
//! use subcue::{CueStore, IndexMode};
//!
//! let store = CueStore::from_text(
//!     "1\n00:00:01,000 --> 00:00:03,000\nHello\n",
//!     IndexMode::Natural,
//! );
//! assert_eq!(store.lookup(2.0), Some("Hello"));
//! assert_eq!(store.lookup(4.0), None);
//! ```

pub mod error;
pub mod overlay;
pub mod parser;
pub mod serialiser;
pub mod source;
pub mod srt;
pub mod store;

pub use encoding_rs::{Encoding, UTF_8};

pub use crate::error::SubcueError;
pub use crate::overlay::{CueChange, ManualClock, Overlay, PlaybackClock};
pub use crate::parser::Parser;
pub use crate::source::Source;
pub use crate::srt::{Cue, IndexMode};
pub use crate::store::{lookup, CueStore};
