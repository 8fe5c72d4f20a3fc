use crate::store::CueStore;

use std::io::{BufWriter, Write};

use anyhow::{Context, Result};

/// Writes the store as SubRip, in key order, numbering cues by key.
pub fn serialise<W: Write>(store: &CueStore, output: W) -> Result<()> {
    let mut writer = BufWriter::new(output);
    write_cues(&mut writer, store).context("Failed to write subtitles.")?;
    writer.flush().context("Failed to write subtitles.")?;
    Ok(())
}

fn write_cues<W: Write>(buf: &mut W, store: &CueStore) -> Result<()> {
    for (key, cue) in store.iter() {
        writeln!(buf, "{}", key)?;
        write_ts(buf, cue.start)?;
        write!(buf, " --> ")?;
        write_ts(buf, cue.end)?;
        writeln!(buf)?;
        writeln!(buf, "{}", cue.text)?;
        writeln!(buf)?;
    }
    Ok(())
}

fn write_ts<W: Write>(buf: &mut W, seconds: f64) -> Result<()> {
    write!(buf, "{}", format_ts(seconds))?;
    Ok(())
}

/// Formats seconds as `HH:MM:SS,mmm`, rounded to the nearest millisecond.
pub fn format_ts(seconds: f64) -> String {
    let total_millis = (seconds * 1000.0).round().max(0.0) as u64;
    let total_secs = total_millis / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    let millis = total_millis % 1000;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}
