use subcue::serialiser;
use subcue::source::encoding_for_label;
use subcue::{CueChange, CueStore, Encoding, IndexMode, ManualClock, Overlay, Source};

use std::io;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use log::{debug, info};

fn main() {
    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

#[derive(ClapParser)]
#[command(about = "Query and replay SRT subtitles")]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to read from. If not supplied, the subtitles will be read from standard input.",
        default_value = "-",
        global = true
    )]
    input: String,
    #[arg(
        short,
        long,
        help = "Key cues by the order they appear in instead of their written sequence numbers.",
        global = true
    )]
    synthetic_index: bool,
    #[arg(
        short,
        long,
        value_name = "LABEL",
        default_value = "utf-8",
        value_parser = parse_encoding,
        help = "Text encoding of the input, e.g. utf-8, latin1, windows-1252 or utf-16le.",
        global = true
    )]
    encoding: &'static Encoding,
    #[arg(short, long, help = "Log debug output to stderr.", global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the subtitle shown at each of the given times.
    Lookup {
        #[arg(
            value_name = "TIME",
            required = true,
            value_parser = parse_time,
            help = "Seconds (e.g. 12.5) or an SRT timestamp (e.g. 00:00:12,500)."
        )]
        times: Vec<f64>,
        #[arg(long, help = "Fail if any time has no subtitle.")]
        strict: bool,
    },
    /// List every cue in timeline order.
    List,
    /// Write the parsed cues back out as clean SRT.
    Normalize {
        #[arg(
            short,
            long,
            value_name = "FILE",
            help = "The file to write to. If not supplied, the subtitles will be written to standard output.",
            default_value = "-"
        )]
        output: String,
    },
    /// Step through the subtitles with a simulated playback clock.
    Play {
        #[arg(long, default_value_t = 60, help = "Clock ticks per second.")]
        fps: u32,
        #[arg(long, default_value = "0", value_parser = parse_time)]
        from: f64,
        #[arg(long, value_parser = parse_time, help = "Defaults to the end of the last cue.")]
        to: Option<f64>,
    },
}

fn parse_time(arg: &str) -> std::result::Result<f64, String> {
    let time = arg
        .parse::<f64>()
        .ok()
        .or_else(|| subcue::parser::timestamp_secs(arg))
        .ok_or_else(|| format!("'{}' is neither seconds nor an SRT timestamp", arg))?;
    if !time.is_finite() {
        return Err(format!("'{}' is not a finite time", arg));
    }
    Ok(time)
}

fn parse_encoding(arg: &str) -> std::result::Result<&'static Encoding, String> {
    encoding_for_label(arg).ok_or_else(|| format!("unknown encoding '{}'", arg))
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mode = IndexMode::from_flag(cli.synthetic_index);
    let store = CueStore::load(Source::from_arg(&cli.input), mode, cli.encoding)
        .context(format!("Failed to load SRT file: '{}'", cli.input))?;
    info!(
        "parsed {} cues from '{}' ({:?} index, {})",
        store.len(),
        cli.input,
        mode,
        cli.encoding.name()
    );

    match cli.command {
        Command::Lookup { times, strict } => lookup(&store, &times, strict),
        Command::List => {
            list(&store);
            Ok(())
        }
        Command::Normalize { output } => {
            if output == "-" {
                serialiser::serialise(&store, io::stdout())
            } else {
                let dst = std::fs::File::create(&output)
                    .context(format!("Failed to create output file: '{}'", output))?;
                serialiser::serialise(&store, dst)
            }
        }
        Command::Play { fps, from, to } => play(store, fps, from, to),
    }
}

fn lookup(store: &CueStore, times: &[f64], strict: bool) -> Result<()> {
    for &time in times {
        match store.lookup(time) {
            Some(text) => println!("{}", text),
            None if strict => bail!("No subtitle at {}s", time),
            None => println!(),
        }
    }
    Ok(())
}

fn list(store: &CueStore) {
    for (key, cue) in store.timeline() {
        println!(
            "{}\t{} --> {}\t{}",
            key,
            serialiser::format_ts(cue.start),
            serialiser::format_ts(cue.end),
            cue.text.replace('\n', " | ")
        );
    }
}

fn play(store: CueStore, fps: u32, from: f64, to: Option<f64>) -> Result<()> {
    if fps == 0 {
        return Err(anyhow!("--fps must be at least 1"));
    }
    let to = to.unwrap_or_else(|| {
        store
            .timeline()
            .map(|(_, cue)| cue.end)
            .fold(from, f64::max)
    });
    let step = 1.0 / f64::from(fps);
    debug!("playing {}s to {}s at {} fps", from, to, fps);

    let clock = ManualClock::new(from);
    let mut overlay = Overlay::new(store, &clock);
    let mut frame: u64 = 0;
    loop {
        let now = from + frame as f64 * step;
        if now > to {
            break;
        }
        clock.set(now);
        match overlay.tick() {
            Some(CueChange::Shown(text)) => {
                println!("[{}] {}", serialiser::format_ts(now), text.replace('\n', " | "))
            }
            Some(CueChange::Hidden) => println!("[{}] --", serialiser::format_ts(now)),
            None => (),
        }
        frame += 1;
    }
    Ok(())
}
