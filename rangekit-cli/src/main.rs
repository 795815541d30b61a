//! rangekit CLI — replay input against a layout, validate layouts, print the default.
//!
//! Commands:
//! - `replay` — apply a script of focus/key/pointer events and print every control as JSON
//! - `check` — validate a layout file and summarise its controls
//! - `layout` — print the built-in demo layout as TOML

mod script;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use rangekit_core::{
    AccessibilityState, Board, ControlRef, LayoutConfig, TracingObserver, ValueChange,
};

#[derive(Parser)]
#[command(name = "rangekit", about = "rangekit CLI — accessible range controls without a screen")]
struct Cli {
    /// Raise the log level to debug (RANGEKIT_LOG still wins when set).
    #[arg(long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an input script and print the final state of every control.
    Replay {
        /// Layout TOML file. Defaults to the built-in demo layout.
        #[arg(long)]
        layout: Option<PathBuf>,

        /// Script file, or `-` for stdin.
        #[arg(long)]
        script: PathBuf,

        /// Print each committed value as a JSON line while replaying.
        #[arg(long, default_value_t = false)]
        trace: bool,
    },
    /// Validate a layout file and print a summary.
    Check {
        #[arg(long)]
        layout: PathBuf,
    },
    /// Print the built-in demo layout as TOML.
    Layout,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    match cli.command {
        Commands::Replay { layout, script, trace } => run_replay(layout.as_deref(), &script, trace),
        Commands::Check { layout } => run_check(&layout),
        Commands::Layout => {
            print!("{}", LayoutConfig::demo().to_toml_string()?);
            Ok(())
        }
    }
}

fn init_tracing(debug: bool) -> Result<()> {
    let default = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("RANGEKIT_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}

fn load_layout(path: Option<&Path>) -> Result<LayoutConfig> {
    match path {
        Some(path) => LayoutConfig::load(path)
            .with_context(|| format!("loading layout {}", path.display())),
        None => Ok(LayoutConfig::demo()),
    }
}

fn read_script(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading script {}", path.display()))
    }
}

/// One `--trace` output line.
#[derive(Serialize)]
struct CommitLine<'a> {
    path: &'a str,
    previous: i64,
    value: i64,
    offset: i64,
    value_text: &'a str,
}

fn run_replay(layout: Option<&Path>, script_path: &Path, trace: bool) -> Result<()> {
    let config = load_layout(layout)?;
    let mut board = Board::from_config(&config)?;
    let steps = script::parse(&read_script(script_path)?)?;

    for target in board.focus_order() {
        board.add_observer(target, Box::new(TracingObserver));
        if trace {
            board.add_observer(target, Box::new(print_commit));
        }
    }

    script::run(&mut board, &steps)?;

    let snapshot = board.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn print_commit(path: &str, change: &ValueChange, state: &AccessibilityState) {
    let line = CommitLine {
        path,
        previous: change.previous,
        value: change.value,
        offset: change.offset,
        value_text: &state.value_text,
    };
    if let Err(err) = write_commit(&mut io::stdout().lock(), &line) {
        tracing::warn!(path, %err, "trace output failed");
    }
}

fn write_commit(out: &mut impl Write, line: &CommitLine<'_>) -> Result<()> {
    serde_json::to_writer(&mut *out, line)?;
    writeln!(out)?;
    Ok(())
}

fn run_check(path: &Path) -> Result<()> {
    let config = load_layout(Some(path))?;
    let board = Board::from_config(&config)?;

    println!("Layout OK: {}", path.display());
    for target in board.focus_order() {
        if let Some(slider) = board.slider(target) {
            let state = slider.state();
            let kind = match target {
                ControlRef::Slider(_) => "slider",
                ControlRef::Thumb(..) => "thumb",
            };
            println!(
                "  {:<16} {:<7} {:>6} in [{}, {}]  \"{}\"",
                slider.id(),
                kind,
                state.value_now,
                state.value_min,
                state.value_max,
                slider.label()
            );
        }
    }
    if let Some(color) = board.color() {
        println!("  colour readout {} ({})", color.hex, color.rgb);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn line() -> CommitLine<'static> {
        CommitLine {
            path: "red",
            previous: 128,
            value: 129,
            offset: 129,
            value_text: "129",
        }
    }

    #[test]
    fn commit_lines_are_json() {
        let mut out = Vec::new();
        write_commit(&mut out, &line()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        let json: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(json["path"], "red");
        assert_eq!(json["value"], 129);
    }

    #[test]
    fn closed_output_is_reported() {
        assert!(write_commit(&mut Closed, &line()).is_err());
    }
}
