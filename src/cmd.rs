use anyhow::{bail, Context, Result};
use clap::Parser;
use termcolor::{ColorChoice, StandardStream};
use walle_common::error::{report_err, Error};
use walle_interpreter::visualizer::TraceVisualizer;
use walle_interpreter::DEFAULT_CANVAS_SIZE;

use std::fs;
use std::io;

#[derive(Debug, Parser)]
#[command(about, author, disable_help_subcommand = true, propagate_version = true, version)]
pub enum Cmd {
    /// Parse a script and report syntax errors without running it.
    Check { path: String },
    /// Run a script, writing one line per drawing command to stdout.
    Run {
        path: String,
        /// Side length of the square canvas.
        #[arg(long, default_value_t = DEFAULT_CANVAS_SIZE)]
        canvas_size: i64,
    },
}

impl Cmd {
    pub fn run(&self) -> Result<()> {
        match self {
            Cmd::Check { path } => check(path),
            Cmd::Run { path, canvas_size } => run(path, *canvas_size),
        }
    }
}

fn check(path: &str) -> Result<()> {
    let source = read_source(path)?;
    if let Err(e) = walle_syntax::parse(&source) {
        report(&source, &e);
        bail!("script has errors");
    }
    Ok(())
}

fn run(path: &str, canvas_size: i64) -> Result<()> {
    if canvas_size <= 0 {
        bail!("canvas size must be positive");
    }
    let source = read_source(path)?;
    let stdout = io::stdout().lock();
    let mut visualizer = TraceVisualizer::new(stdout, canvas_size);
    if let Err(e) = walle_interpreter::run(&source, canvas_size, &mut visualizer) {
        report(&source, &e);
        bail!("script has errors");
    }
    Ok(())
}

fn read_source(path: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("could not read file: {path}"))
}

fn report(source: &str, e: &Error) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    report_err(&mut stderr, source, e);
}
