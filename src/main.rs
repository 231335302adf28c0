#![deny(warnings, clippy::all, clippy::pedantic, clippy::nursery)]

use anyhow::{Context, Result};
use clap::Parser;
use mapty::alert::TerminalNotifier;
use mapty::app::App;
use mapty::geolocation::FixedPosition;
use mapty::map::TerminalMap;
use mapty::{cli, dlog, shell, utils};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let mut app = App::new(
        TerminalMap::new(),
        TerminalNotifier::stderr(),
        cli.map_config(),
    );

    let mut geo = FixedPosition::from_args(cli.lat, cli.lng);
    app.start(Some(&mut geo));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let input = cli
        .script
        .as_deref()
        .map(open_script)
        .transpose()?
        .unwrap_or_else(|| -> Box<dyn BufRead> {
            dlog!("mode=stdin");
            Box::new(io::stdin().lock())
        });
    let applied = shell::run(&mut app, input, &mut out)?;

    tracing::info!(
        commands = applied,
        workouts = app.workouts().len(),
        "session done"
    );

    if cli.json {
        serde_json::to_writer_pretty(&mut out, app.workouts()).context("writing workouts JSON")?;
        writeln!(out)?;
    }

    Ok(())
}

fn open_script(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("opening script: {}", path.display()))?;
    dlog!("mode=script path={}", path.display());
    Ok(Box::new(BufReader::new(file)))
}
