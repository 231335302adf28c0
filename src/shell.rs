//! Line-oriented driver that feeds user events to the controller.
//!
//! ```text
//! click 38.7 -9.1
//! type cycling
//! distance 20
//! duration 60
//! elevation 300
//! submit
//! list
//! ```

use crate::alert::Notifier;
use crate::app::{App, SubmitOutcome};
use crate::form::{Field, UnknownWorkoutType};
use crate::map::TerminalMap;
use crate::types::{Coords, WorkoutType};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Click(Coords),
    Type(WorkoutType),
    Input(Field, String),
    Submit,
    List,
    Markers,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("usage: click <lat> <lng>")]
    BadClick,
    #[error(transparent)]
    BadType(#[from] UnknownWorkoutType),
}

/// Parse one line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    let cmd = match word {
        "click" => Command::Click(parse_click(rest)?),
        "type" => Command::Type(rest.parse()?),
        "submit" => Command::Submit,
        "list" => Command::List,
        "markers" => Command::Markers,
        "quit" | "exit" => Command::Quit,
        other => match other.parse::<Field>() {
            Ok(field) => Command::Input(field, rest.to_string()),
            Err(()) => return Err(CommandError::Unknown(other.to_string())),
        },
    };
    Ok(Some(cmd))
}

fn parse_click(rest: &str) -> Result<Coords, CommandError> {
    let mut parts = rest.split_whitespace();
    let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CommandError::BadClick);
    };
    let lat: f64 = lat.parse().map_err(|_| CommandError::BadClick)?;
    let lng: f64 = lng.parse().map_err(|_| CommandError::BadClick)?;
    if !lat.is_finite() || !lng.is_finite() {
        return Err(CommandError::BadClick);
    }
    Ok(Coords::new(lat, lng))
}

/// Apply one command. Returns `false` when the session should end.
pub fn apply<N: Notifier>(
    app: &mut App<TerminalMap, N>,
    cmd: Command,
    out: &mut impl Write,
) -> Result<bool> {
    match cmd {
        Command::Click(at) => app.show_form(at),
        Command::Type(kind) => app.change_type(kind),
        Command::Input(field, value) => app.form_mut().set(field, value),
        Command::Submit => {
            if let SubmitOutcome::Added(id) = app.new_workout() {
                writeln!(out, "added {id}")?;
            }
        }
        Command::List => {
            for line in app.render_workout_list() {
                writeln!(out, "{line}")?;
            }
        }
        Command::Markers => write_markers(app.map(), out)?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn write_markers(map: &TerminalMap, out: &mut impl Write) -> Result<()> {
    for (i, m) in map.markers().iter().enumerate() {
        let content = m.popup.as_ref().map_or("", |(_, c)| c.as_str());
        writeln!(out, "{}\t{}\t{content}", i + 1, m.at)?;
    }
    Ok(())
}

/// Run every line of `input` through the controller until EOF or `quit`.
///
/// Malformed lines are logged and skipped.
pub fn run<N: Notifier>(
    app: &mut App<TerminalMap, N>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<usize> {
    let mut applied = 0usize;
    for (lineno, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", lineno + 1))?;
        let cmd = match parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!(line = lineno + 1, err = %e, "skipping command");
                continue;
            }
        };
        applied += 1;
        if !apply(app, cmd, out)? {
            break;
        }
    }
    out.flush()?;
    Ok(applied)
}
