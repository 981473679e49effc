// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module renders resolved solutions onto the supported output formats.
//! The core never prints anything; whatever string is produced here is the
//! caller's to write wherever it pleases.

use std::fmt::{Display, Write};
use std::str::FromStr;

use serde::Serialize;

use crate::{ActionRecord, SolutionRecord};

/// The separator line printed between two solutions in the text formats.
const SEPARATOR: &str =
    "------------------------------------------------------------";

/// The supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// The solution records, pretty-printed as JSON
    Json,
    /// One fixed-width table per solution (_the default format_)
    #[default]
    Table,
    /// One row per action, columns joined by a configurable delimiter
    Csv,
    /// One compact line per action
    List,
    /// One fitness line per solution
    Fitness,
}

/// The error reported when an output format name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format '{0}'")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "json" => Ok(Format::Json),
            "table" => Ok(Format::Table),
            "csv" => Ok(Format::Csv),
            "list" => Ok(Format::List),
            "fitness" => Ok(Format::Fitness),
            _ => Err(UnknownFormat(name.to_string())),
        }
    }
}

/// Renders the given solutions in the requested format. The delimiter only
/// applies to the `csv` format. Only the `json` format can fail (and then
/// only if serialization itself does).
pub fn render<F>(
    solutions: &[SolutionRecord<F>],
    format: Format,
    delim: &str,
) -> Result<String, serde_json::Error>
where
    F: Display + Serialize,
{
    let mut out = String::new();
    match format {
        Format::Json => {
            out = serde_json::to_string_pretty(solutions)?;
            out.push('\n');
        }
        Format::Table => {
            for solution in solutions.iter() {
                out.push_str(&table(&solution.actions));
                let _ = writeln!(out, "\n{}\n{}", solution.fitness, SEPARATOR);
            }
        }
        Format::Csv => {
            let _ = writeln!(
                out,
                "Solution{d}Subject{d}Matrix{d}Time{d}Samples{d}Reuse{d}Target",
                d = delim
            );
            for (index, solution) in solutions.iter().enumerate() {
                for a in solution.actions.iter() {
                    let _ = writeln!(
                        out,
                        "{i}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                        a.subject,
                        a.matrix,
                        a.time,
                        a.samples,
                        a.reuse,
                        a.target_samples,
                        i = index,
                        d = delim
                    );
                }
            }
        }
        Format::List => {
            for solution in solutions.iter() {
                for a in solution.actions.iter() {
                    out.push_str(&list_line(a));
                    out.push('\n');
                }
                let _ = writeln!(out, "\n{}\n{}", solution.fitness, SEPARATOR);
            }
        }
        Format::Fitness => {
            for solution in solutions.iter() {
                let _ = writeln!(out, "{}", solution.fitness);
            }
        }
    }
    Ok(out)
}

/// Formats the actions of one solution as a fixed-width table, one row per
/// action, with a header row. Own draws leave the `Reuse` column blank.
pub fn table(actions: &[ActionRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>10} {:>18} {:>6} {:>10} {:>10} {:>10}",
        "Subject", "Matrix", "Time", "Samples", "Reuse", "Target"
    );
    for a in actions.iter() {
        let _ = writeln!(
            out,
            "{:>10} {:>18} {:>6} {:>10} {:>10} {:>10}",
            a.subject, a.matrix, a.time, a.samples, a.reuse, a.target_samples
        );
    }
    out
}

/// Formats one action as a single compact line.
fn list_line(a: &ActionRecord) -> String {
    let mut line = format!(
        "{} ({}) time {}: {}/{}",
        a.subject, a.matrix, a.time, a.samples, a.target_samples
    );
    if !a.reuse.is_empty() {
        let _ = write!(line, " reusing {}", a.reuse);
    }
    line
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
