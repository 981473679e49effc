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

//! The command line driver: reads a problem payload from file, solves it
//! under the requested regime and renders the solutions on stdout. The
//! status line goes to stderr so that the rendered output stays pipeable.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{CommandFactory, Parser};

use sampo::*;

/// This structure uses `clap-derive` annotations and define the arguments that can
/// be passed on to the executable solver.
#[derive(Parser, Debug)]
#[command(author, version, about = "sampo -- sampling schedule optimization", long_about = None)]
struct Args {
    /// Input JSON file
    #[clap(short, long)]
    input: Option<PathBuf>,
    /// Output format. One of [json table csv list fitness]
    #[clap(short, long, default_value = "table")]
    format: String,
    /// Column delimiter for CSV output
    #[clap(short, long, default_value = ",")]
    delim: String,
    /// Use pareto optimization criterion
    #[clap(short, long, action)]
    pareto: bool,
}

/// This enumeration groups the kind of errors that might occur when running
/// the solver from the command line: the input file may be unreadable, its
/// content may not be a problem payload, the payload may describe no valid
/// problem, or the requested output format may not exist. All of them abort
/// with exit code 1; "no solution found" is *not* among them.
#[derive(Debug, thiserror::Error)]
enum Error {
    /// There was an io related error
    #[error("io error {0}")]
    Io(#[from] std::io::Error),
    /// The input file did not contain a well-formed problem payload
    #[error("malformed problem payload: {0}")]
    Json(#[from] serde_json::Error),
    /// The payload was well-formed but described no valid problem
    #[error(transparent)]
    Problem(#[from] ProblemError),
    /// The requested output format does not exist
    #[error(transparent)]
    Format(#[from] UnknownFormat),
}

/// Solves the problem stored in `file` and returns the rendered output.
fn run(file: &Path, format: &str, delim: &str, pareto: bool) -> Result<String, Error> {
    let format = Format::from_str(format)?;

    let payload = fs::read_to_string(file)?;
    let instance: ProblemInstance = serde_json::from_str(&payload)?;
    let problem = Problem::new(instance)?;

    let solutions = if pareto {
        Solver::new(TripsAndSamplesEvaluator::default(), TripsSamplesPareto).solve(&problem)
    } else {
        Solver::new(TripsAndSamplesEvaluator::default(), TripsThenSamples).solve(&problem)
    };

    let Some(solutions) = solutions else {
        println!("No solution found");
        return Ok(String::new());
    };
    eprintln!("Found {} solution(s)\n", solutions.len());

    let records: Vec<_> = solutions.iter().map(|s| problem.resolve(s)).collect();
    Ok(render(&records, format, delim)?)
}

fn main() {
    let args = Args::parse();

    let Some(input) = args.input.as_deref() else {
        let _ = Args::command().print_help();
        return;
    };

    match run(input, &args.format, &args.delim, args.pareto) {
        Ok(output) => print!("{output}"),
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}
