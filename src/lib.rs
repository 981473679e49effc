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

//! # SAMPO
//! Sampo is a branch-and-bound optimizer for reuse-aware sampling schedules.
//! A problem consists of *subjects* (say, pests to monitor), each demanding a
//! number of samples of one *matrix* (the sampling medium, say fruits or
//! shoots) during a restricted set of time slots, and of a per-slot bound on
//! how many samples can be physically drawn. Matrices admit directed *reuse*:
//! one physical draw can sometimes be re-analysed for another subject whose
//! matrix is compatible, at no capacity cost. The solver finds the schedules
//! that satisfy every requirement while minimizing the number of slots that
//! are visited (*trips*) and the number of samples actually drawn
//! (*samples*), either lexicographically or as a Pareto frontier.
//!
//! ## Quick Example
//! A problem is described by a JSON payload and solved in a few lines. Two
//! pests share the fruits matrix; the second one re-analyses the first one's
//! draw instead of drawing its own samples.
//!
//! ```
//! use sampo::*;
//!
//! let payload = r#"{
//!     "Matrices":     [ {"Name": "fruits", "CanReuse": []} ],
//!     "Capacity":     [100, 100],
//!     "Requirements": [
//!         {"Subject": "Pest 1", "Matrix": "fruits", "Samples": 60, "Times": [0, 1]},
//!         {"Subject": "Pest 2", "Matrix": "fruits", "Samples": 40, "Times": [0]}
//!     ]
//! }"#;
//! let instance: ProblemInstance = serde_json::from_str(payload).unwrap();
//! let problem = Problem::new(instance).unwrap();
//!
//! let mut solver = Solver::new(TripsAndSamplesEvaluator::default(), TripsThenSamples);
//! let solutions = solver.solve(&problem).expect("this problem is satisfiable");
//!
//! assert_eq!(TripsAndSamples { trips: 1, samples: 60 }, solutions[0].fitness);
//!
//! // project onto names and render, e.g. as a table
//! let records: Vec<_> = solutions.iter().map(|s| problem.resolve(s)).collect();
//! println!("{}", render(&records, Format::Table, ",").unwrap());
//! ```
//!
//! Swapping `TripsThenSamples` for `TripsSamplesPareto` makes the same solver
//! collect the whole frontier of non-dominated schedules instead of the
//! lexicographically best ones. Custom objectives plug in through the
//! `FitnessEvaluator` and `FitnessComparator` traits.

mod common;
mod instance;
mod problem;
mod abstraction;
mod implementation;
mod render;

pub use common::*;
pub use instance::*;
pub use problem::*;
pub use abstraction::*;
pub use implementation::*;
pub use render::*;
