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

//! End-to-end tests: named instances solved to completion, their known
//! optimal fitness, and the structural invariants every returned schedule
//! must uphold.

use std::fs;
use std::path::PathBuf;

use sampo::*;

/// Loads a problem from an inline payload.
fn load(payload: &str) -> Problem {
    Problem::new(serde_json::from_str(payload).unwrap()).unwrap()
}

/// Loads the canonical six-pest benchmark shipped with the crate.
fn benchmark() -> Problem {
    let location = PathBuf::new()
        .join(env!("CARGO_MANIFEST_DIR"))
        .join("data/problem.json");
    let payload = fs::read_to_string(location).expect("benchmark file not found");
    load(&payload)
}

fn solve_lex(problem: &Problem) -> Option<Vec<Solution<TripsAndSamples>>> {
    Solver::new(TripsAndSamplesEvaluator::default(), TripsThenSamples).solve(problem)
}
fn solve_pareto(problem: &Problem) -> Option<Vec<Solution<TripsAndSamples>>> {
    Solver::new(TripsAndSamplesEvaluator::default(), TripsSamplesPareto).solve(problem)
}

fn fit(trips: usize, samples: usize) -> TripsAndSamples {
    TripsAndSamples { trips, samples }
}

/// Checks the structural invariants of one returned schedule: target
/// coverage, time admissibility, reuse compatibility, per-slot capacity and
/// fitness consistency.
fn check_invariants(problem: &Problem, solution: &Solution<TripsAndSamples>) {
    // every requirement is covered exactly (reuses included)
    for requirement in problem.requirements() {
        let covered: usize = solution
            .actions
            .iter()
            .filter(|a| a.subject == requirement.subject)
            .map(|a| a.samples)
            .sum();
        assert_eq!(requirement.samples, covered);
    }
    // every action sits in an admissible slot of its subject's requirement,
    // carries that requirement's matrix, and reuses only compatible draws
    // scheduled at its own slot
    for action in solution.actions.iter() {
        let requirement = &problem.requirements()[action.subject.id()];
        assert!(requirement.times.contains(&action.time));
        assert_eq!(requirement.matrix, action.matrix);
        if let Some(source) = action.reuse {
            let drawn = &problem.requirements()[source.id()];
            assert!(problem.reusable(requirement.matrix, drawn.matrix));
            assert!(solution
                .actions
                .iter()
                .any(|a| a.subject == source && !a.is_reuse() && a.time == action.time));
        }
    }
    // own draws respect the per-slot capacity
    for (time, &bound) in problem.capacity().iter().enumerate() {
        let drawn: usize = solution
            .actions
            .iter()
            .filter(|a| !a.is_reuse() && a.time == time)
            .map(|a| a.samples)
            .sum();
        assert!(drawn <= bound);
    }
    // the fitness is consistent with the action list
    let mut times: Vec<usize> = solution.actions.iter().map(|a| a.time).collect();
    times.sort_unstable();
    times.dedup();
    assert_eq!(times.len(), solution.fitness.trips);
    let own: usize =
        solution.actions.iter().filter(|a| !a.is_reuse()).map(|a| a.samples).sum();
    assert_eq!(own, solution.fitness.samples);
}

// =================================================================
// the canonical six-pest benchmark
// =================================================================

#[test]
fn benchmark_pareto_frontier_is_five_trips_1826_samples() {
    let problem = benchmark();
    let solutions = solve_pareto(&problem).unwrap();
    assert_eq!(1, solutions.len());
    assert_eq!(fit(5, 1826), solutions[0].fitness);
}

#[test]
fn benchmark_lexicographic_optimum_matches_the_pareto_one() {
    let problem = benchmark();
    let solutions = solve_lex(&problem).unwrap();
    assert!(!solutions.is_empty());
    for solution in solutions.iter() {
        assert_eq!(fit(5, 1826), solution.fitness);
    }
}

#[test]
fn benchmark_solutions_uphold_the_invariants() {
    let problem = benchmark();
    for solution in solve_lex(&problem).unwrap().iter() {
        check_invariants(&problem, solution);
    }
    for solution in solve_pareto(&problem).unwrap().iter() {
        check_invariants(&problem, solution);
    }
}

#[test]
fn benchmark_fitness_rendering_matches_the_known_figure() {
    let problem = benchmark();
    let solutions = solve_pareto(&problem).unwrap();
    let records: Vec<_> = solutions.iter().map(|s| problem.resolve(s)).collect();
    let out = render(&records, Format::Fitness, ",").unwrap();
    assert_eq!("(5 trips, 1826 samples)\n", out);
}

#[test]
fn benchmark_solving_is_idempotent() {
    let problem = benchmark();
    let mut solver = Solver::new(TripsAndSamplesEvaluator::default(), TripsThenSamples);
    assert_eq!(solver.solve(&problem), solver.solve(&problem));
    let mut solver = Solver::new(TripsAndSamplesEvaluator::default(), TripsSamplesPareto);
    assert_eq!(solver.solve(&problem), solver.solve(&problem));
}

// =================================================================
// two subjects competing for ten tight mid-horizon slots
// =================================================================

fn tight_middle() -> Problem {
    load(
        r#"{
        "Matrices": [ {"Name": "fruits", "CanReuse": []} ],
        "Capacity": [1000, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 1000],
        "Requirements": [
            {"Subject": "Pest 1", "Matrix": "fruits", "Samples": 1000,
             "Times": [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]},
            {"Subject": "Pest 2", "Matrix": "fruits", "Samples": 1000,
             "Times": [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]}
        ]
    }"#,
    )
}

#[test]
fn tight_middle_lexicographic_uses_the_two_wide_end_slots() {
    // each subject has one admissible slot that takes its whole target, so
    // the trips-first optimum draws everything in two trips
    let problem = tight_middle();
    let solutions = solve_lex(&problem).unwrap();
    for solution in solutions.iter() {
        assert_eq!(fit(2, 2000), solution.fitness);
        check_invariants(&problem, solution);
    }
}

// =================================================================
// a frontier actually trading trips against samples
// =================================================================

fn trade_off() -> Problem {
    load(
        r#"{
        "Matrices": [ {"Name": "fruits", "CanReuse": []} ],
        "Capacity": [1000, 100, 1000],
        "Requirements": [
            {"Subject": "Pest 1", "Matrix": "fruits", "Samples": 200, "Times": [0, 1]},
            {"Subject": "Pest 2", "Matrix": "fruits", "Samples": 200, "Times": [1, 2]}
        ]
    }"#,
    )
}

#[test]
fn trade_off_pareto_frontier_holds_both_ends() {
    // two trips of 200 own samples each, or three trips where the shared
    // middle slot lets Pest 2 re-analyse 100 of Pest 1's samples
    let problem = trade_off();
    let solutions = solve_pareto(&problem).unwrap();
    let mut frontier: Vec<TripsAndSamples> =
        solutions.iter().map(|s| s.fitness).collect();
    frontier.sort_unstable_by_key(|f| (f.trips, f.samples));
    assert_eq!(vec![fit(2, 400), fit(3, 300)], frontier);
    for solution in solutions.iter() {
        check_invariants(&problem, solution);
    }
}

#[test]
fn trade_off_lexicographic_keeps_only_the_two_trip_end() {
    let problem = trade_off();
    let solutions = solve_lex(&problem).unwrap();
    for solution in solutions.iter() {
        assert_eq!(fit(2, 400), solution.fitness);
    }
}
