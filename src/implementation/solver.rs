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

//! This module provides the implementation of the solver: a depth-first
//! branch-and-bound over the space of schedules, coupled with a constructive
//! satisfaction pass that both witnesses how the scheduled draws cover the
//! requirements (reuses included) and selects the requirement to branch on
//! next.

use std::cmp::Ordering;

use crate::{Action, FitnessComparator, FitnessEvaluator, Problem, Solution};

/// An unsatisfied requirement spotted by the satisfaction pass: the candidate
/// the search will branch on, together with the shortfall that remains after
/// accounting for everything the current schedule already covers.
#[derive(Debug, Clone, Copy)]
struct Unsatisfied {
    /// The index of the requirement in the problem's declaration order
    index: usize,
    /// The number of samples the current schedule still misses
    required: usize,
}

/// This is the solver. It enumerates candidate schedules depth-first,
/// branching on the most constrained unsatisfied requirement at each node and
/// pruning every branch whose fitness can no longer improve on what is
/// already known (fitness is monotone along a branch, so this bound is safe).
/// Depending on the comparator it is instantiated with, it either keeps the
/// lexicographically best solutions (scalar regime) or the whole frontier of
/// non-dominated ones (Pareto regime).
///
/// The solver owns its working state and is not reentrant; it can be reused
/// for any number of consecutive solves.
///
/// # Example Usage
/// ```
/// use sampo::*;
///
/// let payload = r#"{
///     "Matrices":     [ {"Name": "fruits", "CanReuse": []} ],
///     "Capacity":     [50, 50],
///     "Requirements": [
///         {"Subject": "Pest 1", "Matrix": "fruits", "Samples": 20, "Times": [0]},
///         {"Subject": "Pest 2", "Matrix": "fruits", "Samples": 20, "Times": [0, 1]}
///     ]
/// }"#;
/// let instance: ProblemInstance = serde_json::from_str(payload).unwrap();
/// let problem = Problem::new(instance).unwrap();
///
/// let mut solver = Solver::new(TripsAndSamplesEvaluator::default(), TripsThenSamples);
/// let solutions = solver.solve(&problem).unwrap();
///
/// // Pest 2 re-analyses Pest 1's draw: one trip, twenty drawn samples.
/// assert_eq!(TripsAndSamples { trips: 1, samples: 20 }, solutions[0].fitness);
/// ```
pub struct Solver<E, C>
where
    E: FitnessEvaluator,
    C: FitnessComparator<Fitness = E::Fitness>,
{
    /// The evaluator mapping schedules onto fitness values
    evaluator: E,
    /// The comparator ranking fitness values (and selecting the regime)
    comparator: C,
    /// The in-progress schedule: one own draw per branching decision taken
    /// on the path from the root to the current node (push/pop discipline)
    cur: Vec<Action>,
    /// The witness rebuilt at every node: how each requirement is covered by
    /// `cur`, reuses spelled out. Cleared, never reallocated.
    scratch: Vec<Action>,
    /// The solution pool of the regime in progress
    solutions: Vec<Solution<E::Fitness>>,
    /// The scalar-regime incumbent; the default value means "none yet"
    incumbent: E::Fitness,
}

impl<E, C> Solver<E, C>
where
    E: FitnessEvaluator,
    C: FitnessComparator<Fitness = E::Fitness>,
    E::Fitness: Clone + Default + PartialEq,
{
    /// Creates a solver using the given evaluator and comparator.
    pub fn new(evaluator: E, comparator: C) -> Self {
        Solver {
            evaluator,
            comparator,
            cur: vec![],
            scratch: vec![],
            solutions: vec![],
            incumbent: Default::default(),
        }
    }

    /// Searches the complete schedule space of the given problem. Returns
    /// `None` when the problem admits no satisfying schedule; otherwise the
    /// solution pool of the active regime -- all lexicographic ties in the
    /// scalar regime, the non-dominated frontier in the Pareto regime.
    ///
    /// A problem with no requirement at all is satisfied by the empty
    /// schedule: the result is one solution with no action and the default
    /// fitness.
    pub fn solve(&mut self, problem: &Problem) -> Option<Vec<Solution<E::Fitness>>> {
        self.cur.clear();
        self.scratch.clear();
        self.solutions.clear();
        self.incumbent = Default::default();

        self.explore(problem);

        if self.solutions.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.solutions))
        }
    }

    /// Processes one node of the search tree: evaluate and bound, run the
    /// satisfaction pass, then either branch on the unsatisfied candidate or
    /// accept the current schedule as a solution.
    fn explore(&mut self, problem: &Problem) {
        let fitness = self.evaluator.evaluate(&self.cur);
        if self.comparator.is_pareto() {
            for known in self.solutions.iter() {
                if self.comparator.compare(&fitness, &known.fitness) == Ordering::Greater {
                    return;
                }
            }
        } else if self.comparator.compare(&fitness, &self.incumbent) == Ordering::Greater {
            return;
        }

        let mut capacity = problem.capacity().to_vec();
        match self.satisfaction_pass(problem, &mut capacity) {
            None => self.accept(fitness),
            Some(unsatisfied) => {
                let requirement = &problem.requirements()[unsatisfied.index];
                for &time in requirement.times.iter() {
                    if capacity[time] == 0 {
                        continue;
                    }
                    self.cur.push(Action {
                        subject: requirement.subject,
                        matrix: requirement.matrix,
                        time,
                        samples: unsatisfied.required.min(capacity[time]),
                        target: requirement.samples,
                        reuse: None,
                    });
                    self.explore(problem);
                    self.cur.pop();
                }
            }
        }
    }

    /// Walks the requirements in declaration order and attributes the draws
    /// of the current schedule to them, recording one scratch entry per
    /// attribution. A draw of a compatible matrix at an admissible slot is
    /// consumed up to the remaining need; the subject's own draws are
    /// additionally capped by (and charged against) the slot capacity,
    /// whereas re-analysing another subject's draw is free.
    ///
    /// Returns the requirement to branch on when at least one requirement
    /// remains uncovered: the first one found, unless a later one is more
    /// constrained -- same matrix with a larger shortfall, or a different
    /// matrix that the candidate's matrix could itself be reusing (the side
    /// of the directed relation that cannot piggy-back on later choices).
    fn satisfaction_pass(
        &mut self,
        problem: &Problem,
        capacity: &mut [usize],
    ) -> Option<Unsatisfied> {
        self.scratch.clear();

        let mut unsatisfied: Option<Unsatisfied> = None;
        for (index, requirement) in problem.requirements().iter().enumerate() {
            let mut need = requirement.samples;
            for action in self.cur.iter() {
                if need == 0 {
                    break;
                }
                if !requirement.times.contains(&action.time) {
                    continue;
                }
                if !problem.reusable(requirement.matrix, action.matrix) {
                    continue;
                }
                let own = requirement.subject == action.subject;
                let mut covered = action.samples.min(need);
                if own {
                    covered = covered.min(capacity[action.time]);
                }
                if covered > 0 {
                    self.scratch.push(Action {
                        subject: requirement.subject,
                        matrix: requirement.matrix,
                        time: action.time,
                        samples: covered,
                        target: requirement.samples,
                        reuse: (!own).then_some(action.subject),
                    });
                    if own {
                        capacity[action.time] -= covered;
                    }
                    need -= covered;
                }
            }
            if need > 0 {
                let candidate = Unsatisfied { index, required: need };
                match unsatisfied {
                    None => unsatisfied = Some(candidate),
                    Some(current) => {
                        let held = &problem.requirements()[current.index];
                        if requirement.matrix == held.matrix {
                            if candidate.required > current.required {
                                unsatisfied = Some(candidate);
                            }
                        } else if problem.reusable(held.matrix, requirement.matrix) {
                            unsatisfied = Some(candidate);
                        }
                    }
                }
            }
        }
        unsatisfied
    }

    /// Submits the schedule witnessed by the current scratch to the pool,
    /// under the acceptance policy of the active regime. The snapshot stored
    /// is the scratch -- the decomposed schedule -- not the branching list.
    fn accept(&mut self, fitness: E::Fitness) {
        if self.comparator.is_pareto() {
            self.accept_pareto(fitness);
        } else {
            self.accept_scalar(fitness);
        }
    }

    /// Scalar acceptance: a strictly better leaf resets the pool and the
    /// incumbent; a tie joins the pool; anything else is discarded.
    fn accept_scalar(&mut self, fitness: E::Fitness) {
        match self.comparator.compare(&fitness, &self.incumbent) {
            Ordering::Less => {
                self.solutions.clear();
                self.incumbent = fitness.clone();
                self.solutions.push(Solution { actions: self.scratch.clone(), fitness });
            }
            Ordering::Equal => {
                self.solutions.push(Solution { actions: self.scratch.clone(), fitness });
            }
            Ordering::Greater => {}
        }
    }

    /// Pareto acceptance: drop every pool entry the leaf dominates, then
    /// admit the leaf unless a surviving entry dominates it or carries the
    /// exact same fitness (the pool deduplicates by fitness).
    fn accept_pareto(&mut self, fitness: E::Fitness) {
        let comparator = &self.comparator;
        let mut dominated = false;
        let mut duplicate = false;
        self.solutions.retain(|known| match comparator.compare(&fitness, &known.fitness) {
            Ordering::Less => false,
            Ordering::Greater => {
                dominated = true;
                true
            }
            Ordering::Equal => {
                duplicate |= known.fitness == fitness;
                true
            }
        });
        if !dominated && !duplicate {
            self.solutions.push(Solution { actions: self.scratch.clone(), fitness });
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_solver {
    use crate::*;

    fn problem(payload: &str) -> Problem {
        Problem::new(serde_json::from_str(payload).unwrap()).unwrap()
    }
    fn lexicographic() -> Solver<TripsAndSamplesEvaluator, TripsThenSamples> {
        Solver::new(TripsAndSamplesEvaluator::default(), TripsThenSamples)
    }
    fn pareto() -> Solver<TripsAndSamplesEvaluator, TripsSamplesPareto> {
        Solver::new(TripsAndSamplesEvaluator::default(), TripsSamplesPareto)
    }

    #[test]
    fn a_matching_matrix_is_shared_between_subjects() {
        // no cross-matrix reuse is declared, yet Pest 2 piggy-backs on
        // Pest 1's draw because every matrix can stand in for itself
        let problem = problem(
            r#"{
            "Matrices": [ {"Name": "A", "CanReuse": []} ],
            "Capacity": [10, 10, 10],
            "Requirements": [
                {"Subject": "Pest1", "Matrix": "A", "Samples": 5, "Times": [1]},
                {"Subject": "Pest2", "Matrix": "A", "Samples": 5, "Times": [1]}
            ]
        }"#,
        );
        let solutions = lexicographic().solve(&problem).unwrap();
        assert_eq!(1, solutions.len());

        let solution = &solutions[0];
        assert_eq!(TripsAndSamples { trips: 1, samples: 5 }, solution.fitness);
        assert_eq!(
            vec![
                Action {
                    subject: Subject(0),
                    matrix: Matrix(0),
                    time: 1,
                    samples: 5,
                    target: 5,
                    reuse: None
                },
                Action {
                    subject: Subject(1),
                    matrix: Matrix(0),
                    time: 1,
                    samples: 5,
                    target: 5,
                    reuse: Some(Subject(0))
                },
            ],
            solution.actions
        );
    }

    #[test]
    fn an_unsatisfiable_problem_yields_no_solution() {
        let problem = problem(
            r#"{
            "Matrices": [ {"Name": "A", "CanReuse": []} ],
            "Capacity": [1],
            "Requirements": [
                {"Subject": "Pest1", "Matrix": "A", "Samples": 10, "Times": [0]}
            ]
        }"#,
        );
        assert_eq!(None, lexicographic().solve(&problem));
        assert_eq!(None, pareto().solve(&problem));
    }

    #[test]
    fn no_requirement_is_satisfied_by_the_empty_schedule() {
        let problem = problem(
            r#"{
            "Matrices": [ {"Name": "A", "CanReuse": []} ],
            "Capacity": [5],
            "Requirements": []
        }"#,
        );
        let solutions = lexicographic().solve(&problem).unwrap();
        assert_eq!(1, solutions.len());
        assert!(solutions[0].actions.is_empty());
        assert_eq!(TripsAndSamples { trips: 0, samples: 0 }, solutions[0].fitness);
    }

    #[test]
    fn a_target_exceeding_one_slot_spills_over_to_the_next() {
        let problem = problem(
            r#"{
            "Matrices": [ {"Name": "A", "CanReuse": []} ],
            "Capacity": [4, 4, 4],
            "Requirements": [
                {"Subject": "Pest1", "Matrix": "A", "Samples": 6, "Times": [0, 1, 2]}
            ]
        }"#,
        );
        let solutions = lexicographic().solve(&problem).unwrap();
        for solution in solutions.iter() {
            assert_eq!(TripsAndSamples { trips: 2, samples: 6 }, solution.fitness);
            assert_eq!(6usize, solution.actions.iter().map(|a| a.samples).sum::<usize>());
            // per-slot own draws stay within capacity
            for action in solution.actions.iter() {
                assert!(action.samples <= 4);
            }
        }
    }

    #[test]
    fn the_pareto_pool_deduplicates_by_fitness() {
        // two slots of equal capacity: every optimal schedule has the same
        // fitness, so the pool must hold exactly one entry
        let problem = problem(
            r#"{
            "Matrices": [ {"Name": "A", "CanReuse": []} ],
            "Capacity": [5, 5],
            "Requirements": [
                {"Subject": "Pest1", "Matrix": "A", "Samples": 5, "Times": [0, 1]}
            ]
        }"#,
        );
        let solutions = pareto().solve(&problem).unwrap();
        assert_eq!(1, solutions.len());
        assert_eq!(TripsAndSamples { trips: 1, samples: 5 }, solutions[0].fitness);
    }

    #[test]
    fn solving_twice_yields_the_same_pool() {
        let problem = problem(
            r#"{
            "Matrices": [
                {"Name": "fruits & shoots", "CanReuse": []},
                {"Name": "fruits", "CanReuse": ["fruits & shoots"]}
            ],
            "Capacity": [10, 10, 10],
            "Requirements": [
                {"Subject": "Pest1", "Matrix": "fruits & shoots", "Samples": 8, "Times": [0, 1]},
                {"Subject": "Pest2", "Matrix": "fruits", "Samples": 12, "Times": [1, 2]}
            ]
        }"#,
        );
        let mut solver = lexicographic();
        let first = solver.solve(&problem).unwrap();
        let second = solver.solve(&problem).unwrap();
        assert_eq!(first, second);

        let mut solver = pareto();
        let first = solver.solve(&problem).unwrap();
        let second = solver.solve(&problem).unwrap();
        assert_eq!(first, second);
    }
}
