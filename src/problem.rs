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

//! This module defines the validated problem model. A `Problem` is built once
//! from a `ProblemInstance` payload; construction interns every subject and
//! matrix name into a dense integer id, materializes the directed reuse
//! relation as a square boolean matrix, and normalizes the requirements.
//! After construction the problem is immutable and can be shared freely.

use fxhash::FxHashMap;

use crate::{
    ActionRecord, Matrix, ProblemInstance, Requirement, Solution, SolutionRecord, Subject,
};

/// The errors that can pop up while constructing a problem from its payload.
/// All of them are fatal: a payload triggering any of these describes no
/// valid problem at all. The search itself never fails -- running out of
/// capacity on a branch is pruning, not an error.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProblemError {
    /// Two matrices were declared under the same name
    #[error("duplicate matrix '{0}'")]
    DuplicateMatrix(String),
    /// A reuse list mentions a matrix that was never declared
    #[error("matrix '{matrix}' declares reuse of unknown matrix '{reuse}'")]
    UnknownReuseMatrix { matrix: String, reuse: String },
    /// A requirement mentions a matrix that was never declared
    #[error("requirement for '{subject}' uses unknown matrix '{matrix}'")]
    UnknownMatrix { subject: String, matrix: String },
    /// Two requirements share the same subject
    #[error("duplicate subject '{0}'")]
    DuplicateSubject(String),
    /// A requirement lists the same time slot twice
    #[error("requirement for '{0}' lists a duplicate time slot")]
    DuplicateTime(String),
    /// A requirement demands zero samples
    #[error("requirement for '{0}' demands zero samples")]
    ZeroSamples(String),
    /// A requirement lists a time slot beyond the capacity horizon
    #[error("requirement for '{subject}' uses time slot {time} beyond the horizon {horizon}")]
    TimeOutOfRange { subject: String, time: usize, horizon: usize },
}

/// The immutable description of a sampling schedule optimization problem:
/// which subjects demand how many samples of which matrix during which time
/// slots, how many own samples each slot can accomodate, and which matrix
/// draws can be re-analysed for which other matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    /// The declared subject names, indexed by `Subject`
    subject_names: Vec<String>,
    /// The declared matrix names, indexed by `Matrix`
    matrix_names: Vec<String>,
    /// `reusable[a][b]` == true iff a requirement of matrix `a` can be
    /// satisfied by a draw of matrix `b` (directed; diagonal forced true)
    reusable: Vec<Vec<bool>>,
    /// Per-slot upper bound on own samples; the length is the time horizon
    capacity: Vec<usize>,
    /// The normalized requirements, in declaration order
    requirements: Vec<Requirement>,
}

impl Problem {
    /// Validates the given payload and builds the problem model out of it.
    pub fn new(instance: ProblemInstance) -> Result<Self, ProblemError> {
        let nb_matrices = instance.matrices.len();
        let mut matrix_ids: FxHashMap<&str, Matrix> = FxHashMap::default();
        let mut matrix_names = Vec::with_capacity(nb_matrices);
        for (i, decl) in instance.matrices.iter().enumerate() {
            if matrix_ids.insert(&decl.name, Matrix(i)).is_some() {
                return Err(ProblemError::DuplicateMatrix(decl.name.clone()));
            }
            matrix_names.push(decl.name.clone());
        }

        let mut reusable = vec![vec![false; nb_matrices]; nb_matrices];
        for (i, row) in reusable.iter_mut().enumerate() {
            row[i] = true;
        }
        for decl in instance.matrices.iter() {
            let of = matrix_ids[decl.name.as_str()];
            for reuse in decl.can_reuse.iter() {
                let by = matrix_ids.get(reuse.as_str()).copied().ok_or_else(|| {
                    ProblemError::UnknownReuseMatrix {
                        matrix: decl.name.clone(),
                        reuse: reuse.clone(),
                    }
                })?;
                reusable[of.id()][by.id()] = true;
            }
        }

        let horizon = instance.capacity.len();
        let mut subject_ids: FxHashMap<&str, Subject> = FxHashMap::default();
        let mut subject_names = Vec::with_capacity(instance.requirements.len());
        let mut requirements = Vec::with_capacity(instance.requirements.len());
        for decl in instance.requirements.iter() {
            let subject = Subject(subject_names.len());
            if subject_ids.insert(&decl.subject, subject).is_some() {
                return Err(ProblemError::DuplicateSubject(decl.subject.clone()));
            }
            subject_names.push(decl.subject.clone());

            let matrix = matrix_ids.get(decl.matrix.as_str()).copied().ok_or_else(|| {
                ProblemError::UnknownMatrix {
                    subject: decl.subject.clone(),
                    matrix: decl.matrix.clone(),
                }
            })?;
            if decl.samples == 0 {
                return Err(ProblemError::ZeroSamples(decl.subject.clone()));
            }

            let mut times = decl.times.clone();
            times.sort_unstable();
            times.dedup();
            if times.len() != decl.times.len() {
                return Err(ProblemError::DuplicateTime(decl.subject.clone()));
            }
            if let Some(&last) = times.last() {
                if last >= horizon {
                    return Err(ProblemError::TimeOutOfRange {
                        subject: decl.subject.clone(),
                        time: last,
                        horizon,
                    });
                }
            }

            requirements.push(Requirement { subject, matrix, samples: decl.samples, times });
        }

        Ok(Problem {
            subject_names,
            matrix_names,
            reusable,
            capacity: instance.capacity,
            requirements,
        })
    }

    /// The number of subjects (== the number of requirements).
    pub fn nb_subjects(&self) -> usize {
        self.subject_names.len()
    }
    /// The number of declared matrices.
    pub fn nb_matrices(&self) -> usize {
        self.matrix_names.len()
    }
    /// The declared name of the given subject.
    pub fn subject_name(&self, subject: Subject) -> &str {
        &self.subject_names[subject.id()]
    }
    /// The declared name of the given matrix.
    pub fn matrix_name(&self, matrix: Matrix) -> &str {
        &self.matrix_names[matrix.id()]
    }
    /// The per-slot own-sample capacity; its length is the time horizon.
    pub fn capacity(&self) -> &[usize] {
        &self.capacity
    }
    /// The normalized requirements, in declaration order.
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }
    /// True iff a requirement of matrix `of` can be satisfied by a draw of
    /// matrix `by` at the same time slot. The relation is directed and its
    /// diagonal always holds.
    #[inline]
    pub fn reusable(&self, of: Matrix, by: Matrix) -> bool {
        self.reusable[of.id()][by.id()]
    }

    /// Projects an internal solution onto its external form, resolving every
    /// id back to the declared names. The reuse sentinel becomes the empty
    /// string.
    pub fn resolve<F: Clone>(&self, solution: &Solution<F>) -> SolutionRecord<F> {
        let actions = solution
            .actions
            .iter()
            .map(|a| ActionRecord {
                subject: self.subject_names[a.subject.id()].clone(),
                matrix: self.matrix_names[a.matrix.id()].clone(),
                reuse: a
                    .reuse
                    .map(|s| self.subject_names[s.id()].clone())
                    .unwrap_or_default(),
                time: a.time,
                samples: a.samples,
                target_samples: a.target,
            })
            .collect();
        SolutionRecord { fitness: solution.fitness.clone(), actions }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_problem {
    use crate::*;

    fn instance(payload: &str) -> ProblemInstance {
        serde_json::from_str(payload).unwrap()
    }

    fn valid() -> ProblemInstance {
        instance(
            r#"{
            "Matrices": [
                {"Name": "fruits & shoots", "CanReuse": []},
                {"Name": "fruits", "CanReuse": ["fruits & shoots"]},
                {"Name": "shoots", "CanReuse": ["fruits & shoots"]}
            ],
            "Capacity": [10, 20, 30],
            "Requirements": [
                {"Subject": "Pest 1", "Matrix": "fruits", "Samples": 5, "Times": [2, 0]},
                {"Subject": "Pest 2", "Matrix": "shoots", "Samples": 7, "Times": [1]}
            ]
        }"#,
        )
    }

    #[test]
    fn construction_interns_names_and_sorts_times() {
        let problem = Problem::new(valid()).unwrap();
        assert_eq!(2, problem.nb_subjects());
        assert_eq!(3, problem.nb_matrices());
        assert_eq!("Pest 1", problem.subject_name(Subject(0)));
        assert_eq!("shoots", problem.matrix_name(Matrix(2)));
        // times are normalized in ascending order
        assert_eq!(vec![0, 2], problem.requirements()[0].times);
    }

    #[test]
    fn the_reuse_diagonal_is_forced_true() {
        let problem = Problem::new(valid()).unwrap();
        for m in 0..problem.nb_matrices() {
            assert!(problem.reusable(Matrix(m), Matrix(m)));
        }
        // declared entries are directed
        assert!(problem.reusable(Matrix(1), Matrix(0)));
        assert!(!problem.reusable(Matrix(0), Matrix(1)));
        assert!(!problem.reusable(Matrix(1), Matrix(2)));
    }

    #[test]
    fn an_unknown_reuse_matrix_is_rejected() {
        let mut payload = valid();
        payload.matrices[1].can_reuse.push("leaves".to_string());
        assert_eq!(
            Err(ProblemError::UnknownReuseMatrix {
                matrix: "fruits".to_string(),
                reuse: "leaves".to_string()
            }),
            Problem::new(payload)
        );
    }

    #[test]
    fn an_unknown_requirement_matrix_is_rejected() {
        let mut payload = valid();
        payload.requirements[1].matrix = "leaves".to_string();
        assert_eq!(
            Err(ProblemError::UnknownMatrix {
                subject: "Pest 2".to_string(),
                matrix: "leaves".to_string()
            }),
            Problem::new(payload)
        );
    }

    #[test]
    fn a_duplicate_matrix_is_rejected() {
        let mut payload = valid();
        payload.matrices[2].name = "fruits".to_string();
        assert_eq!(
            Err(ProblemError::DuplicateMatrix("fruits".to_string())),
            Problem::new(payload)
        );
    }

    #[test]
    fn a_duplicate_subject_is_rejected() {
        let mut payload = valid();
        payload.requirements[1].subject = "Pest 1".to_string();
        assert_eq!(
            Err(ProblemError::DuplicateSubject("Pest 1".to_string())),
            Problem::new(payload)
        );
    }

    #[test]
    fn a_duplicate_time_entry_is_rejected() {
        let mut payload = valid();
        payload.requirements[0].times = vec![0, 2, 0];
        assert_eq!(
            Err(ProblemError::DuplicateTime("Pest 1".to_string())),
            Problem::new(payload)
        );
    }

    #[test]
    fn a_zero_sample_requirement_is_rejected() {
        let mut payload = valid();
        payload.requirements[0].samples = 0;
        assert_eq!(
            Err(ProblemError::ZeroSamples("Pest 1".to_string())),
            Problem::new(payload)
        );
    }

    #[test]
    fn a_time_slot_beyond_the_horizon_is_rejected() {
        let mut payload = valid();
        payload.requirements[0].times = vec![0, 3];
        assert_eq!(
            Err(ProblemError::TimeOutOfRange {
                subject: "Pest 1".to_string(),
                time: 3,
                horizon: 3
            }),
            Problem::new(payload)
        );
    }

    #[test]
    fn resolution_restores_names_and_blanks_own_draws() {
        let problem = Problem::new(valid()).unwrap();
        let solution = Solution {
            actions: vec![
                Action {
                    subject: Subject(0),
                    matrix: Matrix(1),
                    time: 0,
                    samples: 5,
                    target: 5,
                    reuse: None,
                },
                Action {
                    subject: Subject(1),
                    matrix: Matrix(2),
                    time: 0,
                    samples: 5,
                    target: 7,
                    reuse: Some(Subject(0)),
                },
            ],
            fitness: (),
        };
        let record = problem.resolve(&solution);
        assert_eq!("Pest 1", record.actions[0].subject);
        assert_eq!("fruits", record.actions[0].matrix);
        assert_eq!("", record.actions[0].reuse);
        assert_eq!("Pest 1", record.actions[1].reuse);
        assert_eq!("shoots", record.actions[1].matrix);
    }
}
