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

//! This module provides the trips-and-samples fitness: the pair of objectives
//! every schedule is valued by, its evaluator, and the two comparators
//! selecting between the scalar and the Pareto solving regimes.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::{Action, FitnessComparator, FitnessEvaluator};

/// The fitness of a schedule: the number of distinct time slots that are
/// visited (*trips* -- a slot counts whether the actions there are own draws
/// or reuses) and the total number of samples physically drawn (*samples* --
/// reuses are free).
///
/// The default value `(0, 0)` doubles as the "no incumbent yet" sentinel of
/// the comparators: both treat it as the worst possible incumbent, which is
/// what lets the solver accept its very first leaf unconditionally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TripsAndSamples {
    /// The number of distinct time slots visited by the schedule
    #[serde(rename = "Trips")]
    pub trips: usize,
    /// The number of samples physically drawn by the schedule
    #[serde(rename = "Samples")]
    pub samples: usize,
}
impl TripsAndSamples {
    #[inline]
    /// True iff this is the `(0, 0)` value standing for "no incumbent yet".
    pub fn is_empty(self) -> bool {
        self.trips == 0 && self.samples == 0
    }
}
impl fmt::Display for TripsAndSamples {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} trips, {} samples)", self.trips, self.samples)
    }
}

/// The evaluator producing `TripsAndSamples` values. It is a pure O(n)
/// function of the action list; the per-slot trip marks are kept in a
/// reusable buffer which is cleared at entry and resized on demand.
#[derive(Debug, Default)]
pub struct TripsAndSamplesEvaluator {
    /// One mark per time slot seen so far; reused across calls
    times: Vec<bool>,
}
impl FitnessEvaluator for TripsAndSamplesEvaluator {
    type Fitness = TripsAndSamples;

    fn evaluate(&mut self, actions: &[Action]) -> TripsAndSamples {
        self.times.iter_mut().for_each(|visited| *visited = false);

        let mut samples = 0;
        for action in actions {
            if self.times.len() <= action.time {
                self.times.resize(action.time + 1, false);
            }
            self.times[action.time] = true;
            if !action.is_reuse() {
                samples += action.samples;
            }
        }
        let trips = self.times.iter().filter(|visited| **visited).count();

        TripsAndSamples { trips, samples }
    }
}

/// The scalar comparator: a total order minimizing trips first, then samples.
/// The solver run with this comparator returns every solution tied on the
/// lexicographically smallest `(trips, samples)` pair.
#[derive(Debug, Default, Clone, Copy)]
pub struct TripsThenSamples;
impl FitnessComparator for TripsThenSamples {
    type Fitness = TripsAndSamples;

    fn compare(&self, a: &TripsAndSamples, b: &TripsAndSamples) -> Ordering {
        if b.is_empty() && !a.is_empty() {
            return Ordering::Less;
        }
        (a.trips, a.samples).cmp(&(b.trips, b.samples))
    }

    fn is_pareto(&self) -> bool {
        false
    }
}

/// The Pareto comparator: a dominance relation over `(trips, samples)`. A
/// value dominates another when it is at least as good on both axes and
/// strictly better on one; values trading trips against samples are
/// incomparable (`Equal`). The solver run with this comparator returns the
/// whole frontier of non-dominated solutions, deduplicated by fitness.
#[derive(Debug, Default, Clone, Copy)]
pub struct TripsSamplesPareto;
impl FitnessComparator for TripsSamplesPareto {
    type Fitness = TripsAndSamples;

    fn compare(&self, a: &TripsAndSamples, b: &TripsAndSamples) -> Ordering {
        if b.is_empty() && !a.is_empty() {
            return Ordering::Less;
        }
        if (a.trips < b.trips && a.samples <= b.samples)
            || (a.trips <= b.trips && a.samples < b.samples)
        {
            Ordering::Less
        } else if (b.trips < a.trips && b.samples <= a.samples)
            || (b.trips <= a.trips && b.samples < a.samples)
        {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    fn is_pareto(&self) -> bool {
        true
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
