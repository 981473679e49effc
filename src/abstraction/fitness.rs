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

//! This module defines the fitness contracts: the two traits one must
//! implement in order to plug a custom objective into the solver.

use std::cmp::Ordering;

use crate::Action;

/// This trait maps a (partial or complete) schedule onto a fitness value.
/// The mapping must be *monotone*: appending actions to a schedule can never
/// make its fitness compare better. This is what makes the solver's
/// evaluate-and-bound step admissible, so it is a hard requirement, not a
/// performance hint.
///
/// The method takes `&mut self` so that an implementation can keep reusable
/// scratch storage across calls; such storage must be cleared at entry.
pub trait FitnessEvaluator {
    /// The type of the fitness values produced by this evaluator.
    type Fitness;

    /// Computes the fitness of the given action list.
    fn evaluate(&mut self, actions: &[Action]) -> Self::Fitness;
}

/// This trait ranks two fitness values against one another. `Less` means the
/// first value is better (this library minimizes). A comparator is either a
/// total order (scalar regime: the solver keeps a single incumbent and all
/// solutions tied with it) or a dominance relation (Pareto regime: the solver
/// keeps the whole frontier of non-dominated solutions); `is_pareto`
/// advertises which of the two it is.
///
/// In the Pareto regime, `Equal` stands for "incomparable as well as equal":
/// neither value dominates the other.
///
/// The default fitness value doubles as the "no incumbent yet" sentinel: any
/// non-default value must compare `Less` against it. See the concrete
/// implementations for what this looks like in practice.
pub trait FitnessComparator {
    /// The type of the fitness values ranked by this comparator.
    type Fitness;

    /// Ranks `a` against `b`: `Less` when `a` is the better (or dominating)
    /// value, `Greater` when `b` is, `Equal` otherwise.
    fn compare(&self, a: &Self::Fitness, b: &Self::Fitness) -> Ordering;

    /// True iff this comparator is a dominance relation over which the
    /// solver must collect the whole Pareto frontier.
    fn is_pareto(&self) -> bool;
}
