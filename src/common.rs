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

//! This module defines the most basic data types that are used throughout all
//! the code of our library (both at the abstraction and implementation levels).
//! These are also the types your client code is likely to work with.

// ----------------------------------------------------------------------------
// --- SUBJECT ----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// This type denotes a subject (an entity requiring sampling, e.g. a pest
/// species) from the problem at hand. Each subject is assumed to be identified
/// with an integer ranging from 0 until the number of requirements, in the
/// order in which the requirements were declared.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Subject(pub usize);
impl Subject {
    #[inline]
    /// This function returns the id (numeric value) of the subject.
    ///
    /// # Examples:
    /// ```
    /// # use sampo::Subject;
    /// assert_eq!(0, Subject(0).id());
    /// assert_eq!(1, Subject(1).id());
    /// ```
    pub fn id(self) -> usize {
        self.0
    }
}

// ----------------------------------------------------------------------------
// --- MATRIX -----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// This type denotes a sampling matrix (the medium a sample is drawn from,
/// e.g. *fruits* or *shoots*). Each matrix is assumed to be identified with an
/// integer ranging from 0 until the number of declared matrices.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Matrix(pub usize);
impl Matrix {
    #[inline]
    /// This function returns the id (numeric value) of the matrix.
    ///
    /// # Examples:
    /// ```
    /// # use sampo::Matrix;
    /// assert_eq!(0, Matrix(0).id());
    /// assert_eq!(1, Matrix(1).id());
    /// ```
    pub fn id(self) -> usize {
        self.0
    }
}

// ----------------------------------------------------------------------------
// --- REQUIREMENT ------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A sampling requirement: one subject demands a given number of samples of
/// one matrix, drawn during a restricted set of time slots. Requirements are
/// normalized at problem construction; afterwards the time list is strictly
/// increasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// The subject demanding the samples
    pub subject: Subject,
    /// The matrix the samples must be drawn from
    pub matrix: Matrix,
    /// The target number of samples (> 0)
    pub samples: usize,
    /// The admissible time slots, sorted in ascending order
    pub times: Vec<usize>,
}

// ----------------------------------------------------------------------------
// --- ACTION -----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// One scheduled sampling action: `samples` samples analysed for `subject`
/// at time slot `time`. When `reuse` designates another subject, the samples
/// are not physically drawn; they are re-analysed from that subject's own
/// draw at the same slot, and they do not count against the slot capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    /// The subject the samples are analysed for
    pub subject: Subject,
    /// The matrix of the subject's requirement
    pub matrix: Matrix,
    /// The time slot of the draw
    pub time: usize,
    /// The number of samples covered by this action
    pub samples: usize,
    /// The target of the underlying requirement (for reporting)
    pub target: usize,
    /// The subject whose own draw is re-analysed, or `None` for an own draw
    pub reuse: Option<Subject>,
}
impl Action {
    #[inline]
    /// True iff this action re-analyses another subject's draw instead of
    /// drawing its own samples.
    pub fn is_reuse(&self) -> bool {
        self.reuse.is_some()
    }
}

// ----------------------------------------------------------------------------
// --- SOLUTION ---------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A complete schedule satisfying every requirement of a problem, together
/// with its fitness. The action list is the *decomposed* schedule: reuses are
/// spelled out as their own entries, so that renderers see per-subject
/// per-slot draws directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution<F> {
    /// The actions making up the schedule
    pub actions: Vec<Action>,
    /// The fitness of the schedule
    pub fitness: F,
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
