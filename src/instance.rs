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

//! This module defines the wire format of the library: the JSON payload
//! describing a problem instance, and the named records a solved schedule is
//! projected onto before rendering. The PascalCase field names are
//! case-sensitive and part of the format contract.

use serde::{Deserialize, Serialize};

/// The payload describing a complete problem instance. The length of the
/// capacity vector implicitly defines the time horizon: time slots are the
/// indices `0..Capacity.len()`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProblemInstance {
    /// The sampling matrices, together with their reuse declarations
    #[serde(rename = "Matrices")]
    pub matrices: Vec<MatrixDecl>,
    /// Per-slot upper bound on the own samples drawn at that slot
    #[serde(rename = "Capacity")]
    pub capacity: Vec<usize>,
    /// The sampling requirements, one per subject
    #[serde(rename = "Requirements")]
    pub requirements: Vec<RequirementDecl>,
}

/// The declaration of one sampling matrix. The reuse relation is directed:
/// listing matrix `B` under `A.CanReuse` means a requirement of matrix `A`
/// may be satisfied by re-analysing a draw of matrix `B` at the same slot.
/// Every matrix can always stand in for itself; the diagonal needs not be
/// declared.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixDecl {
    /// The name of the matrix
    #[serde(rename = "Name")]
    pub name: String,
    /// The names of the matrices whose draws can satisfy this matrix
    #[serde(rename = "CanReuse", default)]
    pub can_reuse: Vec<String>,
}

/// The declaration of one sampling requirement.
#[derive(Debug, Clone, Deserialize)]
pub struct RequirementDecl {
    /// The subject demanding the samples (unique across requirements)
    #[serde(rename = "Subject")]
    pub subject: String,
    /// The matrix the samples must be drawn from
    #[serde(rename = "Matrix")]
    pub matrix: String,
    /// The target number of samples
    #[serde(rename = "Samples")]
    pub samples: usize,
    /// The admissible time slots (duplicates are an input error)
    #[serde(rename = "Times")]
    pub times: Vec<usize>,
}

/// One solution in external form: every identifier resolved back to its
/// declared name, ready to be rendered or serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolutionRecord<F> {
    /// The fitness of the schedule
    #[serde(rename = "Fitness")]
    pub fitness: F,
    /// The actions making up the schedule
    #[serde(rename = "Actions")]
    pub actions: Vec<ActionRecord>,
}

/// One action in external form. `reuse` holds the name of the subject whose
/// draw is re-analysed, or the empty string for an own draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRecord {
    /// The subject the samples are analysed for
    #[serde(rename = "Subject")]
    pub subject: String,
    /// The matrix of the subject's requirement
    #[serde(rename = "Matrix")]
    pub matrix: String,
    /// The reuse source, or `""` when the samples are drawn
    #[serde(rename = "Reuse")]
    pub reuse: String,
    /// The time slot of the draw
    #[serde(rename = "Time")]
    pub time: usize,
    /// The number of samples covered by this action
    #[serde(rename = "Samples")]
    pub samples: usize,
    /// The target of the underlying requirement
    #[serde(rename = "TargetSamples")]
    pub target_samples: usize,
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
