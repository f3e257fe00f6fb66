// stocig: Convert Stockholm multiple sequence alignments to CIGAR strings.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//

//! Run-length encoded CIGAR strings built from aligned symbol sequences.
//!
//! [CigarString] stores the alignment operations as maximally compressed
//! `(count, op)` runs. Operations are appended one at a time with
//! [append](CigarString::append) or in bulk with [join](CigarString::join);
//! the canonical text form is produced through [std::fmt::Display].
//!
//! [cigar_from_alignment] converts one aligned sequence, as stored in an
//! [AlignmentMap](crate::AlignmentMap), into its CIGAR string.
//!
//! ## Usage
//!
//! ```rust
//! use stocig::cigar::cigar_from_alignment;
//!
//! // Aligned sequence from hmmalign: lower case symbols are insertions,
//! // upper case symbols are matches, '-' marks a deletion.
//! let cigar = cigar_from_alignment(b"ggcATT-GCAatc");
//!
//! // Insertions at either end of the alignment are reported as soft clips.
//! assert_eq!(cigar.to_string(), "3S3M1D3M3S");
//! assert_eq!(cigar.len(), 13);
//! ```
//!

/// One CIGAR alignment operation.
///
/// Only the four operations that occur in profile HMM alignments are
/// supported. `Match` and `Deletion` consume a profile column; `Insertion`
/// and `SoftClip` consume a sequence residue only.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CigarOp {
    Match,
    Insertion,
    SoftClip,
    Deletion,
}

impl CigarOp {
    /// Character used for this operation in the rendered CIGAR string.
    pub fn symbol(&self) -> char {
        match self {
            CigarOp::Match => 'M',
            CigarOp::Insertion => 'I',
            CigarOp::SoftClip => 'S',
            CigarOp::Deletion => 'D',
        }
    }

    /// Classify one aligned symbol.
    ///
    /// `marginal` is true while no profile column has been consumed yet in
    /// the current sequence; insertions in that state are boundary artifacts
    /// and classify as [SoftClip](CigarOp::SoftClip) instead of
    /// [Insertion](CigarOp::Insertion).
    ///
    /// Returns the operation and the new marginal state, or None for symbols
    /// that do not correspond to an alignment operation (eg. the `.` padding
    /// written in insert columns).
    pub fn classify(symbol: u8, marginal: bool) -> Option<(CigarOp, bool)> {
        if symbol.is_ascii_lowercase() || symbol == b'*' {
            let op = if marginal { CigarOp::SoftClip } else { CigarOp::Insertion };
            Some((op, marginal))
        } else if symbol.is_ascii_uppercase() {
            Some((CigarOp::Match, false))
        } else if symbol == b'-' {
            Some((CigarOp::Deletion, false))
        } else {
            None
        }
    }
}

impl std::fmt::Display for CigarOp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A run-length encoded CIGAR string.
///
/// Adjacent identical operations are always collapsed into a single run, so
/// rendering never produces output like `1M1M`. The sum of the run counts
/// equals the number of operations appended so far.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CigarString {
    runs: Vec<(u32, CigarOp)>,
    len: usize,
}

impl CigarString {
    pub fn new() -> Self {
        CigarString::default()
    }

    /// Append a single operation, extending the last run if it matches.
    pub fn append(&mut self, op: CigarOp) -> &mut Self {
        match self.runs.last_mut() {
            Some(last) if last.1 == op => last.0 += 1,
            _ => self.runs.push((1, op)),
        }
        self.len += 1;
        self
    }

    /// Total number of operations, ie. the sum of the run counts.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reset to the empty state.
    pub fn clear(&mut self) {
        self.runs.clear();
        self.len = 0;
    }

    /// The `(count, op)` runs in order.
    pub fn runs(&self) -> &[(u32, CigarOp)] {
        &self.runs
    }

    /// Append all runs from `other`, merging the boundary runs when they
    /// hold the same operation.
    pub fn join(&mut self, other: &CigarString) -> &mut Self {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            *self = other.clone();
            return self;
        }

        self.len += other.len;

        let mut runs = other.runs.iter();
        if let (Some(last), Some(&(count, op))) = (self.runs.last_mut(), other.runs.first()) {
            if last.1 == op {
                last.0 += count;
                runs.next();
            }
        }
        self.runs.extend(runs.copied());

        self
    }
}

impl std::ops::Add<&CigarString> for &CigarString {
    type Output = CigarString;

    /// Combine two CIGAR strings without modifying either operand.
    fn add(self, rhs: &CigarString) -> CigarString {
        let mut combined = self.clone();
        combined.join(rhs);
        combined
    }
}

impl std::fmt::Display for CigarString {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (count, op) in &self.runs {
            write!(f, "{}{}", count, op)?;
        }
        Ok(())
    }
}

/// Build the CIGAR string for one aligned sequence.
///
/// Walks the aligned symbols left to right and classifies each one with
/// [CigarOp::classify], starting in the marginal state. Symbols that do not
/// classify are skipped. A trailing insertion run is rewritten to a soft
/// clip to apply the boundary policy at the right edge as well.
///
/// An empty input produces an empty CIGAR string.
pub fn cigar_from_alignment(alnseq: &[u8]) -> CigarString {
    let mut cigar = CigarString::new();
    let mut marginal = true;

    for symbol in alnseq {
        if let Some((op, state)) = CigarOp::classify(*symbol, marginal) {
            cigar.append(op);
            marginal = state;
        }
    }

    // Trailing insertions are boundary clips, same as leading ones.
    if let Some(last) = cigar.runs.last_mut() {
        if last.1 == CigarOp::Insertion {
            last.1 = CigarOp::SoftClip;
        }
    }

    cigar
}

/// Reconstruct an aligned sequence from its CIGAR string and the unaligned
/// residues.
pub fn alignment_from_cigar(_cigar: &CigarString, _rawseq: &[u8]) -> Vec<u8> {
    todo!("Implement alignment reconstruction.")
}
