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

//! Printer for outputting converted sequences as tab separated plain text.
//!
//! Can be used to convert any iterator over `(identifier, CigarString)`
//! records to their plain text representation.
//!
//! Returns 1 line at a time using next().
//!
//! ## Usage
//!
//! ```rust
//! use stocig::cigar::cigar_from_alignment;
//! use stocig::printer::Printer;
//!
//! let data = vec![
//!     ("seq1".to_string(), cigar_from_alignment(b"acgtACGTacgt")),
//!     ("seq2".to_string(), cigar_from_alignment(b"----ACGT----")),
//! ];
//!
//! let mut iter = data.into_iter();
//! let printer = Printer::new(&mut iter);
//!
//! let mut output: Vec<u8> = Vec::new();
//! for mut line in printer {
//!     output.append(&mut line);
//! }
//!
//! let mut expected: Vec<u8> = Vec::new();
//! expected.append(&mut b"seq1\t3S4M3S\n".to_vec());
//! expected.append(&mut b"seq2\t4D4M4D\n".to_vec());
//!
//! assert_eq!(output, expected);
//! ```
//!

use std::io::Write;

use crate::cigar::CigarString;

type E = Box<dyn std::error::Error>;

/// Format a single converted sequence
///
/// Writes bytes containing the identifier and the rendered CIGAR string,
/// separated by a tab, to `conn`.
///
pub fn format_cigar_line<W: Write>(
    name: &str,
    cigar: &CigarString,
    conn: &mut W,
) -> Result<(), E> {
    let formatted = format!("{}\t{}\n", name, cigar);
    conn.write_all(formatted.as_bytes())?;
    Ok(())
}

/// Format many converted sequences
///
/// Writes one line per record in `records` to `conn` in input order.
///
pub fn format_cigar_file<W: Write>(
    records: &[(String, CigarString)],
    conn: &mut W,
) -> Result<(), E> {
    for (name, cigar) in records {
        format_cigar_line(name, cigar, conn)?;
    }
    conn.flush()?;
    Ok(())
}

pub struct Printer<'a, I: Iterator> where I: Iterator<Item=(String, CigarString)> {
    records: &'a mut I,
}

impl<'a, I: Iterator> Printer<'a, I> where I: Iterator<Item=(String, CigarString)> {
    pub fn new(
        records: &'a mut I,
    ) -> Self {
        Printer { records }
    }
}

impl<I: Iterator> Iterator for Printer<'_, I> where I: Iterator<Item=(String, CigarString)> {
    type Item = Vec<u8>;

    fn next(
        &mut self,
    ) -> Option<Vec<u8>> {
        let (name, cigar) = self.records.next()?;
        let mut out: Vec<u8> = Vec::new();
        format_cigar_line(&name, &cigar, &mut out).ok()?;
        Some(out)
    }
}
