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

//! stocig is a library and a command-line client for converting multiple
//! sequence alignments in the Stockholm format, as written by profile hidden
//! Markov model aligners like [HMMER](http://hmmer.org/) hmmalign, into one
//! CIGAR string per aligned sequence.
//!
//! The CIGAR strings record the column layout of the alignment compactly:
//! the original alignment columns of each sequence can be reconstructed from
//! the unaligned sequence and its CIGAR string. The conversion classifies
//! each aligned symbol as follows:
//!
//!   - Upper case symbols are matches against a profile column (`M`).
//!   - Lower case symbols and `*` are insertions (`I`), except at the
//!     alignment boundaries where they are reported as soft clips (`S`).
//!   - `-` is a deletion from the profile (`D`).
//!
//! ## Usage
//!
//! ### Command line
//!
//! `stocig convert` reads Stockholm data from files or from stdin and writes
//! one `<identifier>\t<cigar>` line per sequence:
//!
//! ```text
//! hmmalign profile.hmm seqs.fasta | stocig convert > seqs.cigar.tsv
//! ```
//!
//! ### Rust API
//!
//! The API provides functions for operating on structs that implement
//! [Read] and/or [Write]. These are meant for use cases where an entire
//! alignment should be converted.
//!
//! For use cases requiring access to the individual steps, the following are
//! provided:
//!
//!   - [read_stockholm](parser::read_stockholm): parses a [Read] containing Stockholm data into an [AlignmentMap].
//!   - [cigar_from_alignment](cigar::cigar_from_alignment): converts one aligned sequence into a [CigarString](cigar::CigarString).
//!   - [Printer](printer::Printer): takes an iterator over converted records and formats them into plain text lines.
//!

use std::io::Read;
use std::io::Write;

use indexmap::IndexMap;

use cigar::CigarString;
use cigar::cigar_from_alignment;

pub mod cigar;
pub mod parser;
pub mod printer;

type E = Box<dyn std::error::Error>;

/// Aligned sequences keyed by identifier, in input order.
pub type AlignmentMap = IndexMap<String, Vec<u8>>;

/// Convert a Stockholm alignment from [Read] to CIGAR strings in memory.
///
/// The whole alignment is parsed before any sequence is converted; a
/// malformed input returns an error without producing any records.
///
/// ## Usage
/// ```rust
/// use stocig::convert_from_read;
/// use std::io::Cursor;
///
/// let mut input_bytes: Vec<u8> = Vec::new();
/// input_bytes.append(&mut b"# STOCKHOLM 1.0\n".to_vec());
/// input_bytes.append(&mut b"seq1  ACGT\n".to_vec());
/// input_bytes.append(&mut b"seq2  acGT\n".to_vec());
/// input_bytes.append(&mut b"//\n".to_vec());
/// let mut input: Cursor<Vec<u8>> = Cursor::new(input_bytes);
///
/// let records = convert_from_read(&mut input).unwrap();
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].0, "seq1");
/// assert_eq!(records[0].1.to_string(), "4M");
/// assert_eq!(records[1].0, "seq2");
/// assert_eq!(records[1].1.to_string(), "2S2M");
/// ```
pub fn convert_from_read<R: Read>(
    conn_in: &mut R,
) -> Result<Vec<(String, CigarString)>, E> {
    let alignment = parser::read_stockholm(conn_in)?;

    let records = alignment.into_iter().map(|(ident, alnseq)| {
        (ident, cigar_from_alignment(&alnseq))
    }).collect::<Vec<(String, CigarString)>>();

    Ok(records)
}

/// Convert a Stockholm alignment from [Read] to plain text lines in [Write].
///
/// Writes one `<identifier>\t<cigar>` line per aligned sequence, in the
/// order the identifiers appear in the input.
///
/// ## Usage
/// ```rust
/// use stocig::convert_from_read_to_write;
/// use std::io::Cursor;
///
/// // Have this alignment:
/// //   seq1  ggcATT-GCAatc
/// //   seq2  ---ATTTGCA---
/// let mut input_bytes: Vec<u8> = Vec::new();
/// input_bytes.append(&mut b"# STOCKHOLM 1.0\n".to_vec());
/// input_bytes.append(&mut b"seq1  ggcATT-GCAatc\n".to_vec());
/// input_bytes.append(&mut b"seq2  ---ATTTGCA---\n".to_vec());
/// input_bytes.append(&mut b"//\n".to_vec());
/// let mut input: Cursor<Vec<u8>> = Cursor::new(input_bytes);
///
/// let mut output: Cursor<Vec<u8>> = Cursor::new(Vec::new());
/// convert_from_read_to_write(&mut input, &mut output).unwrap();
///
/// // Expect to get this output:
/// let mut expected: Vec<u8> = Vec::new();
/// expected.append(&mut b"seq1\t3S3M1D3M3S\n".to_vec());
/// expected.append(&mut b"seq2\t3D7M3D\n".to_vec());
///
/// assert_eq!(*output.get_ref(), expected);
/// ```
pub fn convert_from_read_to_write<R: Read, W: Write>(
    conn_in: &mut R,
    conn_out: &mut W,
) -> Result<(), E> {
    let mut records = convert_from_read(conn_in)?.into_iter();

    let writer = printer::Printer::new(&mut records);
    for line in writer {
        conn_out.write_all(&line)?;
    }
    conn_out.flush()?;

    Ok(())
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn convert_from_read() {
        use std::io::Cursor;
        use super::convert_from_read;

        let mut data: Vec<u8> = b"# STOCKHOLM 1.0\n".to_vec();
        data.append(&mut b"seq1  acgtACGTacgt\n".to_vec());
        data.append(&mut b"seq2  ACGTacgtACGT\n".to_vec());
        data.append(&mut b"seq3  ----\n".to_vec());
        data.append(&mut b"//\n".to_vec());

        let mut input: Cursor<Vec<u8>> = Cursor::new(data);
        let got = convert_from_read(&mut input).unwrap();

        let expected = vec![
            ("seq1".to_string(), "3S4M3S".to_string()),
            ("seq2".to_string(), "4M4I4M".to_string()),
            ("seq3".to_string(), "4D".to_string()),
        ];
        let got_rendered = got.iter().map(|(ident, cigar)| {
            (ident.clone(), cigar.to_string())
        }).collect::<Vec<(String, String)>>();

        assert_eq!(got_rendered, expected);
    }

    #[test]
    fn convert_from_read_to_write() {
        use std::io::Cursor;
        use super::convert_from_read_to_write;

        let data: Vec<u8> = b"# STOCKHOLM 1.0\nseq1  ACGT\n//\n".to_vec();
        let expected: Vec<u8> = b"seq1\t4M\n".to_vec();

        let mut input: Cursor<Vec<u8>> = Cursor::new(data);
        let mut got: Cursor<Vec<u8>> = Cursor::new(Vec::new());
        convert_from_read_to_write(&mut input, &mut got).unwrap();

        assert_eq!(*got.get_ref(), expected);
    }

    #[test]
    fn convert_from_read_to_write_wrapped_alignment() {
        use std::io::Cursor;
        use super::convert_from_read_to_write;

        // Same sequences split over two blocks.
        let mut data: Vec<u8> = b"# STOCKHOLM 1.0\n\n".to_vec();
        data.append(&mut b"seq1  acgtACGT\nseq2  ACGTacgt\n\n".to_vec());
        data.append(&mut b"seq1  acgt\nseq2  ACGT\n//\n".to_vec());

        let mut expected: Vec<u8> = b"seq1\t3S4M3S\n".to_vec();
        expected.append(&mut b"seq2\t4M4I4M\n".to_vec());

        let mut input: Cursor<Vec<u8>> = Cursor::new(data);
        let mut got: Cursor<Vec<u8>> = Cursor::new(Vec::new());
        convert_from_read_to_write(&mut input, &mut got).unwrap();

        assert_eq!(*got.get_ref(), expected);
    }

    #[test]
    fn convert_from_read_propagates_parser_errors() {
        use std::io::Cursor;
        use crate::parser::MissingTerminator;
        use super::convert_from_read;

        let data: Vec<u8> = b"# STOCKHOLM 1.0\nseq1  ACGT\n".to_vec();

        let mut input: Cursor<Vec<u8>> = Cursor::new(data);
        let err = convert_from_read(&mut input).unwrap_err();

        assert!(err.downcast_ref::<MissingTerminator>().is_some());
    }
}
