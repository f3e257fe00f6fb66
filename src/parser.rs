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
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;

use bstr::ByteSlice;
use indexmap::IndexMap;

use crate::AlignmentMap;

type E = Box<dyn std::error::Error>;

const STOCKHOLM_HEADER: &[u8] = b"# STOCKHOLM 1.0";

#[derive(Debug, Clone)]
pub struct EmptyInput;

impl std::fmt::Display for EmptyInput {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Input is empty")
    }
}

impl std::error::Error for EmptyInput {}

#[derive(Debug, Clone)]
pub struct InvalidHeader;

impl std::fmt::Display for InvalidHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "File does not comply with the Stockholm format specs")
    }
}

impl std::error::Error for InvalidHeader {}

#[derive(Debug, Clone)]
pub struct MissingTerminator;

impl std::fmt::Display for MissingTerminator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "End of alignment could not be found")
    }
}

impl std::error::Error for MissingTerminator {}

#[derive(Debug, Clone)]
pub struct InvalidRecord;

impl std::fmt::Display for InvalidRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Sequence line does not contain aligned symbols")
    }
}

impl std::error::Error for InvalidRecord {}

/// Parse a Stockholm multiple sequence alignment
///
/// Reads one alignment from `conn`: a `# STOCKHOLM 1.0` header line, any
/// number of `<identifier> <aligned symbols>` lines, and the `//` terminator.
/// Empty lines and `#` annotation lines are skipped. Sequences wrapped over
/// several blocks are concatenated in file order.
///
/// Returns the aligned sequences keyed by identifier, in the order the
/// identifiers first appear in the input.
///
pub fn read_stockholm<R: Read>(
    conn: &mut R,
) -> Result<AlignmentMap, E> {
    let mut reader = BufReader::new(conn);
    let mut line: Vec<u8> = Vec::new();

    if reader.read_until(b'\n', &mut line)? == 0 {
        return Err(Box::new(EmptyInput {}));
    }
    if line.trim_end() != STOCKHOLM_HEADER {
        return Err(Box::new(InvalidHeader {}));
    }

    let mut data: AlignmentMap = IndexMap::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Err(Box::new(MissingTerminator {}));
        }
        let trimmed = line.trim_end();

        if trimmed.is_empty() {
            continue;
        }
        if trimmed == b"//" {
            return Ok(data);
        }
        if trimmed.starts_with(b"#") {
            continue;
        }

        let mut fields = trimmed.fields();
        let ident = fields.next().ok_or(InvalidRecord {})?;
        let seq = fields.next().ok_or(InvalidRecord {})?;

        data.entry(ident.to_str()?.to_string())
            .or_default()
            .extend_from_slice(seq);
    }
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn read_stockholm_minimal() {
        use std::io::Cursor;
        use indexmap::IndexMap;
        use super::read_stockholm;

        let data: Vec<u8> = b"# STOCKHOLM 1.0\nseq1  ACGT\n//\n".to_vec();
        let expected = IndexMap::from([("seq1".to_string(), b"ACGT".to_vec())]);

        let mut input: Cursor<Vec<u8>> = Cursor::new(data);
        let got = read_stockholm(&mut input).unwrap();

        assert_eq!(got, expected);
    }

    #[test]
    fn read_stockholm_interleaved_blocks() {
        use std::io::Cursor;
        use super::read_stockholm;

        let mut data: Vec<u8> = b"# STOCKHOLM 1.0\n\n".to_vec();
        data.append(&mut b"seq1  acgACG\nseq2  ---ACG\n\n".to_vec());
        data.append(&mut b"seq1  TCA\nseq2  TCAggg\n//\n".to_vec());

        let mut input: Cursor<Vec<u8>> = Cursor::new(data);
        let got = read_stockholm(&mut input).unwrap();

        assert_eq!(got["seq1"], b"acgACGTCA".to_vec());
        assert_eq!(got["seq2"], b"---ACGTCAggg".to_vec());
    }

    #[test]
    fn read_stockholm_keeps_input_order() {
        use std::io::Cursor;
        use super::read_stockholm;

        let mut data: Vec<u8> = b"# STOCKHOLM 1.0\n".to_vec();
        data.append(&mut b"zulu   ACGT\nalpha  AC-T\nmike   A--T\n//\n".to_vec());

        let mut input: Cursor<Vec<u8>> = Cursor::new(data);
        let got = read_stockholm(&mut input).unwrap();

        let order: Vec<&String> = got.keys().collect();

        assert_eq!(order, vec!["zulu", "alpha", "mike"]);
    }

    #[test]
    fn read_stockholm_skips_annotations() {
        use std::io::Cursor;
        use super::read_stockholm;

        let mut data: Vec<u8> = b"# STOCKHOLM 1.0\n".to_vec();
        data.append(&mut b"#=GF ID test\n".to_vec());
        data.append(&mut b"#=GS seq1 AC A0A000\n".to_vec());
        data.append(&mut b"seq1  ACGT\n".to_vec());
        data.append(&mut b"#=GR seq1 PP 9999\n".to_vec());
        data.append(&mut b"#=GC SS_cons ....\n".to_vec());
        data.append(&mut b"//\n".to_vec());

        let mut input: Cursor<Vec<u8>> = Cursor::new(data);
        let got = read_stockholm(&mut input).unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got["seq1"], b"ACGT".to_vec());
    }

    #[test]
    fn read_stockholm_ignores_data_after_terminator() {
        use std::io::Cursor;
        use super::read_stockholm;

        let data: Vec<u8> = b"# STOCKHOLM 1.0\nseq1  ACGT\n//\nseq2  TTTT\n".to_vec();

        let mut input: Cursor<Vec<u8>> = Cursor::new(data);
        let got = read_stockholm(&mut input).unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got["seq1"], b"ACGT".to_vec());
    }

    #[test]
    fn read_stockholm_empty_input() {
        use std::io::Cursor;
        use super::EmptyInput;
        use super::read_stockholm;

        let mut input: Cursor<Vec<u8>> = Cursor::new(Vec::new());
        let err = read_stockholm(&mut input).unwrap_err();

        assert!(err.downcast_ref::<EmptyInput>().is_some());
    }

    #[test]
    fn read_stockholm_rejects_wrong_header() {
        use std::io::Cursor;
        use super::InvalidHeader;
        use super::read_stockholm;

        let data: Vec<u8> = b"CLUSTAL W (1.82)\nseq1  ACGT\n//\n".to_vec();

        let mut input: Cursor<Vec<u8>> = Cursor::new(data);
        let err = read_stockholm(&mut input).unwrap_err();

        assert!(err.downcast_ref::<InvalidHeader>().is_some());
    }

    #[test]
    fn read_stockholm_requires_terminator() {
        use std::io::Cursor;
        use super::MissingTerminator;
        use super::read_stockholm;

        let data: Vec<u8> = b"# STOCKHOLM 1.0\nseq1  ACGT\n".to_vec();

        let mut input: Cursor<Vec<u8>> = Cursor::new(data);
        let err = read_stockholm(&mut input).unwrap_err();

        assert!(err.downcast_ref::<MissingTerminator>().is_some());
    }

    #[test]
    fn read_stockholm_rejects_identifier_without_sequence() {
        use std::io::Cursor;
        use super::InvalidRecord;
        use super::read_stockholm;

        let data: Vec<u8> = b"# STOCKHOLM 1.0\nseq1\n//\n".to_vec();

        let mut input: Cursor<Vec<u8>> = Cursor::new(data);
        let err = read_stockholm(&mut input).unwrap_err();

        assert!(err.downcast_ref::<InvalidRecord>().is_some());
    }
}
