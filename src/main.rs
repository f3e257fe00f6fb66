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
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use clap::Parser;
use flate2::read::MultiGzDecoder;
use log::info;

mod cli;

/// Initializes the logger with verbosity given in `log_max_level`.
fn init_log(log_max_level: usize) {
    stderrlog::new()
    .module(module_path!())
    .quiet(false)
    .verbosity(log_max_level)
    .timestamp(stderrlog::Timestamp::Off)
    .init()
    .unwrap();
}

/// Opens `path` for reading, decompressing gzipped files transparently.
fn open_input(path: &Path) -> Box<dyn Read> {
    let f = File::open(path).unwrap();
    if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(MultiGzDecoder::new(BufReader::new(f)))
    } else {
        Box::new(BufReader::new(f))
    }
}

fn main() {
    let cli = cli::Cli::parse();

    // Subcommands:
    match &cli.command {
        // Convert
        Some(cli::Commands::Convert {
            input_files,
            out_file,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 });

            let mut conn_out: Box<dyn Write> = if let Some(path) = out_file {
                Box::new(BufWriter::new(File::create(path).unwrap()))
            } else {
                Box::new(BufWriter::new(std::io::stdout()))
            };

            if input_files.is_empty() {
                let mut conn_in = std::io::stdin();
                stocig::convert_from_read_to_write(&mut conn_in, &mut conn_out).unwrap();
            } else {
                input_files.iter().for_each(|file| {
                    let mut conn_in = open_input(file);
                    let mut records = stocig::convert_from_read(&mut conn_in).unwrap().into_iter();
                    info!("Converted {} sequences from {}", records.len(), file.display());

                    let writer = stocig::printer::Printer::new(&mut records);
                    for line in writer {
                        conn_out.write_all(&line).unwrap();
                    }
                });
                conn_out.flush().unwrap();
            }
        },
        None => {
            let mut cmd = <cli::Cli as clap::CommandFactory>::command();
            cmd.print_help().unwrap();
        },
    }
}
