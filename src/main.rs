use std::{fs, iter};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    commandline::{BackendOptions, InputOptions, Operation, Options},
    error::PositionalError,
    il::{
        optimiser::{eliminate_constants, eliminate_duplicates, Rewrite},
        TriadListing,
    },
    span::{Bytes, Span},
};

mod commandline;
mod error;
mod il;
mod listing;
mod parser;
mod span;

/// Translated when no statement is given on the command line.
const DEMONSTRATION: &str =
    "c:=(z+a-1)/2-(l+w+1)+('A'*'T')+'s'*'A'+1/2-(z+a-1)/21-(l+w+1)+('A'*'T');";

fn main() -> Result<()> {
    let options = Options::parse();

    stderrlog::new()
        .module(module_path!())
        .verbosity(options.verbose)
        .init()?;

    match &options.operation {
        Operation::Check { input } => check(input),
        Operation::Run { input, backend } => run(input, backend),
    }
}

fn check(input: &InputOptions) -> Result<()> {
    let source = read_input(input)?;

    if let Some(listing) = translate(&source)? {
        println!("Parsing succeeded ({} triads).", listing.len());
    }
    Ok(())
}

fn run(input: &InputOptions, backend: &BackendOptions) -> Result<()> {
    let source = read_input(input)?;

    let original = match translate(&source)? {
        Some(listing) => listing,
        None => return Ok(()),
    };
    print_listing("Original triads:", &original);
    println!();

    if !backend.optimise() {
        return Ok(());
    }

    // Both passes start from the original listing.
    let constants = eliminate_constants(&original, backend.dangling())?;
    print_rewrite("Constant-eliminated triads:", &constants);

    let duplicates = eliminate_duplicates(&original, backend.dangling())?;
    print_rewrite("Duplicate-eliminated triads:", &duplicates);

    Ok(())
}

fn read_input(input: &InputOptions) -> Result<String> {
    let source = match (input.file(), input.expression()) {
        (Some(file), _) => {
            fs::read_to_string(file).with_context(|| format!("Unable to read '{}'", file))?
        }
        (None, Some(expression)) => expression.to_owned(),
        (None, None) => DEMONSTRATION.to_owned(),
    };
    Ok(parser::strip_whitespace(&source))
}

/// Parses and verifies `source`. Syntax errors are reported here and yield [`None`];
/// a listing that breaks its own numbering is a bug and fails the run.
fn translate(source: &str) -> Result<Option<TriadListing>> {
    match parser::parse(source) {
        Ok(listing) => {
            il::verify(&listing).context("The parser produced an inconsistent listing")?;
            Ok(Some(listing))
        }
        Err(err) => {
            describe_error(&err, source);
            Ok(None)
        }
    }
}

fn print_listing(header: &str, listing: &TriadListing) {
    println!("{}", header);
    if listing.is_empty() {
        println!("(no triads)");
    } else {
        print!("{}", listing);
    }
}

fn print_rewrite(header: &str, rewrite: &Rewrite) {
    print_listing(header, &rewrite.listing);
    for anomaly in &rewrite.anomalies {
        println!("Anomaly: {}", anomaly);
    }
    println!();
}

fn describe_error(err: &impl PositionalError, source: &str) {
    fn pad_char(ch: char, times: usize) -> String {
        iter::repeat(ch).take(times).collect()
    }

    let range = err.range();
    let padding = Span::new(Bytes::new(0), range.start())
        .lookup(source)
        .chars()
        .count();
    let width = range.lookup(source).chars().count().max(1);

    println!("{}", source);
    println!("{}{}", pad_char(' ', padding), pad_char('^', width));
    println!("Syntax error: {}", err.describe());
}
