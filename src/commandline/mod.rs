use clap::{Args, Parser, Subcommand};

use crate::il::optimiser::DanglingPolicy;

#[derive(Debug, Parser)]
#[clap(about = "Translates an assignment statement into triads and optimises them")]
pub struct Options {
    #[clap(subcommand)]
    pub operation: Operation,
    #[clap(short, long, default_value_t = 1)]
    pub verbose: usize,
}

#[derive(Debug, Subcommand)]
pub enum Operation {
    /// Check a statement for syntax errors
    Check {
        #[clap(flatten)]
        input: InputOptions,
    },
    /// Translate a statement and print its triads
    Run {
        #[clap(flatten)]
        input: InputOptions,
        #[clap(flatten)]
        backend: BackendOptions,
    },
}

#[derive(Debug, Args)]
pub struct InputOptions {
    /// The statement to translate. Defaults to a built-in demonstration statement
    expression: Option<String>,
    #[clap(short, long, conflicts_with = "expression")]
    /// Read the statement from a file instead
    file: Option<String>,
}

impl InputOptions {
    /// The file to read the statement from, if one was given.
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref()
    }
}

#[derive(Debug, Args)]
pub struct BackendOptions {
    #[clap(short, long)]
    /// Do not optimise the generated triads
    no_optimise: bool,
    #[clap(short, long, value_enum, default_value = "keep")]
    /// What to do with triads that read a temporary whose producer was removed
    dangling: DanglingPolicy,
}

impl BackendOptions {
    pub fn optimise(&self) -> bool {
        !self.no_optimise
    }

    pub fn dangling(&self) -> DanglingPolicy {
        self.dangling
    }
}
