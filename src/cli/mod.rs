//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{FitCommand, OpCommand, PojoCommand, ValidateCommand};
use std::ffi::OsString;

/// Fit H2O munging assemblies and export them as POJOs
#[derive(Debug, Parser, Clone)]
#[command(name = "h2o-assembly")]
#[command(author = "h2o-assembly contributors")]
#[command(version)]
#[command(about = "Fit H2O munging assemblies and export them as POJOs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// H2O server URL (overrides H2O_URL and ~/.h2o-assembly.yaml)
    #[arg(short, long, global = true)]
    pub url: Option<String>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Fit an assembly on a frame
    Fit(FitCommand),

    /// Validate an assembly definition and show the steps payload
    Validate(ValidateCommand),

    /// Export an already fitted assembly as a POJO
    Pojo(PojoCommand),

    /// Apply an elementwise operator to two frames
    Op(OpCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
