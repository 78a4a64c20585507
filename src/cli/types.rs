use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::iofile::Newline;

/// Main CLI parser structure
#[derive(Parser)]
#[command(name = "mdtoc")]
#[command(about = "Add or update a table of contents in Markdown documents", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Files to rewrite in place; `-` reads stdin and writes stdout
    #[arg(value_name = "FILE", default_value = "-")]
    pub files: Vec<String>,

    /// Heading text for the generated TOC section
    #[arg(short = 't', long, value_name = "TEXT", default_value = "Contents")]
    pub heading_text: String,

    /// Heading level for the generated TOC section
    #[arg(short = 'l', long, value_name = "LEVEL", default_value_t = 1)]
    pub heading_level: usize,

    /// Omit headings at levels up to and including LEVEL from the TOC
    #[arg(short = 's', long, value_name = "LEVEL", default_value_t = 1)]
    pub skip_level: usize,

    /// Use a numbered list instead of bullets
    #[arg(short = 'n', long, default_value_t = false)]
    pub numbered: bool,

    /// Use `*` instead of `-` for bullet items
    #[arg(short = 'a', long, default_value_t = false)]
    pub alt_list_char: bool,

    /// Close the generated TOC heading with a trailing run of `#`
    #[arg(short = 'T', long, default_value_t = false)]
    pub add_trailing_heading_chars: bool,

    /// Comment appended to the closing TOC marker
    #[arg(short = 'c', long, value_name = "TEXT")]
    pub comment: Option<String>,

    /// Newline convention for output (byte-faithful passthrough if unset)
    #[arg(long, value_enum, value_name = "CONVENTION")]
    pub newline: Option<NewlineArg>,

    /// Enable verbose debugging
    #[arg(short = 'g', long, default_value_t = false)]
    pub debug: bool,
}

/// Subcommands for the CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a shell completion script on stdout
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// CLI spelling of an output newline convention
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum NewlineArg {
    Lf,
    Crlf,
    Cr,
}

impl From<NewlineArg> for Newline {
    fn from(arg: NewlineArg) -> Self {
        match arg {
            NewlineArg::Lf => Newline::Lf,
            NewlineArg::Crlf => Newline::CrLf,
            NewlineArg::Cr => Newline::Cr,
        }
    }
}
