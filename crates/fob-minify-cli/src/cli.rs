//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

/// fob-minify - concatenate and minify JavaScript files
#[derive(Parser, Debug)]
#[command(
    name = "fob-minify",
    version,
    about = "Concatenate and minify JavaScript files",
    long_about = "Merges every input into one minified file, optionally wrapped as a\n\
                  CommonJS-style module or in a closure, with an optional source map.\n\
                  Directories are searched for .js, .mjs and .cjs files."
)]
pub struct Cli {
    /// Files or directories to minify, in output order
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Output filename, relative to the output directory
    ///
    /// Defaults to the first input's path relative to its base.
    #[arg(short = 'o', long = "output", value_name = "FILENAME")]
    pub output: Option<String>,

    /// Output directory [default: dist]
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Base directory inputs are made relative to
    ///
    /// Defaults to the parent of each input file, or the directory itself
    /// for directory inputs.
    #[arg(long, value_name = "DIR")]
    pub base: Option<PathBuf>,

    /// Emit a source map, named FILE or `<output>.map`
    #[arg(
        long = "source-map",
        value_name = "FILE",
        num_args = 0..=1,
        require_equals = true
    )]
    pub source_map: Option<Option<String>>,

    /// Root for source paths recorded in the map
    #[arg(long, value_name = "DIR")]
    pub base_path: Option<PathBuf>,

    /// Skip the compression pass
    #[arg(long)]
    pub no_compress: bool,

    /// Keep original identifier names
    #[arg(long)]
    pub no_mangle: bool,

    /// Pretty-print the output
    #[arg(long)]
    pub beautify: bool,

    /// Wrap the output as a module published on the global object under NAME
    #[arg(long, value_name = "NAME")]
    pub wrap: Option<String>,

    /// Export every top-level binding when wrapping
    #[arg(long, requires = "wrap")]
    pub export_all: bool,

    /// Wrap the output in a closure; each SPEC is `arg` or `arg:param`
    ///
    /// Examples:
    ///   --enclose
    ///   --enclose=window:w,document:d
    #[arg(
        long,
        value_name = "SPEC",
        num_args = 0..=1,
        require_equals = true,
        value_delimiter = ','
    )]
    pub enclose: Option<Vec<String>>,

    /// Text placed before the output, on its own line
    #[arg(long, value_name = "TEXT")]
    pub preamble: Option<String>,

    /// Print the minified code to stdout instead of writing it
    #[arg(long)]
    pub stdout: bool,

    /// Configuration file [default: fob-minify.json or fob-minify.toml]
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}
