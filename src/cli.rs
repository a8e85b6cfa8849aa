//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::stream::DEFAULT_MAX_SPEC_SIZE;

/// schelm - render a template stream into files
///
/// Reads the output of `helm template` (or any stream of `# Source:` documents)
/// and writes every document to the file it came from.
#[derive(Parser, Debug)]
#[command(
    name = "schelm",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Split a rendered template stream into its source files",
    long_about = "Reads a stream of YAML documents, each introduced by a \
                  `---\\n# Source: <path>` marker, and writes every document to \
                  <OUTPUT_DIR>/<path>. Documents sharing a path are appended to the same \
                  file, separated by `---`.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  helm template ./chart | schelm out/\n    \
                  helm template ./chart | schelm -f out/\n    \
                  schelm --input rendered.yaml --append out/"
)]
pub struct Cli {
    /// Directory the source files are written to
    #[arg(value_name = "OUTPUT_DIR", value_parser = parse_output_dir)]
    pub output_dir: PathBuf,

    /// Remove the output directory first if it already exists
    #[arg(long, short = 'f', conflicts_with = "append")]
    pub force: bool,

    /// Write into an existing output directory, appending to files already there
    #[arg(long, short = 'a')]
    pub append: bool,

    /// Read from a file instead of standard input ("-" is standard input)
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Largest single document accepted, in bytes (K/KiB/M/MiB suffixes allowed)
    #[arg(
        long,
        value_name = "SIZE",
        env = "SCHELM_MAX_SPEC_SIZE",
        default_value_t = DEFAULT_MAX_SPEC_SIZE,
        value_parser = parse_size
    )]
    pub max_spec_size: usize,

    /// Enable verbose output
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report warnings and errors
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Log line format
    #[arg(
        long,
        value_enum,
        value_name = "FORMAT",
        env = "SCHELM_LOG_FORMAT",
        default_value_t = LogFormatArg::Compact
    )]
    pub log_format: LogFormatArg,
}

/// Log formats selectable on the command line
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormatArg {
    #[default]
    Compact,
    Pretty,
    Json,
}

fn parse_output_dir(src: &str) -> Result<PathBuf, String> {
    if src.is_empty() {
        return Err("output directory argument cannot be empty".to_string());
    }
    Ok(PathBuf::from(src))
}

/// Parse a byte size such as `1048576`, `512K`, `64KiB` or `1MiB`
pub fn parse_size(src: &str) -> Result<usize, String> {
    let trimmed = src.trim();
    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, unit) = trimmed.split_at(split);

    let value: usize = digits
        .parse()
        .map_err(|_| format!("invalid size: {src}"))?;
    let multiplier: usize = match unit.trim().to_ascii_lowercase().as_str() {
        "" | "b" => 1,
        "k" | "kb" | "kib" => 1024,
        "m" | "mb" | "mib" => 1024 * 1024,
        _ => return Err(format!("unknown size unit in {src} (use K, KiB, M or MiB)")),
    };

    let size = value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("size too large: {src}"))?;
    if size == 0 {
        return Err("size must be greater than zero".to_string());
    }
    Ok(size)
}
