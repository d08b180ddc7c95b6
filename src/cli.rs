//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//!
//! ```rust
//! use clap::Parser;
//! use kakaopack::cli::{Args, OutputFormat};
//!
//! let args = Args::parse_from(["kakaopack", "KakaoTalk_Chat.txt", "-f", "jsonl"]);
//! assert_eq!(args.format, Some(OutputFormat::Jsonl));
//! assert_eq!(args.output_path(), "normalized_chat.jsonl");
//!
//! // Without -f, the format follows the output extension
//! let args = Args::parse_from(["kakaopack", "KakaoTalk_Chat.txt", "-o", "chat.json"]);
//! assert_eq!(args.output_format(), kakaopack::format::OutputFormat::Json);
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Default output file stem used when `--output` is not given.
pub const DEFAULT_OUTPUT_STEM: &str = "normalized_chat";

/// Normalize KakaoTalk chat exports (iOS, Android, Windows)
/// into Date/User/Message records.
#[derive(Parser, Debug, Clone)]
#[command(name = "kakaopack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    kakaopack KakaoTalk_Chat.txt
    kakaopack chat.txt -o chat.csv
    kakaopack chat.txt --start 2023-08-01 --end 2023-08-31 --excerpt 50
    kakaopack chat.txt -f jsonl --streaming
    kakaopack normalized.csv --start 2023-08-01 --end 2023-08-31
    kakaopack chat.txt --locale locale.toml")]
pub struct Args {
    /// Path to input file (.txt export or already normalized .csv)
    pub input: String,

    /// Path to output file [default: normalized_chat.<format>]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format [default: from the output extension, else csv]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Keep records on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "end")]
    pub start: Option<String>,

    /// Keep records on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "start")]
    pub end: Option<String>,

    /// Print the last N messages of the selected conversation [default: 50]
    #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = "50")]
    pub excerpt: Option<usize>,

    /// Separator used when joining messages into conversation text
    #[arg(long, value_name = "S", default_value = "\n", hide_default_value = true)]
    pub separator: String,

    /// Locale file overriding the Korean marker tokens (TOML)
    #[arg(long, value_name = "FILE")]
    pub locale: Option<String>,

    /// Read the export line by line instead of loading it into memory
    #[arg(long)]
    pub streaming: bool,

    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Resolves the output format.
    ///
    /// An explicit `--format` wins. Otherwise a known `--output` extension
    /// decides, and anything else falls back to CSV.
    pub fn output_format(&self) -> crate::format::OutputFormat {
        if let Some(format) = self.format {
            return format.into();
        }
        self.output
            .as_deref()
            .and_then(|path| crate::format::OutputFormat::from_path(path).ok())
            .unwrap_or_default()
    }

    /// Returns the output path, deriving it from the format when not given.
    pub fn output_path(&self) -> String {
        match &self.output {
            Some(path) => path.clone(),
            None => format!("{}.{}", DEFAULT_OUTPUT_STEM, self.output_format().extension()),
        }
    }
}

/// Output format options.
///
/// # Example
///
/// ```rust
/// use kakaopack::cli::OutputFormat;
///
/// let format = OutputFormat::Jsonl;
/// assert_eq!(format.to_string(), "JSONL");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with `Date,User,Message` header (default)
    #[default]
    Csv,

    /// JSON array of records
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
