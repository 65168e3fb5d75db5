//! CLI definitions for pattern-tree.
//!
//! The main entry point is the `Cli` struct, parsed with clap's derive macros.

use crate::format::OutputFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatArg {
    /// Indented outline (default)
    #[default]
    Tree,
    /// Pretty-printed JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Tree => OutputFormat::Tree,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Build and print the component tree of a pattern library directory
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory of the component library
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Tree)]
    pub format: FormatArg,

    /// Path to a settings file (replaces project and user settings)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2")]
    pub log: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["pattern-tree", "components"]).unwrap();
        assert_eq!(cli.dir, PathBuf::from("components"));
        assert_eq!(cli.format, FormatArg::Tree);
        assert_eq!(cli.log, "2");
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "pattern-tree",
            "--format",
            "json",
            "--config",
            "settings.yaml",
            "-v",
            "--log",
            "off",
            "lib/components",
        ])
        .unwrap();
        assert_eq!(OutputFormat::from(cli.format), OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("settings.yaml")));
        assert!(cli.verbose);
        assert_eq!(cli.log, "off");
    }

    #[test]
    fn test_dir_is_required() {
        assert!(Cli::try_parse_from(["pattern-tree"]).is_err());
    }
}
