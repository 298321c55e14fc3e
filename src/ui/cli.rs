// Command-line interface definitions and parsing for hrefsup

use crate::config::CliConfig;
use crate::core::constants::output_formats;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files or directories to scan (default: the --root directory)
    pub paths: Vec<PathBuf>,

    // Core Options
    /// Directory internal links resolve against (default: current directory)
    #[arg(long, value_name = "DIR", help_heading = "Core Options")]
    pub root: Option<PathBuf>,

    /// Component whose href attribute is checked (default: Card)
    #[arg(long, value_name = "NAME", help_heading = "Core Options")]
    pub component: Option<String>,

    /// File extensions to scan (default: mdx,md,html)
    #[arg(long, value_name = "EXTENSIONS", help_heading = "Core Options")]
    pub include: Option<String>,

    // Network & Retry
    /// Per-attempt timeout in seconds (default: 10)
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        help_heading = "Network & Retry"
    )]
    pub timeout: Option<u64>,

    /// Concurrent external checks (default: 12)
    #[arg(long, value_name = "COUNT", help_heading = "Network & Retry")]
    pub workers: Option<usize>,

    /// Attempts per external link (default: 5)
    #[arg(long, value_name = "COUNT", help_heading = "Network & Retry")]
    pub retries: Option<u32>,

    /// Base backoff between attempts in seconds (default: 0.5)
    #[arg(long, value_name = "SECONDS", help_heading = "Network & Retry")]
    pub backoff_base: Option<f64>,

    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network & Retry")]
    pub user_agent: Option<String>,

    // Output & Verbosity
    /// Output format
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    /// Emit GitHub Actions error annotations (also enabled by GITHUB_ACTIONS=true)
    #[arg(long, help_heading = "Output & Verbosity")]
    pub github_annotations: bool,

    /// Append a markdown summary to this file (default: $GITHUB_STEP_SUMMARY)
    #[arg(long, value_name = "FILE", help_heading = "Output & Verbosity")]
    pub summary: Option<PathBuf>,

    /// Only print errors
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Convert parsed arguments into config overrides
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        timeout: cli.timeout,
        workers: cli.workers,
        retries: cli.retries,
        backoff_base: cli.backoff_base,
        component: cli.component.clone(),
        file_types: cli.include.as_ref().map(|include| {
            include
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        }),
        user_agent: cli.user_agent.clone(),
        output_format: cli.format.clone(),
        verbose: cli.verbose,
    }
}
