use clap::Parser;
use hrefsup::checker::Checker;
use hrefsup::config::Config;
use hrefsup::core::constants::output_formats;
use hrefsup::discovery::{collect_documents, relative_to, scan_paths};
use hrefsup::reporting::logging;
use hrefsup::reporting::output;
use hrefsup::ui::{Cli, cli_to_config};

use std::path::PathBuf;

/// Exit status for failures that happen before any link is checked
const SETUP_FAILURE: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(SETUP_FAILURE);
        }
    }
}

/// Check every document under the requested paths and report the findings
async fn run(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let mut config = Config::load(cli.config.as_deref(), cli.no_config)?;
    config.merge_with_cli(&cli_to_config(cli));
    config.validate()?;

    logging::init_logger(config.verbose.unwrap_or(false), cli.quiet);
    logging::log_config_info(&config);

    let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let paths = scan_paths(&cli.paths, &root);

    let mut documents = collect_documents(&paths, &config.markup_extensions())?;
    for document in &mut documents {
        document.path = relative_to(&document.path, &root);
    }
    let document_paths: Vec<_> = documents.iter().map(|d| d.path.as_path()).collect();
    logging::log_document_info(&document_paths);

    let checker = Checker::from_config(&root, &config)?;
    let report = checker.check_documents(&documents).await;

    match config.output_format() {
        output_formats::JSON => println!("{}", output::render_json(&report.records, &report.summary)),
        _ => print!("{}", output::render_console(&report.records, &report.summary)),
    }

    if cli.github_annotations || env_flag("GITHUB_ACTIONS") {
        print!(
            "{}",
            output::render_github_annotations(&report.records, &report.summary)
        );
    }

    let summary_path = cli
        .summary
        .clone()
        .or_else(|| std::env::var_os("GITHUB_STEP_SUMMARY").map(PathBuf::from));
    if let Some(path) = summary_path {
        output::write_markdown_summary(&path, &report.records, &report.summary);
    }

    Ok(output::exit_code(&report.records))
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|value| value.eq_ignore_ascii_case("true"))
}
