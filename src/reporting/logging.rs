use crate::config::Config;
use crate::core::types::CheckOutcome;
use log::{debug, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Error
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    // try_init: tests and embedders may already have installed a logger
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let policy = config.retry_policy();

    info!(
        "Configuration: component={}, workers={}, timeout={}s",
        config.component_name(),
        config.worker_count(),
        config.timeout_duration().as_secs()
    );
    info!(
        "Retry: attempts={}, backoff_base={}ms, jitter_max={}ms",
        policy.attempts,
        policy.backoff_base.as_millis(),
        policy.jitter_max.as_millis()
    );
}

/// Log document discovery information
pub fn log_document_info<P: AsRef<Path>>(files: &[P]) {
    info!("Scanning {} document(s)", files.len());
    for (i, file) in files.iter().enumerate() {
        debug!("  {}. {}", i + 1, file.as_ref().display());
    }
}

pub fn log_extraction(total: usize, internal: usize, external: usize) {
    info!("Found {total} href(s): {internal} internal, {external} external");
}

/// Log validation progress
pub fn log_validation_start(external_count: usize, workers: usize) {
    info!("Checking {external_count} external link(s) with {workers} worker(s)");
}

/// Log validation completion
pub fn log_validation_complete(occurrences: usize, broken: usize, duration_ms: u128) {
    if broken == 0 {
        info!("✅ Check complete: {occurrences} link(s), no issues ({duration_ms}ms)");
    } else {
        warn!("❌ Check complete: {occurrences} link(s), {broken} issue(s) found ({duration_ms}ms)");
    }
}

/// Log individual link outcomes for debugging
pub fn log_outcome(reference: &str, outcome: &CheckOutcome) {
    if outcome.ok {
        debug!("✓ {reference} -> {}", outcome.reason);
    } else {
        debug!("✗ {reference} -> {}", outcome.reason);
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
