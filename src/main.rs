use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use aws_key_scanner::cli::{Cli, Commands, OutputFormatter};
use aws_key_scanner::core::{Config, ExportFormat, ScanOptions, ScanResult};
use aws_key_scanner::export::{self, FileSink};
use aws_key_scanner::input::{self, StdinPaste};
use aws_key_scanner::scan::ScanSimulator;
use aws_key_scanner::store::{self, ResultStore, SortKey, SortOrder};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    // Print banner
    OutputFormatter::print_banner();

    // Execute command
    if let Err(e) = execute_command(cli.command).await {
        OutputFormatter::print_error(&format!("Error: {}", e));
        std::process::exit(1);
    }
}

async fn execute_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Scan {
            urls,
            input,
            threads,
            timeout,
            no_aws,
            no_sendgrid,
            filter,
            sort_by,
            order,
            export,
            output_dir,
        } => {
            scan_command(
                urls, input, threads, timeout, no_aws, no_sendgrid, filter, sort_by, order,
                export, output_dir,
            )
            .await?;
        }
        Commands::Export {
            input,
            format,
            output,
        } => {
            export_command(input, format, output)?;
        }
        Commands::List => {
            list_command();
        }
    }

    Ok(())
}

fn load_config() -> Config {
    let config_paths = vec![
        "config/default.toml",
        "default.toml",
        ".aws_key_scanner.toml",
    ];

    for path in config_paths {
        if Path::new(path).exists() {
            match fs::read_to_string(path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => {
                        info!("Loaded config from {}", path);
                        return config;
                    }
                    Err(e) => {
                        warn!("Failed to parse config from {}: {}", path, e);
                    }
                },
                Err(e) => {
                    warn!("Failed to read config from {}: {}", path, e);
                }
            }
        }
    }

    Config::default()
}

#[allow(clippy::too_many_arguments)]
async fn scan_command(
    urls: Vec<String>,
    input_file: Option<String>,
    threads: Option<u32>,
    timeout: Option<u32>,
    no_aws: bool,
    no_sendgrid: bool,
    filter: Option<String>,
    sort_by: String,
    order: String,
    export_format: Option<String>,
    output_dir: Option<String>,
) -> anyhow::Result<()> {
    let config = load_config();

    // Fail fast on bad view/export selections before any scanning happens.
    let sort_key: SortKey = sort_by.parse()?;
    let sort_order: SortOrder = order.parse()?;
    let export_format = export_format
        .map(|f| f.parse::<ExportFormat>())
        .transpose()?;

    // Gather the raw URL text: positional args, a file, or pasted stdin.
    let mut raw = urls.join("\n");
    match input_file.as_deref() {
        Some("-") => input::paste_urls(&StdinPaste, &mut raw),
        Some(path) => {
            raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?
        }
        None => {}
    }

    let targets = input::parse_url_list(&raw);
    if targets.is_empty() {
        OutputFormatter::print_warning("No target URLs given, nothing to scan");
        return Ok(());
    }

    let defaults = config.scan.to_options();
    let options = ScanOptions {
        threads: threads.unwrap_or(defaults.threads),
        timeout_secs: timeout.unwrap_or(defaults.timeout_secs),
        scan_aws: defaults.scan_aws && !no_aws,
        scan_send_grid: defaults.scan_send_grid && !no_sendgrid,
    };

    OutputFormatter::print_scan_start(targets.len(), &options);

    let store = ResultStore::new();
    let mut simulator = ScanSimulator::new(store.clone());
    simulator.start(&targets, options);

    // Progress bar
    let pb = ProgressBar::new(targets.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut seen = 0usize;
    let stopped = loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                simulator.stop();
                break true;
            }
            _ = tokio::time::sleep(Duration::from_millis(100)) => {}
        }

        let status = store.status();
        pb.set_position(status.progress as u64);

        let results = store.results();
        for result in &results[seen..] {
            pb.println(OutputFormatter::format_detected_key(result));
        }
        seen = results.len();

        if !status.is_scanning {
            break false;
        }
    };
    pb.finish_and_clear();

    if stopped {
        OutputFormatter::print_warning("Scan stopped");
    }

    let status = store.status();
    let results = store.results();

    let view = store::filter_results(&results, filter.as_deref().unwrap_or(""));
    let view = store::sort_results(&view, sort_key, sort_order);
    OutputFormatter::print_results_table(&view);
    OutputFormatter::print_summary(&status, results.len());

    // Exports always carry the full, unfiltered collection.
    if let Some(format) = export_format {
        let directory = output_dir.unwrap_or(config.output.directory);
        let sink = FileSink::new(&directory);
        let filename = export::export_results(&results, format, &sink)?;
        OutputFormatter::print_success(&format!("Results exported to {}/{}", directory, filename));
    }

    Ok(())
}

fn export_command(input: String, format: Option<String>, output: Option<String>) -> anyhow::Result<()> {
    let config = load_config();
    let format: ExportFormat = format.unwrap_or(config.output.format).parse()?;

    OutputFormatter::print_info(&format!(
        "Re-encoding {} as {}",
        input,
        format.extension()
    ));

    let json = fs::read_to_string(&input).with_context(|| format!("failed to read {}", input))?;
    let results: Vec<ScanResult> = serde_json::from_str(&json)?;

    let payload = export::encode(&results, format)?;

    if let Some(output_file) = output {
        fs::write(&output_file, payload)?;
        OutputFormatter::print_success(&format!("Export saved to {}", output_file));
    } else {
        println!("\n{}", payload);
    }

    Ok(())
}

fn list_command() {
    println!("{}", "Available Detectors:".bright_cyan().bold());
    println!(
        "  {} {} - access key ids ({}...)",
        "•".bright_yellow(),
        "aws".bright_white(),
        "AKIA".bright_cyan()
    );
    println!(
        "  {} {} - api keys ({}...)",
        "•".bright_yellow(),
        "sendgrid".bright_white(),
        "SG.".bright_cyan()
    );
    println!();
}
