use crate::core::results::{KeyType, ScanOptions, ScanResult, ScanStatus};
use colored::Colorize;

pub struct OutputFormatter;

impl OutputFormatter {
    /// Print the dashboard banner
    pub fn print_banner() {
        println!("{}", "=".repeat(70).bright_cyan());
        println!("{}", "  AWS Key Scanner - Exposed Credential Dashboard".bright_cyan().bold());
        println!("{}", "=".repeat(70).bright_cyan());
        println!();
    }

    /// Print scan kickoff info
    pub fn print_scan_start(total: usize, options: &ScanOptions) {
        let mut detectors = Vec::new();
        if options.scan_aws {
            detectors.push("aws");
        }
        if options.scan_send_grid {
            detectors.push("sendgrid");
        }
        println!("{} Scanning {} targets ({} threads, {}s timeout, detectors: {})",
            "🔍".bright_yellow(),
            total.to_string().bright_white(),
            options.threads.to_string().bright_cyan(),
            options.timeout_secs.to_string().bright_cyan(),
            detectors.join(", ").bright_green()
        );
        println!();
    }

    /// One-line notice for a freshly discovered key
    pub fn format_detected_key(result: &ScanResult) -> String {
        let key = &result.key_value;
        format!("  {} Found {} key: {} in {} ({})",
            "✓".green(),
            Self::key_type_label(result.key_type),
            format!("{}...{}", &key[..10], &key[key.len() - 4..]).bright_cyan(),
            result.source_file.bright_white(),
            result.url
        )
    }

    pub fn print_detected_key(result: &ScanResult) {
        println!("{}", Self::format_detected_key(result));
    }

    /// Render the results table (the dashboard's main grid)
    pub fn print_results_table(results: &[ScanResult]) {
        println!();
        println!("{}", "  Scan Results".bright_cyan().bold());
        if results.is_empty() {
            println!("  {}", "No keys found yet".bright_black());
            return;
        }

        println!("  {:<36} {:<10} {:<70} {:<24} {}",
            "URL".bright_black(),
            "KEY TYPE".bright_black(),
            "KEY VALUE".bright_black(),
            "SOURCE FILE".bright_black(),
            "DISCOVERED".bright_black()
        );
        for result in results {
            println!("  {:<36} {:<10} {:<70} {:<24} {}",
                truncate(&result.url, 34).bright_blue(),
                Self::key_type_label(result.key_type),
                result.key_value.bright_cyan(),
                result.source_file,
                result.discovered_at.format("%H:%M:%S").to_string().bright_black()
            );
        }
    }

    /// Print the status-bar summary shown after a scan ends
    pub fn print_summary(status: &ScanStatus, results_count: usize) {
        println!();
        println!("{}", "=".repeat(70).bright_cyan());
        let state = if status.is_scanning { "Scanning..." } else { "Ready" };
        println!("  {} {}   {} {} keys found   {} {}   {} {}/{}",
            "⚡".bright_green(),
            state.bright_white(),
            "💾".bright_blue(),
            results_count.to_string().bright_white(),
            "🕐".bright_yellow(),
            Self::format_duration(status).bright_white(),
            "progress:".bright_black(),
            status.progress.to_string().bright_white(),
            status.total.to_string().bright_white()
        );
        println!("{}", "=".repeat(70).bright_cyan());
    }

    /// Elapsed scan time as HH:MM:SS
    pub fn format_duration(status: &ScanStatus) -> String {
        let secs = status.elapsed().num_seconds().max(0);
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
    }

    fn key_type_label(key_type: KeyType) -> colored::ColoredString {
        match key_type {
            KeyType::Aws => key_type.as_str().bright_yellow(),
            KeyType::SendGrid => key_type.as_str().bright_magenta(),
        }
    }

    /// Print error message
    pub fn print_error(message: &str) {
        eprintln!("{} {}", "❌".bright_red(), message.red());
    }

    /// Print warning message
    pub fn print_warning(message: &str) {
        println!("{} {}", "⚠️".bright_yellow(), message.yellow());
    }

    /// Print success message
    pub fn print_success(message: &str) {
        println!("{} {}", "✓".bright_green(), message.green());
    }

    /// Print info message
    pub fn print_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let cut: String = value.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
