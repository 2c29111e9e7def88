use serde::{Deserialize, Serialize};

use super::results::ScanOptions;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanDefaults,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Default scan options applied when the CLI flags are omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanDefaults {
    pub threads: u32,
    pub timeout_secs: u32,
    pub scan_aws: bool,
    pub scan_send_grid: bool,
}

impl Default for ScanDefaults {
    fn default() -> Self {
        Self {
            threads: 50,
            timeout_secs: 10,
            scan_aws: true,
            scan_send_grid: true,
        }
    }
}

impl ScanDefaults {
    pub fn to_options(&self) -> ScanOptions {
        ScanOptions {
            threads: self.threads,
            timeout_secs: self.timeout_secs,
            scan_aws: self.scan_aws,
            scan_send_grid: self.scan_send_grid,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: String,
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            directory: "./exports".to_string(),
        }
    }
}
