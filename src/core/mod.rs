pub mod config;
pub mod error;
pub mod results;

pub use config::{Config, OutputConfig, ScanDefaults};
pub use error::{Result, ScannerError};
pub use results::{ExportFormat, KeyType, ScanOptions, ScanResult, ScanStatus};
