//! # AWS Key Scanner
//!
//! A dashboard-style scanner for exposed AWS and SendGrid keys.
//!
//! The scan is a timer-driven simulation: no network requests are made, no
//! files are fetched, and no pattern matching runs. Every 300 ms tick
//! advances the progress counter and, on even ticks, fabricates one
//! credential-shaped result so the progress/result/cancellation contract can
//! be exercised end to end.
//!
//! ## Architecture
//!
//! The core is built from three pieces:
//!
//! - `ScanSimulator`: the cancellable tick loop emitting progress and results
//! - `ResultStore`: the owned session state with filter/sort read views
//! - `export`: JSON/CSV/text encoding handed to an `ExportSink`
//!
//! ## Example
//!
//! ```rust,no_run
//! use aws_key_scanner::{ResultStore, ScanOptions, ScanSimulator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = ResultStore::new();
//!     let mut simulator = ScanSimulator::new(store.clone());
//!
//!     let targets = vec!["https://example.com".to_string()];
//!     simulator.start(&targets, ScanOptions::default());
//!
//!     while store.status().is_scanning {
//!         tokio::time::sleep(std::time::Duration::from_millis(100)).await;
//!     }
//!
//!     println!("Found {} keys", store.result_count());
//! }
//! ```

pub mod cli;
pub mod core;
pub mod export;
pub mod input;
pub mod scan;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    Config, ExportFormat, KeyType, Result, ScanOptions, ScanResult, ScanStatus, ScannerError,
};

pub use crate::export::{ExportSink, FileSink};
pub use crate::scan::{KeySynthesizer, ScanSimulator, TICK_PERIOD};
pub use crate::store::{filter_results, sort_results, ResultStore, SortKey, SortOrder, SortState};
