use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "aws-key-scanner")]
#[command(version, about = "Dashboard-style scanner for exposed AWS and SendGrid keys", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a list of target URLs for exposed keys
    Scan {
        /// Target URLs given directly on the command line
        urls: Vec<String>,

        /// File with target URLs, one per line ("-" reads pasted input from stdin)
        #[arg(short, long)]
        input: Option<String>,

        /// Worker threads to record for the scan (1-300)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=300))]
        threads: Option<u32>,

        /// Per-target timeout in seconds (1-60)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=60))]
        timeout: Option<u32>,

        /// Disable the AWS (AKIA) detector
        #[arg(long)]
        no_aws: bool,

        /// Disable the SendGrid detector
        #[arg(long)]
        no_sendgrid: bool,

        /// Show only results matching this substring
        #[arg(short, long)]
        filter: Option<String>,

        /// Sort the displayed results (url, key-type, key-value, discovered-at)
        #[arg(long, default_value = "discovered-at")]
        sort_by: String,

        /// Sort direction (asc, desc)
        #[arg(long, default_value = "desc")]
        order: String,

        /// Export the full result collection after the scan (json, csv, txt)
        #[arg(short, long)]
        export: Option<String>,

        /// Directory for exported files (default: from config)
        #[arg(short, long)]
        output_dir: Option<String>,
    },

    /// Re-encode a saved JSON result file into another format
    Export {
        /// Input JSON file with scan results
        #[arg(short, long)]
        input: String,

        /// Output format (json, csv, txt; default: from config)
        #[arg(short, long)]
        format: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List available detectors
    List,
}
