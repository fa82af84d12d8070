//! Simple CLI that reads a job page from stdin and prints the extraction
//! result as JSON to stdout.
//!
//! Usage: `extract_job <url> < page.html`
//!
//! Set `RUST_LOG=job_extract=debug` to see stage decisions on stderr.

use std::io::{self, Read};

use job_extract::JobExtractor;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let url = std::env::args().nth(1).unwrap_or_default();

    // Read raw bytes so non-UTF-8 pages can be transcoded
    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let result = JobExtractor::default().extract_bytes(&html, &url);

    println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default());
}
