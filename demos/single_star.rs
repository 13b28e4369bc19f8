//! Single-star fetch benchmark
//!
//! Reads `inputs/star_ids.txt`, fetches the data product for the first
//! identifier, and prints the timing. An optional first argument names a JSON
//! config file; everything else uses the defaults.
//!
//! ```text
//! cargo run --example single_star -- config.json
//! ```

use star_fetch::{Config, Fetcher, first_identifier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let fetcher = Fetcher::from_config(&config)?;
    println!("Logging setup complete.");

    let star_id = first_identifier(&config.catalog.output_path).await?;
    println!("Starting single-star fetch test...");
    println!("Fetching data for star ID: {star_id}");

    let outcome = fetcher.fetch(&star_id).await;
    if outcome.success {
        println!("{}", outcome.summary());
    } else {
        eprintln!("{}", outcome.summary());
    }

    Ok(())
}
