//! Build `inputs/star_ids.txt` from the TIC catalog
//!
//! Queries MAST for stars with TESS magnitude 0-6 and writes up to 2000
//! `TIC <ID>` lines. An optional first argument names a JSON config file.

use star_fetch::{CatalogQuery, Config, HttpTransport};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    println!("Fetching star IDs from MAST catalog...");
    let transport = Arc::new(HttpTransport::new(&config)?);
    let query = CatalogQuery::new(
        config.lookup.base_url.clone(),
        config.catalog.clone(),
        transport,
    );

    match query.save_star_ids().await {
        Ok(written) => println!(
            "Successfully saved {written} star IDs to {}.",
            config.catalog.output_path.display()
        ),
        Err(e) => eprintln!("Error fetching star IDs. Process incomplete: {e}"),
    }

    Ok(())
}
