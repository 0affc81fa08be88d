//! Generate one sector and print its manifest as JSON.
//!
//! Run with:
//!   cargo run -p sectorgen-engine --example dump_sector -- <sector_id> <seed> [difficulty] [theme]
//!
//! Set `RUST_LOG=sectorgen_engine=debug` to see the per-attempt verdicts on
//! stderr. Integer seeds are passed as integers; anything else is used as a
//! text seed.

use anyhow::{bail, Context, Result};
use sectorgen_engine::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("usage: dump_sector <sector_id> <seed> [difficulty] [theme]");
    }

    let seed = match args[1].parse::<i64>() {
        Ok(value) => SeedValue::from(value),
        Err(_) => SeedValue::from(args[1].as_str()),
    };
    let difficulty = match args.get(2) {
        Some(raw) => raw
            .parse::<i64>()
            .with_context(|| format!("difficulty `{raw}` is not an integer"))?,
        None => 1,
    };

    let mut request = SectorRequest::new(args[0].as_str(), seed).with_difficulty(difficulty);
    if let Some(theme) = args.get(3) {
        request = request.with_theme_hint(theme.as_str());
    }

    let manifest = SectorGenerator::default().generate(&request);
    println!("{}", manifest.to_json()?);
    eprintln!(
        "content hash {} (attempt {:?}, fallback: {})",
        manifest.content_hash()?,
        manifest.committed_attempt(),
        manifest.is_fallback()
    );
    Ok(())
}
