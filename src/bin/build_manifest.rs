// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Write the index manifest for a directory of style fixtures.

use clap::Parser;
use split_timer::services::manifest::{build_manifest, default_output_path};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "build-manifest", about = "Index a directory of JSON style fixtures")]
struct Args {
    /// Directory of fixture files
    #[arg(default_value = "styles")]
    dir: PathBuf,

    /// Output file (default: index.json beside the fixture directory)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let out = args.out.unwrap_or_else(|| default_output_path(&args.dir));

    let entries = build_manifest(&args.dir, &out)?;
    eprintln!("Written to: {} ({} fixtures)", out.display(), entries.len());
    Ok(())
}
