//! Simple evaluation example: load a catalog and a build file and print the status.
//! Run with: cargo run --example simple_evaluation [catalog.json] [build.json]

use buildguard::prelude::*;
use std::path::Path;

fn main() -> Result<(), BuildGuardError> {
    let mut args = std::env::args().skip(1);
    let catalog_path = args
        .next()
        .unwrap_or_else(|| "tests/fixtures/catalog.json".to_string());
    let build_path = args
        .next()
        .unwrap_or_else(|| "tests/fixtures/build_mismatched.json".to_string());

    for path in [&catalog_path, &build_path] {
        if !Path::new(path).exists() {
            eprintln!("File not found: {}", path);
            eprintln!("Usage: cargo run --example simple_evaluation [catalog.json] [build.json]");
            std::process::exit(1);
        }
    }

    let catalog = Catalog::load(Path::new(&catalog_path))?;
    let build = buildguard::load_build(Path::new(&build_path), &catalog)?;
    let engine = CompatibilityEngine::new();
    let status = engine.evaluate_build(&build);

    println!("{}", status.message);
    for issue in &status.issues {
        println!("  - {}", issue);
    }
    println!("Total: ${:.2}", build.total_price());

    if status.status == BuildState::Issues {
        std::process::exit(1);
    }
    Ok(())
}
