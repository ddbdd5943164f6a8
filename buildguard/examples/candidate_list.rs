//! Example: list what fits a slot, annotated with verdicts against a partial build.
//! Run with: cargo run --example candidate_list

use buildguard::prelude::*;
use std::path::Path;

fn main() -> Result<(), BuildGuardError> {
    let catalog = Catalog::load(Path::new("tests/fixtures/catalog.json"))?;
    let engine = CompatibilityEngine::new();

    let mut build = Build::new();
    if let Some(cpu) = catalog.get("cpu-7600") {
        build.set(SlotId::Cpu, cpu.clone());
    }

    for slot in [SlotId::Motherboard, SlotId::Ram, SlotId::Cooler] {
        println!("{}:", slot.slot().name);
        for candidate in engine.annotated_candidates(&catalog, slot, &build, false) {
            let mark = if candidate.verdict.compatible { "ok" } else { "--" };
            println!("  [{}] {} (${:.2})", mark, candidate.component.name, candidate.component.price);
            for reason in &candidate.verdict.reasons {
                println!("       {}", reason);
            }
        }
    }
    Ok(())
}
