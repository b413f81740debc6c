use anyhow::{Context, Result};
use std::path::PathBuf;

use aptread::AptDataset;

fn heading(text: &str) -> String {
    #[cfg(feature = "colorized_output")]
    {
        console::style(text).bold().to_string()
    }
    #[cfg(not(feature = "colorized_output"))]
    {
        text.to_string()
    }
}

/// Display summary information about a POS/RNG pair
pub fn run(pos: PathBuf, rng: PathBuf, json: bool) -> Result<()> {
    let dataset = AptDataset::open(&pos, &rng).context("Failed to open APT dataset")?;
    let summary = dataset.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", heading("APT Dataset Information"));
    println!("=======================");
    println!("POS file: {}", pos.display());
    println!("RNG file: {}", rng.display());
    println!();

    println!("{}", heading("Points:"));
    println!("  Total:    {}", summary.num_points);
    println!("  Ranged:   {}", summary.ranged);
    println!("  Unranged: {}", summary.unranged);
    println!();

    println!("{}", heading("Catalogues:"));
    println!("  Ions:  {}", dataset.ion_list().join(", "));
    println!("  Atoms: {}", dataset.atom_list().join(", "));
    println!();

    println!("{}", heading("Ranges:"));
    for (id, entry) in dataset.ranges().entries().iter().enumerate() {
        println!(
            "  {:3}. [{:.3}, {:.3}] {} ({})",
            id,
            entry.lower,
            entry.upper,
            entry.ion,
            entry.atoms.join(" ")
        );
    }

    Ok(())
}
