use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use aptread::AptDataset;

/// Query point positions by ion label, atom symbol, or range ids
pub fn run(
    pos: PathBuf,
    rng: PathBuf,
    ion: Option<String>,
    atom: Option<String>,
    range: Option<Vec<i32>>,
    output: Option<PathBuf>,
) -> Result<()> {
    let selectors = ion.is_some() as u8 + atom.is_some() as u8 + range.is_some() as u8;
    if selectors != 1 {
        anyhow::bail!("Specify exactly one of --ion, --atom, or --range");
    }

    let dataset = AptDataset::open(&pos, &rng).context("Failed to open APT dataset")?;

    let (label, positions) = if let Some(ion) = ion {
        let positions = dataset.points_by_ion(&ion)?;
        (format!("ion {ion}"), positions)
    } else if let Some(atom) = atom {
        let positions = dataset.points_by_atom(&atom)?;
        (format!("atom {atom}"), positions)
    } else {
        let ids = range.unwrap_or_default();
        let positions = dataset.points_by_ranges(&ids)?;
        (format!("ranges {ids:?}"), positions)
    };

    info!(
        "Query {} matched {} of {} points",
        label,
        positions.len(),
        dataset.len()
    );

    match output {
        Some(path) => {
            let mut writer = csv::Writer::from_path(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            writer.write_record(["x", "y", "z"])?;
            for [x, y, z] in &positions {
                writer.write_record(&[x.to_string(), y.to_string(), z.to_string()])?;
            }
            writer.flush()?;
            println!(
                "Wrote {} positions for {} to {}",
                positions.len(),
                label,
                path.display()
            );
        }
        None => {
            println!("{} positions for {}", positions.len(), label);
            for [x, y, z] in positions.iter().take(10) {
                println!("  {x:.4} {y:.4} {z:.4}");
            }
            if positions.len() > 10 {
                println!("  ... ({} more)", positions.len() - 10);
            }
        }
    }

    Ok(())
}
