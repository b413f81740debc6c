use anyhow::{Context, Result};
use byteorder::{BigEndian, WriteBytesExt};
use log::info;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// RNG fixture: three atoms, four ranges (one molecular, Al2O3).
/// Atom declarations sit at every second row after the header; range rows
/// follow the atom block.
const DEMO_RNG: &str = "\
3 4

Al 0.20 0.45 0.80

O 0.90 0.10 0.10

H 0.95 0.95 0.95

. 13.00 14.50 1 0 0
. 15.50 16.50 0 1 0
. 0.90 1.10 0 0 1
. 40.00 41.50 2 3 0
";

/// Mass-to-charge targets the generated points cycle through. The last value
/// falls outside every range so the fixture always contains unranged points.
const MC_TARGETS: [f64; 5] = [13.7, 16.0, 1.0, 40.7, 75.0];

/// Generate a synthetic POS/RNG fixture pair
pub fn run(output: PathBuf, points: usize) -> Result<()> {
    fs::create_dir_all(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let rng_path = output.join("demo.rng");
    fs::write(&rng_path, DEMO_RNG)
        .with_context(|| format!("Failed to write {}", rng_path.display()))?;

    let pos_path = output.join("demo.pos");
    let mut buf = Vec::with_capacity(points * 16);
    let mut state = 0x2545_f491u32;
    for i in 0..points {
        // xorshift; deterministic so repeated runs produce identical files
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state as f64 / u32::MAX as f64) - 0.5
        };
        let x = next() * 40.0;
        let y = next() * 40.0;
        let z = next() * 120.0;
        let mc = MC_TARGETS[i % MC_TARGETS.len()] + next() * 0.2;

        buf.write_f32::<BigEndian>(x as f32)?;
        buf.write_f32::<BigEndian>(y as f32)?;
        buf.write_f32::<BigEndian>(z as f32)?;
        buf.write_f32::<BigEndian>(mc as f32)?;
    }
    let mut file = fs::File::create(&pos_path)
        .with_context(|| format!("Failed to create {}", pos_path.display()))?;
    file.write_all(&buf)?;

    info!("Generated {} points", points);
    println!("Wrote {}", pos_path.display());
    println!("Wrote {}", rng_path.display());
    println!();
    println!("Try: aptread info {} {}", pos_path.display(), rng_path.display());

    Ok(())
}
