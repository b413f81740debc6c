//! ORNL RNG range-table reader
//!
//! The RNG format is whitespace-tokenized text. Layout, by row index over the
//! split lines of the file:
//!
//! - row 0: `natoms nranges`
//! - rows 2, 4, ... `2 * natoms`: one atom declaration each,
//!   `symbol r g b` (display color floats; interleaved odd rows are unused)
//! - the next `nranges` rows, starting at `(1 + natoms) * 2`: one range each,
//!   `marker lower upper c1 .. c_natoms`, where `c_i` counts how many atoms
//!   of declaration `i` make up the range's ion
//!
//! The reader yields the declared atoms plus one [`RangeEntry`] per range
//! row, with the composition counts expanded into the entry's atom sequence.

use std::fs;
use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::range_table::RangeEntry;

/// Errors that can occur while reading an RNG file
#[derive(Debug, thiserror::Error)]
pub enum RngReadError {
    /// I/O error opening or reading the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Structurally malformed content
    #[error("Malformed RNG file at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

impl RngReadError {
    fn malformed(row: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line: row + 1,
            reason: reason.into(),
        }
    }
}

/// One declared atom: elemental symbol plus display color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomInfo {
    /// Elemental symbol, e.g. "Al"
    pub symbol: String,
    /// RGB display color in `[0, 1]`
    pub color: [f32; 3],
}

/// Read an RNG file into its atom declarations and range entries.
pub fn read_rng<P: AsRef<Path>>(path: P) -> Result<(Vec<AtomInfo>, Vec<RangeEntry>), RngReadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let (atoms, entries) = parse_rng(&text)?;
    debug!(
        "Loaded {} atoms and {} ranges from {}",
        atoms.len(),
        entries.len(),
        path.display()
    );
    Ok((atoms, entries))
}

/// Parse RNG text. Split out from [`read_rng`] so fixtures can be parsed
/// without touching the filesystem.
pub fn parse_rng(text: &str) -> Result<(Vec<AtomInfo>, Vec<RangeEntry>), RngReadError> {
    let rows: Vec<Vec<&str>> = text
        .lines()
        .map(|line| line.split_whitespace().collect())
        .collect();

    let header = rows
        .first()
        .filter(|row| !row.is_empty())
        .ok_or_else(|| RngReadError::malformed(0, "missing header row"))?;
    if header.len() < 2 {
        return Err(RngReadError::malformed(
            0,
            format!("header needs `natoms nranges`, got {} fields", header.len()),
        ));
    }
    let natoms: usize = parse_field(header[0], 0, "atom count")?;
    let nranges: usize = parse_field(header[1], 0, "range count")?;

    let mut atoms = Vec::with_capacity(natoms);
    for i in 0..natoms {
        let row_idx = 2 + 2 * i;
        let row = rows
            .get(row_idx)
            .filter(|row| !row.is_empty())
            .ok_or_else(|| RngReadError::malformed(row_idx, "missing atom declaration"))?;
        if row.len() < 4 {
            return Err(RngReadError::malformed(
                row_idx,
                format!("atom declaration needs `symbol r g b`, got {} fields", row.len()),
            ));
        }
        let color = [
            parse_field(row[1], row_idx, "color component")?,
            parse_field(row[2], row_idx, "color component")?,
            parse_field(row[3], row_idx, "color component")?,
        ];
        atoms.push(AtomInfo {
            symbol: row[0].to_string(),
            color,
        });
    }

    let base = (1 + natoms) * 2;
    let mut entries = Vec::with_capacity(nranges);
    for j in 0..nranges {
        let row_idx = base + j;
        let row = rows
            .get(row_idx)
            .filter(|row| !row.is_empty())
            .ok_or_else(|| RngReadError::malformed(row_idx, "missing range row"))?;
        if row.len() < 3 + natoms {
            return Err(RngReadError::malformed(
                row_idx,
                format!(
                    "range row needs marker, bounds, and {} composition counts, got {} fields",
                    natoms,
                    row.len()
                ),
            ));
        }
        let lower: f64 = parse_field(row[1], row_idx, "lower bound")?;
        let upper: f64 = parse_field(row[2], row_idx, "upper bound")?;
        let mut composition = Vec::with_capacity(natoms);
        for (i, atom) in atoms.iter().enumerate() {
            let count: u32 = parse_field(row[3 + i], row_idx, "composition count")?;
            composition.push((atom.symbol.as_str(), count));
        }
        entries.push(RangeEntry::from_composition(lower, upper, &composition));
    }

    Ok((atoms, entries))
}

fn parse_field<T: std::str::FromStr>(
    token: &str,
    row_idx: usize,
    what: &str,
) -> Result<T, RngReadError> {
    token
        .parse()
        .map_err(|_| RngReadError::malformed(row_idx, format!("invalid {what} `{token}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "\
3 4

Al 0.20 0.45 0.80

O 0.90 0.10 0.10

H 0.95 0.95 0.95

. 13.00 14.50 1 0 0
. 15.50 16.50 0 1 0
. 0.90 1.10 0 0 1
. 40.00 41.50 2 3 0
";

    #[test]
    fn parses_ornl_fixture() {
        let (atoms, entries) = parse_rng(FIXTURE).unwrap();
        assert_eq!(atoms.len(), 3);
        assert_eq!(atoms[0].symbol, "Al");
        assert_eq!(atoms[0].color, [0.20, 0.45, 0.80]);

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].lower, 13.00);
        assert_eq!(entries[0].upper, 14.50);
        assert_eq!(entries[0].ion, "Al");
        assert_eq!(entries[2].ion, "H");
        assert_eq!(entries[3].ion, "Al2O3");
        assert_eq!(entries[3].atoms, ["Al", "Al", "O", "O", "O"]);
    }

    #[test]
    fn rejects_missing_header() {
        let err = parse_rng("").unwrap_err();
        assert!(matches!(err, RngReadError::Malformed { line: 1, .. }));
    }

    #[test]
    fn rejects_truncated_range_block() {
        // Header promises two ranges, file has one.
        let text = "1 2\n\nFe 0.5 0.5 0.5\n\n. 26.5 27.5 1\n";
        let err = parse_rng(text).unwrap_err();
        assert!(matches!(err, RngReadError::Malformed { .. }));
    }

    #[test]
    fn rejects_garbled_composition_count() {
        let text = "1 1\n\nFe 0.5 0.5 0.5\n\n. 26.5 27.5 x\n";
        let err = parse_rng(text).unwrap_err();
        match err {
            RngReadError::Malformed { reason, .. } => {
                assert!(reason.contains("composition count"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_short_atom_declaration() {
        let text = "1 0\n\nFe 0.5\n";
        let err = parse_rng(text).unwrap_err();
        assert!(matches!(err, RngReadError::Malformed { line: 3, .. }));
    }
}
