//! In-memory range table
//!
//! A range table maps contiguous mass-to-charge intervals to ion
//! compositions. Source files do not enforce disjoint ranges, so lookup is
//! defined as first-match in table-declared order; when two ranges overlap,
//! the earlier declaration wins, reproducibly.

use serde::Serialize;

use crate::dedup::unique_rows;

/// Errors raised by semantically malformed range data
#[derive(Debug, thiserror::Error)]
pub enum InvalidRngError {
    /// A range whose lower bound exceeds its upper bound
    #[error("Inverted bounds in range {index}: [{lower}, {upper}]")]
    InvertedBounds {
        index: usize,
        lower: f64,
        upper: f64,
    },

    /// Two ranges share identical bounds but disagree on composition
    #[error("Conflicting compositions for range [{lower}, {upper}]")]
    ConflictingComposition { lower: f64, upper: f64 },

    /// Catalogue construction failed
    #[error("Catalogue error: {0}")]
    Catalogue(#[from] crate::dedup::DedupError),
}

/// One mass-to-charge bin and its ion composition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeEntry {
    /// Lower bound of the interval (inclusive)
    pub lower: f64,
    /// Upper bound of the interval (inclusive)
    pub upper: f64,
    /// Composition label, e.g. "Al2O3"
    pub ion: String,
    /// Constituent atom symbols in declaration order, repeated per count
    pub atoms: Vec<String>,
}

impl RangeEntry {
    /// Build an entry from per-atom counts, deriving the atoms sequence and
    /// the canonical ion label (symbol followed by its count when above one).
    pub fn from_composition(lower: f64, upper: f64, composition: &[(&str, u32)]) -> Self {
        let mut ion = String::new();
        let mut atoms = Vec::new();
        for (symbol, count) in composition {
            if *count == 0 {
                continue;
            }
            ion.push_str(symbol);
            if *count > 1 {
                ion.push_str(&count.to_string());
            }
            for _ in 0..*count {
                atoms.push((*symbol).to_string());
            }
        }
        Self {
            lower,
            upper,
            ion,
            atoms,
        }
    }

    /// True when `mc` falls inside this range. Both ends are inclusive.
    pub fn contains(&self, mc: f64) -> bool {
        self.lower <= mc && mc <= self.upper
    }
}

/// Validated range table with deduplicated catalogues.
#[derive(Debug, Clone, Default)]
pub struct RangeTable {
    entries: Vec<RangeEntry>,
    ion_list: Vec<String>,
    atom_list: Vec<String>,
    range_list: Vec<(f64, f64)>,
}

impl RangeTable {
    /// Validate entries and precompute the ion/atom/range catalogues.
    ///
    /// Exact duplicate rows are tolerated (they collapse in the catalogues);
    /// rows that repeat the same bounds with a different composition are
    /// rejected as inconsistent.
    pub fn new(entries: Vec<RangeEntry>) -> Result<Self, InvalidRngError> {
        for (index, entry) in entries.iter().enumerate() {
            if entry.lower > entry.upper {
                return Err(InvalidRngError::InvertedBounds {
                    index,
                    lower: entry.lower,
                    upper: entry.upper,
                });
            }
            for earlier in &entries[..index] {
                if earlier.lower == entry.lower
                    && earlier.upper == entry.upper
                    && earlier.atoms != entry.atoms
                {
                    return Err(InvalidRngError::ConflictingComposition {
                        lower: entry.lower,
                        upper: entry.upper,
                    });
                }
            }
        }

        let ion_rows: Vec<Vec<String>> = entries.iter().map(|e| vec![e.ion.clone()]).collect();
        let ion_list = unique_rows(&ion_rows)?
            .into_iter()
            .map(|mut row| row.remove(0))
            .collect();

        let atom_rows: Vec<Vec<String>> = entries
            .iter()
            .flat_map(|e| e.atoms.iter().map(|a| vec![a.clone()]))
            .collect();
        let atom_list = unique_rows(&atom_rows)?
            .into_iter()
            .map(|mut row| row.remove(0))
            .collect();

        let bound_rows: Vec<Vec<f64>> = entries.iter().map(|e| vec![e.lower, e.upper]).collect();
        let range_list = unique_rows(&bound_rows)?
            .into_iter()
            .map(|row| (row[0], row[1]))
            .collect();

        Ok(Self {
            entries,
            ion_list,
            atom_list,
            range_list,
        })
    }

    /// Resolve a mass-to-charge value to the first matching range in
    /// declaration order. Returns `None` for unranged values.
    pub fn lookup(&self, mc: f64) -> Option<(usize, &RangeEntry)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.contains(mc))
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &[RangeEntry] {
        &self.entries
    }

    /// Entry at `range_id`, if in bounds.
    pub fn get(&self, range_id: usize) -> Option<&RangeEntry> {
        self.entries.get(range_id)
    }

    /// Number of declared ranges (before catalogue deduplication).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table holds no ranges.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct ion labels, first-occurrence order.
    pub fn ion_list(&self) -> &[String] {
        &self.ion_list
    }

    /// Distinct atom symbols, first-occurrence order.
    pub fn atom_list(&self) -> &[String] {
        &self.atom_list
    }

    /// Distinct (lower, upper) bound pairs, first-occurrence order.
    pub fn range_list(&self) -> &[(f64, f64)] {
        &self.range_list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RangeTable {
        RangeTable::new(vec![
            RangeEntry::from_composition(0.9, 1.1, &[("H", 1)]),
            RangeEntry::from_composition(13.0, 14.5, &[("Al", 1)]),
            RangeEntry::from_composition(14.0, 16.0, &[("O", 1)]),
            RangeEntry::from_composition(26.5, 27.5, &[("Al", 1)]),
        ])
        .unwrap()
    }

    #[test]
    fn lookup_is_inclusive_on_both_ends() {
        let t = table();
        assert_eq!(t.lookup(0.9).unwrap().0, 0);
        assert_eq!(t.lookup(1.1).unwrap().0, 0);
        assert!(t.lookup(0.89).is_none());
        assert!(t.lookup(1.11).is_none());
    }

    #[test]
    fn overlap_resolves_to_first_declared_range() {
        let t = table();
        // 14.2 falls in both [13.0, 14.5] and [14.0, 16.0].
        let (id, entry) = t.lookup(14.2).unwrap();
        assert_eq!(id, 1);
        assert_eq!(entry.ion, "Al");
    }

    #[test]
    fn catalogues_are_deduplicated() {
        let t = table();
        assert_eq!(t.ion_list(), ["H", "Al", "O"]);
        assert_eq!(t.atom_list(), ["H", "Al", "O"]);
        assert_eq!(t.range_list().len(), 4);
    }

    #[test]
    fn molecular_ion_label_carries_counts() {
        let entry = RangeEntry::from_composition(40.0, 41.0, &[("Al", 2), ("O", 3)]);
        assert_eq!(entry.ion, "Al2O3");
        assert_eq!(entry.atoms, ["Al", "Al", "O", "O", "O"]);
    }

    #[test]
    fn zero_count_atoms_are_skipped() {
        let entry = RangeEntry::from_composition(10.0, 11.0, &[("H", 0), ("O", 1)]);
        assert_eq!(entry.ion, "O");
        assert_eq!(entry.atoms, ["O"]);
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = RangeTable::new(vec![RangeEntry::from_composition(2.0, 1.0, &[("H", 1)])])
            .unwrap_err();
        assert!(matches!(err, InvalidRngError::InvertedBounds { index: 0, .. }));
    }

    #[test]
    fn rejects_conflicting_duplicate_bounds() {
        let err = RangeTable::new(vec![
            RangeEntry::from_composition(1.0, 2.0, &[("H", 1)]),
            RangeEntry::from_composition(1.0, 2.0, &[("O", 1)]),
        ])
        .unwrap_err();
        assert!(matches!(err, InvalidRngError::ConflictingComposition { .. }));
    }

    #[test]
    fn tolerates_exact_duplicate_rows() {
        let t = RangeTable::new(vec![
            RangeEntry::from_composition(1.0, 2.0, &[("H", 1)]),
            RangeEntry::from_composition(1.0, 2.0, &[("H", 1)]),
        ])
        .unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.ion_list().len(), 1);
        assert_eq!(t.range_list().len(), 1);
    }

    #[test]
    fn empty_table_never_matches() {
        let t = RangeTable::new(Vec::new()).unwrap();
        assert!(t.lookup(1.0).is_none());
        assert!(t.ion_list().is_empty());
    }
}
