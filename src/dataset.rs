//! # APT dataset session
//!
//! An [`AptDataset`] binds one POS point cloud to one RNG range table and
//! owns the classification array derived from them. All three are built at
//! [`AptDataset::open`] and never mutated afterwards, so shared references
//! can be queried concurrently without locking. A failed query leaves the
//! session untouched and usable.
//!
//! ## Example
//!
//! ```rust,no_run
//! use aptread::AptDataset;
//!
//! let dataset = AptDataset::open("R04.pos", "R04.rng")?;
//! println!("{} points, ions: {:?}", dataset.len(), dataset.ion_list());
//!
//! for position in dataset.points_by_ion("Al")? {
//!     println!("{position:?}");
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::classify::{classify, ClassificationRecord, UNRANGED};
use crate::pos::{PointCloud, PosReadError};
use crate::range_table::{InvalidRngError, RangeTable};
use crate::rng::{read_rng, AtomInfo, RngReadError};

/// Errors that can occur while constructing a dataset
#[derive(Debug, thiserror::Error)]
pub enum AptReadError {
    /// The POS file could not be read
    #[error("Error opening POS file {path}: {source}")]
    Pos {
        path: PathBuf,
        source: PosReadError,
    },

    /// The RNG file could not be read
    #[error("Error opening RNG file {path}: {source}")]
    Rng {
        path: PathBuf,
        source: RngReadError,
    },

    /// The RNG file parsed but its content is semantically invalid
    #[error("Invalid range table: {0}")]
    InvalidRng(#[from] InvalidRngError),
}

/// Errors raised by queries against keys absent from the loaded catalogues
#[derive(Debug, thiserror::Error)]
pub enum InvalidIndexError {
    /// Ion label not present in the ion catalogue
    #[error("Unknown ion `{0}`")]
    UnknownIon(String),

    /// Atom symbol not present in the atom catalogue
    #[error("Unknown atom `{0}`")]
    UnknownAtom(String),

    /// Range id outside the table (and not the unranged sentinel)
    #[error("Range id {id} out of bounds for table of {count} ranges")]
    RangeOutOfBounds { id: i32, count: usize },
}

/// Serializable summary of a loaded dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    /// Total number of samples
    pub num_points: usize,
    /// Number of declared ranges
    pub num_ranges: usize,
    /// Number of distinct ion labels
    pub num_ions: usize,
    /// Number of distinct atom symbols
    pub num_atoms: usize,
    /// Samples that resolved to a range
    pub ranged: usize,
    /// Samples outside every range
    pub unranged: usize,
}

/// One loaded APT acquisition: point cloud, range table, and the
/// per-sample classification array.
#[derive(Debug, Clone)]
pub struct AptDataset {
    points: PointCloud,
    atoms: Vec<AtomInfo>,
    ranges: RangeTable,
    classification: Vec<ClassificationRecord>,
}

impl AptDataset {
    /// Open a POS/RNG file pair and classify every point.
    ///
    /// Reader failures are reported with the offending path attached, so the
    /// caller sees a single construction error type regardless of which file
    /// failed.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(
        pos_path: P,
        rng_path: Q,
    ) -> Result<Self, AptReadError> {
        let pos_path = pos_path.as_ref();
        let rng_path = rng_path.as_ref();

        let points = PointCloud::load(pos_path).map_err(|source| AptReadError::Pos {
            path: pos_path.to_path_buf(),
            source,
        })?;
        let (atoms, entries) = read_rng(rng_path).map_err(|source| AptReadError::Rng {
            path: rng_path.to_path_buf(),
            source,
        })?;
        let ranges = RangeTable::new(entries)?;

        let dataset = Self::from_parts(points, atoms, ranges);
        info!(
            "Opened dataset: {} points, {} ranges, {} ions",
            dataset.len(),
            dataset.ranges.len(),
            dataset.ion_list().len()
        );
        Ok(dataset)
    }

    /// Assemble a dataset from already-loaded parts and build the
    /// classification array.
    pub fn from_parts(points: PointCloud, atoms: Vec<AtomInfo>, ranges: RangeTable) -> Self {
        let classification = classify(&points, &ranges);
        Self {
            points,
            atoms,
            ranges,
            classification,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the dataset holds no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The underlying point cloud.
    pub fn points(&self) -> &PointCloud {
        &self.points
    }

    /// The declared atoms from the RNG file.
    pub fn atoms(&self) -> &[AtomInfo] {
        &self.atoms
    }

    /// The validated range table.
    pub fn ranges(&self) -> &RangeTable {
        &self.ranges
    }

    /// Per-sample classification, index-aligned with the point cloud.
    pub fn classification(&self) -> &[ClassificationRecord] {
        &self.classification
    }

    /// Distinct ion labels.
    pub fn ion_list(&self) -> &[String] {
        self.ranges.ion_list()
    }

    /// Distinct atom symbols.
    pub fn atom_list(&self) -> &[String] {
        self.ranges.atom_list()
    }

    /// Distinct range bound pairs.
    pub fn range_list(&self) -> &[(f64, f64)] {
        self.ranges.range_list()
    }

    /// Positions of all samples whose resolved range carries the given ion
    /// label, in point-cloud index order.
    ///
    /// An ion absent from the catalogue is an error, distinguishing "no
    /// points" from "unknown ion".
    pub fn points_by_ion(&self, ion: &str) -> Result<Vec<[f64; 3]>, InvalidIndexError> {
        if !self.ion_list().iter().any(|i| i == ion) {
            return Err(InvalidIndexError::UnknownIon(ion.to_string()));
        }
        Ok(self.classified_positions(|record| {
            self.resolved_ion(record).is_some_and(|label| label == ion)
        }))
    }

    /// Positions of all samples whose resolved composition contains the
    /// given atom symbol, in point-cloud index order. Each matching sample
    /// appears once even when the ion carries the atom several times.
    pub fn points_by_atom(&self, atom: &str) -> Result<Vec<[f64; 3]>, InvalidIndexError> {
        if !self.atom_list().iter().any(|a| a == atom) {
            return Err(InvalidIndexError::UnknownAtom(atom.to_string()));
        }
        Ok(self.classified_positions(|record| record.atoms.iter().any(|a| a == atom)))
    }

    /// Positions of all samples classified into the given range.
    ///
    /// The sentinel id `-1` is a valid query selecting unranged points.
    pub fn points_by_range(&self, range_id: i32) -> Result<Vec<[f64; 3]>, InvalidIndexError> {
        self.points_by_ranges(&[range_id])
    }

    /// Batch form of [`points_by_range`](Self::points_by_range): the union of
    /// the selected ranges, deduplicated, in point-cloud index order.
    pub fn points_by_ranges(&self, range_ids: &[i32]) -> Result<Vec<[f64; 3]>, InvalidIndexError> {
        let count = self.ranges.len();
        for &id in range_ids {
            if id != UNRANGED && (id < 0 || id as usize >= count) {
                return Err(InvalidIndexError::RangeOutOfBounds { id, count });
            }
        }
        Ok(self.classified_positions(|record| range_ids.contains(&record.range_id)))
    }

    /// Summary counts for reporting.
    pub fn summary(&self) -> DatasetSummary {
        let unranged = self
            .classification
            .iter()
            .filter(|r| r.is_unranged())
            .count();
        DatasetSummary {
            num_points: self.len(),
            num_ranges: self.ranges.len(),
            num_ions: self.ion_list().len(),
            num_atoms: self.atom_list().len(),
            ranged: self.len() - unranged,
            unranged,
        }
    }

    fn resolved_ion(&self, record: &ClassificationRecord) -> Option<&str> {
        if record.is_unranged() {
            return None;
        }
        self.ranges
            .get(record.range_id as usize)
            .map(|entry| entry.ion.as_str())
    }

    fn classified_positions<F>(&self, mut matches: F) -> Vec<[f64; 3]>
    where
        F: FnMut(&ClassificationRecord) -> bool,
    {
        self.points
            .samples()
            .iter()
            .zip(&self.classification)
            .filter(|(_, record)| matches(record))
            .map(|(sample, _)| sample.position)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos::Sample;
    use crate::range_table::RangeEntry;

    fn dataset() -> AptDataset {
        let points = PointCloud::from_samples(vec![
            Sample {
                position: [0.0, 0.0, 0.0],
                mc: 1.0,
            },
            Sample {
                position: [1.0, 1.0, 1.0],
                mc: 13.5,
            },
            Sample {
                position: [2.0, 2.0, 2.0],
                mc: 40.5,
            },
            Sample {
                position: [3.0, 3.0, 3.0],
                mc: 99.0,
            },
        ]);
        let ranges = RangeTable::new(vec![
            RangeEntry::from_composition(0.9, 1.1, &[("H", 1)]),
            RangeEntry::from_composition(13.0, 14.5, &[("Al", 1)]),
            RangeEntry::from_composition(40.0, 41.5, &[("Al", 2), ("O", 3)]),
        ])
        .unwrap();
        AptDataset::from_parts(points, Vec::new(), ranges)
    }

    #[test]
    fn by_ion_returns_positions_in_index_order() {
        let d = dataset();
        assert_eq!(d.points_by_ion("Al").unwrap(), vec![[1.0, 1.0, 1.0]]);
        assert_eq!(d.points_by_ion("Al2O3").unwrap(), vec![[2.0, 2.0, 2.0]]);
    }

    #[test]
    fn by_ion_rejects_unknown_label() {
        let d = dataset();
        let err = d.points_by_ion("Fe").unwrap_err();
        assert!(matches!(err, InvalidIndexError::UnknownIon(_)));
        // A failed query leaves the session usable.
        assert_eq!(d.points_by_ion("H").unwrap().len(), 1);
    }

    #[test]
    fn by_atom_matches_each_sample_once() {
        let d = dataset();
        // Al appears in two ranges; the Al2O3 ion carries it twice, but each
        // matching sample is listed once.
        assert_eq!(
            d.points_by_atom("Al").unwrap(),
            vec![[1.0, 1.0, 1.0], [2.0, 2.0, 2.0]]
        );
        assert_eq!(d.points_by_atom("O").unwrap(), vec![[2.0, 2.0, 2.0]]);
    }

    #[test]
    fn by_atom_rejects_unknown_symbol() {
        let err = dataset().points_by_atom("Si").unwrap_err();
        assert!(matches!(err, InvalidIndexError::UnknownAtom(_)));
    }

    #[test]
    fn unranged_sentinel_is_a_valid_query() {
        let d = dataset();
        assert_eq!(d.points_by_range(-1).unwrap(), vec![[3.0, 3.0, 3.0]]);
    }

    #[test]
    fn batch_range_query_unions_without_duplicates() {
        let d = dataset();
        let positions = d.points_by_ranges(&[0, 2, 2, -1]).unwrap();
        assert_eq!(
            positions,
            vec![[0.0, 0.0, 0.0], [2.0, 2.0, 2.0], [3.0, 3.0, 3.0]]
        );
    }

    #[test]
    fn out_of_catalogue_range_id_is_an_error() {
        let d = dataset();
        let err = d.points_by_range(3).unwrap_err();
        assert!(matches!(
            err,
            InvalidIndexError::RangeOutOfBounds { id: 3, count: 3 }
        ));
        assert!(d.points_by_range(-2).is_err());
    }

    #[test]
    fn summary_counts_ranged_and_unranged() {
        let s = dataset().summary();
        assert_eq!(s.num_points, 4);
        assert_eq!(s.num_ranges, 3);
        assert_eq!(s.ranged, 3);
        assert_eq!(s.unranged, 1);
    }
}
