//! Point classification
//!
//! Binds a point cloud to a range table: every sample resolves, in index
//! order, to the id and composition of the first range containing its
//! mass-to-charge ratio, or to [`UNRANGED`] when no range matches. The
//! resulting array is index-aligned 1:1 with the point cloud and read-only
//! for the life of the session.

use serde::Serialize;

use crate::pos::PointCloud;
use crate::range_table::RangeTable;

/// Sentinel range id for samples outside every declared range.
pub const UNRANGED: i32 = -1;

/// Classification of one sample, stored at the sample's index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationRecord {
    /// Index into the range table, or [`UNRANGED`]
    pub range_id: i32,
    /// Constituent atoms of the resolved range; empty when unranged
    pub atoms: Vec<String>,
}

impl ClassificationRecord {
    /// True when the sample matched no range.
    pub fn is_unranged(&self) -> bool {
        self.range_id == UNRANGED
    }
}

/// Classify every sample against the range table.
///
/// A single linear pass; range counts are small relative to sample counts in
/// this domain, so no interval index is built. An empty cloud yields an empty
/// array, and an empty table classifies every sample as unranged.
pub fn classify(points: &PointCloud, ranges: &RangeTable) -> Vec<ClassificationRecord> {
    points
        .samples()
        .iter()
        .map(|sample| match ranges.lookup(sample.mc) {
            Some((range_id, entry)) => ClassificationRecord {
                range_id: range_id as i32,
                atoms: entry.atoms.clone(),
            },
            None => ClassificationRecord {
                range_id: UNRANGED,
                atoms: Vec::new(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos::Sample;
    use crate::range_table::RangeEntry;

    fn cloud(mcs: &[f64]) -> PointCloud {
        PointCloud::from_samples(
            mcs.iter()
                .enumerate()
                .map(|(i, &mc)| Sample {
                    position: [i as f64, 0.0, 0.0],
                    mc,
                })
                .collect(),
        )
    }

    fn table() -> RangeTable {
        RangeTable::new(vec![
            RangeEntry::from_composition(0.9, 1.1, &[("H", 1)]),
            RangeEntry::from_composition(4.5, 5.5, &[("Al", 1)]),
        ])
        .unwrap()
    }

    #[test]
    fn one_record_per_sample_in_index_order() {
        let points = cloud(&[1.0, 5.0, 12.0]);
        let records = classify(&points, &table());

        assert_eq!(records.len(), points.len());
        assert_eq!(records[0].range_id, 0);
        assert_eq!(records[0].atoms, ["H"]);
        assert_eq!(records[1].range_id, 1);
        assert_eq!(records[1].atoms, ["Al"]);
        assert_eq!(records[2].range_id, UNRANGED);
        assert!(records[2].atoms.is_empty());
        assert!(records[2].is_unranged());
    }

    #[test]
    fn boundary_values_are_classified_into_the_range() {
        let records = classify(&cloud(&[0.9, 1.1]), &table());
        assert_eq!(records[0].range_id, 0);
        assert_eq!(records[1].range_id, 0);
    }

    #[test]
    fn empty_cloud_yields_empty_array() {
        assert!(classify(&cloud(&[]), &table()).is_empty());
    }

    #[test]
    fn empty_table_classifies_everything_unranged() {
        let empty = RangeTable::new(Vec::new()).unwrap();
        let records = classify(&cloud(&[1.0, 5.0]), &empty);
        assert!(records.iter().all(ClassificationRecord::is_unranged));
    }
}
