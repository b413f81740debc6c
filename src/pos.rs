//! POS point-cloud reader
//!
//! A POS file is a headerless sequence of detected ion hits. Each record is
//! four big-endian IEEE-754 `f32` values:
//!
//! 1. `x`, `y`, `z` – reconstructed position in nanometres
//! 2. `mc` – measured mass-to-charge ratio in Da
//!
//! Values are widened to `f64` on load. The file length must be a whole
//! number of 16-byte records; a partial trailing record means the file was
//! truncated mid-write and is rejected.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt};
use log::debug;

/// Bytes per POS record: four big-endian f32 values.
const RECORD_SIZE: usize = 16;

/// Errors that can occur while reading a POS file
#[derive(Debug, thiserror::Error)]
pub enum PosReadError {
    /// I/O error opening or reading the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File length is not a whole number of records
    #[error("Truncated POS record: {len} bytes is not a multiple of {record_size}")]
    TruncatedRecord { len: usize, record_size: usize },
}

/// One detected ion hit: reconstructed position plus mass-to-charge ratio.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Sample {
    /// Reconstructed (x, y, z) position
    pub position: [f64; 3],
    /// Mass-to-charge ratio
    pub mc: f64,
}

/// An immutable point cloud of detected hits, in file order.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    samples: Vec<Sample>,
}

impl PointCloud {
    /// Load a POS file from disk.
    ///
    /// An empty file is valid and yields an empty point cloud.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PosReadError> {
        let path = path.as_ref();
        let raw = fs::read(path)?;

        if raw.len() % RECORD_SIZE != 0 {
            return Err(PosReadError::TruncatedRecord {
                len: raw.len(),
                record_size: RECORD_SIZE,
            });
        }

        let num_records = raw.len() / RECORD_SIZE;
        let mut cursor = Cursor::new(raw);
        let mut samples = Vec::with_capacity(num_records);

        for _ in 0..num_records {
            let x = cursor.read_f32::<BigEndian>()? as f64;
            let y = cursor.read_f32::<BigEndian>()? as f64;
            let z = cursor.read_f32::<BigEndian>()? as f64;
            let mc = cursor.read_f32::<BigEndian>()? as f64;
            samples.push(Sample {
                position: [x, y, z],
                mc,
            });
        }

        debug!("Loaded {} points from {}", samples.len(), path.display());
        Ok(Self { samples })
    }

    /// Build a point cloud from already-decoded samples (used by tests and
    /// synthetic fixtures).
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the cloud holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All samples in file order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Sample at `index`, if in bounds.
    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }
}
