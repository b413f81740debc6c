//! # aptread - Atom Probe Tomography Data Reader
//!
//! `aptread` loads Atom Probe Tomography (APT) acquisitions and classifies
//! every detected ion hit against a mass-to-charge range table.
//!
//! ## Key Features
//!
//! - **POS reader**: headerless big-endian binary point clouds of
//!   `(x, y, z, mc)` detector hits.
//! - **RNG reader**: ORNL-style text range tables mapping mass-to-charge
//!   intervals to ion compositions.
//! - **Classification**: a per-sample array, index-aligned 1:1 with the point
//!   cloud, resolving each hit to a range id and atom composition (or the
//!   `-1` unranged sentinel). Overlapping ranges resolve deterministically to
//!   the first declaration; both interval ends are inclusive.
//! - **Queries**: positions by ion label, atom symbol, or range id(s), with
//!   typed errors for keys absent from the loaded catalogues.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aptread::AptDataset;
//!
//! let dataset = AptDataset::open("R04.pos", "R04.rng")?;
//!
//! println!("{} points", dataset.len());
//! println!("ions:  {:?}", dataset.ion_list());
//! println!("atoms: {:?}", dataset.atom_list());
//!
//! // Positions of every aluminium hit
//! let al = dataset.points_by_atom("Al")?;
//!
//! // Positions outside every declared range
//! let unranged = dataset.points_by_range(-1)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! The dataset is immutable after construction: queries take `&self` and a
//! failed query never invalidates the session. Any change to the backing
//! files requires opening a new dataset.

pub mod classify;
pub mod dataset;
pub mod dedup;
pub mod pos;
pub mod range_table;
pub mod rng;

pub use classify::{ClassificationRecord, UNRANGED};
pub use dataset::{AptDataset, AptReadError, DatasetSummary, InvalidIndexError};
pub use pos::{PointCloud, Sample};
pub use range_table::{RangeEntry, RangeTable};
