//! Row deduplication for catalogue construction
//!
//! The range table derives its ion, atom, and range catalogues by collapsing
//! repeated rows from the source file. Rows are compared with exact per-field
//! equality; callers that need floating-point tolerance must quantize before
//! deduplicating.

/// Errors that can occur during row deduplication
#[derive(Debug, thiserror::Error)]
pub enum DedupError {
    /// Input rows do not all share the same width
    #[error("Irregular row width at row {row}: expected {expected}, got {found}")]
    IrregularRowWidth {
        expected: usize,
        found: usize,
        row: usize,
    },
}

/// Return the distinct rows of a homogeneous 2D table.
///
/// Output order is the first occurrence of each row in the input, so the
/// result is stable for identical input. All rows must have the same width;
/// an irregular row is rejected rather than silently compared.
pub fn unique_rows<T: PartialEq + Clone>(rows: &[Vec<T>]) -> Result<Vec<Vec<T>>, DedupError> {
    let mut unique: Vec<Vec<T>> = Vec::new();

    let width = match rows.first() {
        Some(first) => first.len(),
        None => return Ok(unique),
    };

    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(DedupError::IrregularRowWidth {
                expected: width,
                found: row.len(),
                row: i,
            });
        }
        if !unique.contains(row) {
            unique.push(row.clone());
        }
    }

    Ok(unique)
}
