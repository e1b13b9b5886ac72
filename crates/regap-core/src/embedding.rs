//! Persisted embedding codec.
//!
//! Clause embeddings are stored in the `Embedding` column of the clause
//! spreadsheet as a JSON array of floats, with an explicit parse-failure
//! error. Cells holding anything other than a JSON float array are
//! rejected, never evaluated loosely.

use thiserror::Error;

/// Error parsing a persisted embedding cell.
#[derive(Error, Debug)]
pub enum VectorParseError {
    /// The cell did not contain a JSON array of numbers.
    #[error("embedding cell is not a JSON float array: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The cell parsed to an empty array.
    #[error("embedding cell parsed to an empty vector")]
    Empty,
}

/// Encode a vector for storage in a spreadsheet cell.
pub fn encode_vector(vector: &[f32]) -> String {
    // Vec<f32> serialization cannot fail.
    serde_json::to_string(vector).unwrap_or_default()
}

/// Parse a stored embedding cell back into a vector.
pub fn parse_vector(cell: &str) -> Result<Vec<f32>, VectorParseError> {
    let vector: Vec<f32> = serde_json::from_str(cell.trim())?;
    if vector.is_empty() {
        return Err(VectorParseError::Empty);
    }
    Ok(vector)
}
