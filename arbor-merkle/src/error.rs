use thiserror::Error;

#[derive(Debug, Error)]
pub enum MerkleError {
    #[error("cannot build a tree from zero elements")]
    EmptyInput,
    #[error("index {index} out of range for {len} elements")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("malformed proof encoding: {0}")]
    Codec(#[from] bincode::Error),
}

impl MerkleError {
    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index: signed_index(index), len }
    }
}

/// Signed view of an index for error reports, saturating at `i64::MAX`.
pub fn signed_index(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

/// Map a signed index from an outer surface onto `0..len`.
pub fn checked_index(index: i64, len: usize) -> Result<usize, MerkleError> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or(MerkleError::IndexOutOfRange { index, len })
}

/// Like [`checked_index`] when the element count is not known; only the
/// sign is checked and `len` is reported as 0.
pub fn unsigned_index(index: i64) -> Result<usize, MerkleError> {
    usize::try_from(index).map_err(|_| MerkleError::IndexOutOfRange { index, len: 0 })
}
