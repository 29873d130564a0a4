//! Errors raised while flattening and emitting an instance.

/// Fatal emission error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    /// The instance uses a construct the data emitter cannot represent.
    #[error("unsupported: repeated string field `{field}` cannot be emitted")]
    Unsupported { field: String },

    #[error("internal error: {0}")]
    Internal(#[from] InternalFault),
}

/// Traversal and emission disagree. Always a compiler bug, never bad input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InternalFault {
    #[error("string {0:?} was never interned")]
    StringNotInterned(String),

    #[error("message #{handle} was never registered in bucket `{bucket}`")]
    ValueNotRegistered { bucket: String, handle: usize },

    #[error("array #{handle} was never registered in bucket `{bucket}`")]
    ArrayNotRegistered { bucket: String, handle: usize },

    #[error("array opened in bucket `{bucket}` while another one is still open")]
    ArrayInterleaved { bucket: String },

    #[error("array in bucket `{bucket}` declared {expected} elements but {found} were pushed")]
    ArrayLengthMismatch {
        bucket: String,
        expected: u32,
        found: u32,
    },

    #[error("no bucket for `{0}`")]
    MissingBucket(String),
}
