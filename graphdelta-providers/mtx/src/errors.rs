use thiserror::Error;

/// Errors raised while reading a Matrix-Market coordinate file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MtxError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The input ended before a size line was found.
    #[error("missing `rows cols entries` size line")]
    MissingSizeLine,
    #[error("line {line}: malformed size line `{content}`")]
    MalformedSizeLine { line: usize, content: String },
    #[error("line {line}: malformed entry `{content}`")]
    MalformedEntry { line: usize, content: String },
    /// An entry names a 1-based index of zero or beyond the vertex count.
    #[error("line {line}: index {index} is outside 1..={vertices}")]
    VertexOutOfRange {
        line: usize,
        index: usize,
        vertices: usize,
    },
}
