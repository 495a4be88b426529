//! Dispatch error types.

/// A request path that the handler tree cannot resolve.
///
/// Both variants are client errors: the path itself is wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// No segments were left to resolve
    #[error("empty path")]
    EmptyPath,

    /// Neither a literal nor a wildcard entry matched the segment
    #[error("unknown path segment: {0:?}")]
    UnknownSegment(String),
}
