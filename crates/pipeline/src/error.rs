//! Pipeline error types
//!
//! Almost everything in the pipeline degrades instead of failing; the error
//! surface is correspondingly small.

use thiserror::Error;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Every source came back empty - downstream stages have nothing to do
    #[error("no descriptors obtained from any of the {sources} sources")]
    NoNodes {
        /// Number of sources that were attempted
        sources: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipelineError::NoNodes { sources: 7 };
        assert!(err.to_string().contains("7 sources"));
    }
}
