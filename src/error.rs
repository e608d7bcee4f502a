use thiserror::Error;

/// Errors reported by fallible tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Two nodes carry the same explicit value.
    #[error("duplicate node value {value} (first at {first:?}, again at {second:?})")]
    DuplicateValue {
        /// Debug rendering of the offending value.
        value: String,
        /// Index path of the first occurrence.
        first: Vec<u32>,
        /// Index path of the duplicate.
        second: Vec<u32>,
    },
}

/// A loader key that does not name a known model format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no loader for model type `{0}`")]
pub struct UnknownFormat(pub String);
