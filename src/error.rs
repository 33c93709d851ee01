use thiserror::Error;

use crate::signal::Node;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("node {0} is not a gate (constant, input or out of bounds)")]
    NotAGate(Node),

    #[error("node {node} has {expected} fanins, but {actual} values were given")]
    ArityMismatch { node: Node, expected: usize, actual: usize },

    #[error("fanin truth tables have different widths ({expected} and {actual} variables)")]
    WidthMismatch { expected: u32, actual: u32 },

    #[error("network has {expected} primary inputs, but {actual} values were given")]
    InputCountMismatch { expected: usize, actual: usize },
}

pub type Result<T, E = NetworkError> = std::result::Result<T, E>;
