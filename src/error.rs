//! Custom errors used across the library.

use std::error::Error;
use std::fmt;

/// Errors raised while loading an instance file. All of these are fatal at
/// load time; the solver itself never sees a malformed instance.
#[derive(Debug)]
pub enum ImportError {
    IoError(std::io::Error),
    /// Structural problem in the input: wrong counts, out-of-range edge
    /// endpoints, negative weights.
    InputMalformed(String),
    BadInt(std::num::ParseIntError),
    BadFloat(std::num::ParseFloatError),
}

impl From<std::io::Error> for ImportError {
    fn from(e: std::io::Error) -> ImportError {
        ImportError::IoError(e)
    }
}

impl From<std::num::ParseIntError> for ImportError {
    fn from(e: std::num::ParseIntError) -> ImportError {
        ImportError::BadInt(e)
    }
}

impl From<std::num::ParseFloatError> for ImportError {
    fn from(e: std::num::ParseFloatError) -> ImportError {
        ImportError::BadFloat(e)
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "Import: IO error: {}", e),
            Self::InputMalformed(msg) => write!(f, "Import: input is malformed: {}", msg),
            Self::BadInt(e) => write!(f, "Import: integer is malformed: {}", e),
            Self::BadFloat(e) => write!(f, "Import: float is malformed: {}", e),
        }
    }
}

impl Error for ImportError {}

/// Errors raised during a solve. Both variants are fatal for the current
/// solve; there is nothing to retry since the algorithm is deterministic.
#[derive(Debug)]
pub enum SolverError {
    /// The bounding oracle failed to return an optimal relaxation value.
    /// Silently substituting a zero bound would over-prune, so this aborts.
    OracleFailure(String),
    /// A branching strategy broke its contract, e.g. selected a vertex that
    /// is not part of the graph it was called on.
    StrategyContract(String),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OracleFailure(msg) => write!(f, "bounding oracle failed: {}", msg),
            Self::StrategyContract(msg) => write!(f, "branching strategy contract violated: {}", msg),
        }
    }
}

impl Error for SolverError {}
