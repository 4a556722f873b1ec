use std::io;
use thiserror::Error;

/// Error type for invalid parameter tables and term definitions.
///
/// All variants are raised while a model is assembled; evaluating
/// a finished model cannot fail.
#[derive(Error, Debug)]
pub enum MultiFluidError {
    // errors related to term definitions
    #[error("Lengths are not all identical in {term} term: {lengths}")]
    LengthMismatch { term: &'static str, lengths: String },
    #[error("Non-integer entry in l found in {term} term: {value}")]
    NonIntegerExponent { term: &'static str, value: f64 },
    #[error("Bad term type: {ty}; allowed types are: {{{allowed}}}")]
    UnknownTermType { ty: String, allowed: String },

    // errors related to file handling
    #[error("Load path is invalid: {path}")]
    DataSource {
        path: String,
        #[source]
        source: io::Error,
    },

    // json errors
    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    // errors related to mixture parameters
    #[error("Can't match the binary pair {0}/{1}")]
    BinaryPairNotFound(String, String),
    #[error("Departure function '{0}' was not found.")]
    DepartureNotFound(String),
    #[error("Incompatible number of components: {0} expected, {1} given.")]
    IncompatibleComponents(usize, usize),
    #[error("Missing parameters: {0}")]
    MissingParameters(String),
}

/// Convenience type for `Result<T, MultiFluidError>`.
pub type MultiFluidResult<T> = Result<T, MultiFluidError>;
