use thiserror::Error;

pub type GfResult<T> = Result<T, GfError>;

#[derive(Error, Debug)]
pub enum GfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Wrong arity for {what} (expected {expected}, got {actual})")]
    Arity {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Numerical failure: {what}")]
    Numerical { what: String },

    #[error("Physical limit exceeded: {what}")]
    PhysicalLimit { what: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
