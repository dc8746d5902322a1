// src/core/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VdError {
    #[error("Shape Mismatch: reference is {reference:?} but imputed is {imputed:?}")]
    ShapeMismatch {
        reference: (usize, usize),
        imputed: (usize, usize),
    },

    #[error("Out Of Range Coordinate: ({row}, {col}) does not fit a {nrows}x{ncols} matrix")]
    OutOfRangeCoordinate {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },

    #[error("Unfilled Missing Value: imputed matrix still holds NaN at ({row}, {col})")]
    UnfilledMissingValue { row: usize, col: usize },

    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Internal Error: {0}")]
    InternalError(String),

    #[error("Ndarray Error: {0}")]
    NdarrayError(#[from] ndarray::ShapeError),
}

// Convenience type alias for Result
pub type Result<T> = std::result::Result<T, VdError>;
