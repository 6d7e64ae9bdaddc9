use thiserror::Error;

pub type Result<T> = std::result::Result<T, LocvizError>;

#[derive(Error, Debug)]
pub enum LocvizError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid datetime on row {row}: {value:?}")]
    InvalidDate { row: usize, value: String },
    #[error("Invalid {field} on row {row}: {value:?}")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("Invalid brush rectangle: {0}")]
    InvalidBrush(String),
}

