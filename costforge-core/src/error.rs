use thiserror::Error;

#[derive(Debug, Error)]
pub enum CostforgeError {
    #[error("Scenario id '{0}' is defined more than once")]
    DuplicateScenario(String),

    #[error("Active scenario '{0}' is not among the defined scenarios")]
    UnknownScenario(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to write CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}

pub type Result<T> = std::result::Result<T, CostforgeError>;
