use thiserror::Error;

#[derive(Error, Debug)]
pub enum GreenwaveError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Infeasible Configuration: {0}")]
    InfeasibleConfig(String),

    #[error("Invalid Demand: {0}")]
    InvalidDemand(String),
}

pub type GwResult<T> = Result<T, GreenwaveError>;
