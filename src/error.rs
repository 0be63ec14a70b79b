use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockLedgerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Stock conservation violation on day {day} for product {code}: expected remain {expected}, got {actual}")]
    ConservationViolation {
        day: u32,
        code: String,
        expected: f64,
        actual: f64,
    },

    #[error("Carry-forward violation on day {day} for product {code}: brought forward {brought_forward} != previous remain {previous_remain}")]
    ContinuityViolation {
        day: u32,
        code: String,
        brought_forward: f64,
        previous_remain: f64,
    },

    #[error("Load ticket {ticket} was superseded by ticket {current}")]
    StaleLoad { ticket: u64, current: u64 },

    #[error("Sheet fetch failed: {0}")]
    FetchFailed(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StockLedgerError>;
