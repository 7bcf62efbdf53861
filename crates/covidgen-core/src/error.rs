use thiserror::Error;

/// Core error type shared across covidgen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A parameter lookup could not be resolved (unknown region, table,
    /// bucket or empty weight vector). Parameter tables are static, so this
    /// always points at a programming or configuration defect.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A composed record broke one of its table invariants.
    #[error("invariant violation in {table} row {id}: {detail}")]
    InvariantViolation {
        table: &'static str,
        id: u64,
        detail: String,
    },
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }
}

/// Convenience alias for results returned by covidgen crates.
pub type Result<T> = std::result::Result<T, Error>;
