use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Failed to open process: {0}")]
    ProcessOpenFailed(String),

    #[error("Failed to read process memory at address {address:#x}: {message}")]
    MemoryReadFailed { address: u64, message: String },

    #[error("Entity not found in active world: {0}")]
    EntityNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check whether this error means the sampled entity (or its memory)
    /// is simply gone this tick, as opposed to a real fault.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::EntityNotFound(_) | Error::MemoryReadFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_recoverable() {
        let err = Error::EntityNotFound("Rayman".to_string());
        assert!(err.is_recoverable());

        let err = Error::MemoryReadFailed {
            address: 0x500000,
            message: "dangling pointer".to_string(),
        };
        assert!(err.is_recoverable());

        let err = Error::ProcessNotFound("Rayman2.exe".to_string());
        assert!(!err.is_recoverable());
    }
}
