//! Error types for myxo_core.
//!
//! The simulation is a closed numerical system: once a world is constructed
//! there are no fallible operations. Everything that can go wrong is caught
//! up front, at configuration load and world construction.

use thiserror::Error;

/// Main error type for simulation setup.
#[derive(Error, Debug)]
pub enum SimError {
    /// A configuration parameter failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("config read error: {0}")]
    ConfigRead(#[from] std::io::Error),
}

/// Result type alias for simulation setup operations.
pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = SimError::InvalidConfig("decay factor must be in (0, 1)".into());
        assert!(err.to_string().contains("invalid configuration"));
        assert!(err.to_string().contains("decay factor"));
    }
}
