use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("Combatant not found: {0:?}")]
    CombatantNotFound(crate::core::types::CombatantId),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
