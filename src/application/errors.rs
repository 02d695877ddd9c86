//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Command registration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Alias already registered: {0}")]
    DuplicateAlias(String),

    #[error("Alias must not be empty")]
    EmptyAlias,

    #[error("Descriptor has no aliases")]
    NoAliases,
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Reply could not be submitted: {0}")]
    Reply(#[from] GatewayError),
}

/// Transport errors
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Delivery queue closed")]
    QueueClosed,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}
