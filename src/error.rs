use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("line {line}: expected 3 fields (from to amount), found {found}")]
    MalformedRecord { line: u64, found: usize },
    #[error("line {line}: `{value}` is not a valid field value")]
    InvalidField { line: u64, value: String },
    #[error("account {id} does not exist (engine has {accounts} accounts)")]
    UnknownAccount { id: usize, accounts: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("request channel closed: no worker is draining it")]
    ChannelClosed,
    #[error("engine is shutting down and accepts no further transfers")]
    ShutDown,
}

pub type Result<T> = std::result::Result<T, EngineError>;
