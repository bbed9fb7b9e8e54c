use std::fmt;

#[derive(Debug)]
pub enum QueueError {
    /// Buffering thresholds rejected at construction (`floor` must be below `ceiling`).
    InvalidThresholds { floor: usize, ceiling: usize },
    /// Buffer and overflow refer to the same queue instance.
    AliasedQueues,
    /// The backing store failed to open or execute a command.
    Storage(String),
    /// Bad runtime configuration.
    Config(String),
}

impl std::error::Error for QueueError {}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::InvalidThresholds { floor, ceiling } => {
                write!(f, "invalid thresholds: floor {floor} must be below ceiling {ceiling}")
            }
            QueueError::AliasedQueues => {
                write!(f, "buffer and overflow must be distinct queue instances")
            }
            QueueError::Storage(msg) => write!(f, "storage error: {msg}"),
            QueueError::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl From<rusqlite::Error> for QueueError {
    fn from(err: rusqlite::Error) -> Self {
        QueueError::Storage(err.to_string())
    }
}
