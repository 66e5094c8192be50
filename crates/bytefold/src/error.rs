#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("unknown label: {0}")]
    UnknownLabel(String),

    #[error("duplicate label: {0}")]
    DuplicateLabel(String),

    #[error("instruction handle does not refer to a live instruction")]
    InvalidHandle,

    #[error("deleted instruction had targeters but no live replacement exists")]
    RelinkLostTarget,
}

pub type Result<T> = std::result::Result<T, Error>;
