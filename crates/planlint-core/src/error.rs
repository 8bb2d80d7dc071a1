use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanLintError {
    #[error("not initialized: run 'planlint init'")]
    NotInitialized,

    #[error("plan document not found: {0}")]
    PlanNotFound(String),

    #[error("invalid stage id {0}: stage ids must be positive")]
    InvalidStageId(u32),

    #[error("stage {0} has an empty name")]
    EmptyStageName(u32),

    #[error("unknown violation kind: {0}")]
    UnknownKind(String),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("document contains no stages")]
    NoStages,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, PlanLintError>;
