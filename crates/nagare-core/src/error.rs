use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NagareError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("degenerate viewport: min and max are both {width}px")]
    DegenerateViewport { width: f64 },

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, NagareError>;
