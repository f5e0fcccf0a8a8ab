/// Boundary errors surfaced to the hosting widget.
///
/// Degenerate engine states (empty data, zero viewport, stale view path) are
/// not errors; they resolve locally to empty trees or a root fallback.
#[derive(Debug, Clone)]
pub enum EngineError {
    InvalidRecords(String),
    InvalidStrategy(String),
    InvalidPath(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidRecords(msg) => write!(f, "Invalid records payload: {}", msg),
            EngineError::InvalidStrategy(msg) => write!(f, "Invalid tiling strategy: {}", msg),
            EngineError::InvalidPath(msg) => write!(f, "Invalid view path: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}
