#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkyError {
    Parse(String),
    InvalidConfig(String),
}

impl std::fmt::Display for SkyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkyError::Parse(msg) => write!(f, "sky config parse error: {msg}"),
            SkyError::InvalidConfig(msg) => write!(f, "invalid sky config: {msg}"),
        }
    }
}

impl std::error::Error for SkyError {}
