#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `type` is not one of dashboard, user, community, space
    InvalidViewType(String),

    /// A parameter was present but could not be interpreted
    InvalidParameter { name: String, value: String },

    /// A required parameter was missing
    MissingParameter(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidViewType(raw) => write!(f, "Invalid wall type: '{}'", raw),
            ParseError::InvalidParameter { name, value } => {
                write!(f, "Invalid value for '{}': '{}'", name, value)
            }
            ParseError::MissingParameter(name) => write!(f, "Missing parameter: {}", name),
        }
    }
}

impl std::error::Error for ParseError {}
