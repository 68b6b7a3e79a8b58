use thiserror::Error;

/// One field-level schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found while validating one argument mapping.
///
/// Validation never stops at the first bad field; the caller sees the full
/// list in a single message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violations(pub Vec<Violation>);

impl std::fmt::Display for Violations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for v in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}", v)?;
            first = false;
        }
        Ok(())
    }
}

/// Closed error taxonomy for tool execution.
///
/// Every failure a tool invocation can produce is one of these variants; the
/// dispatcher translates them into the external error contract at a single
/// boundary point.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("invalid input: {0}")]
    InvalidInput(Violations),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("authentication failed (status {status}): {body}")]
    AuthenticationFailed { status: u16, body: String },

    #[error("remote API error (status {status}): {body}")]
    RemoteApi { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed remote payload: {0}")]
    MalformedPayload(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Convenience constructor for transport errors — use with
    /// `.map_err(ToolError::transport)`.
    pub fn transport<E: std::fmt::Display>(e: E) -> Self {
        Self::Transport(e.to_string())
    }

    /// Convenience constructor for malformed-payload errors — use with
    /// `.map_err(ToolError::malformed)`.
    pub fn malformed<E: std::fmt::Display>(e: E) -> Self {
        Self::MalformedPayload(e.to_string())
    }

    pub fn internal<E: std::fmt::Display>(e: E) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<Violations> for ToolError {
    fn from(violations: Violations) -> Self {
        Self::InvalidInput(violations)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} environment variable is required")]
    MissingEnv { name: &'static str },
}
