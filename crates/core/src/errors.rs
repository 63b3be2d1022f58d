use thiserror::Error;

/// Unified error type for the entire swing-dashboard-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport ───────────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {feed} feed")]
    HttpStatus { feed: String, status: u16 },

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Parse ───────────────────────────────────────────────────────
    #[error("Failed to parse {feed} feed: {message}")]
    Parse { feed: String, message: String },

    // ── Schema ──────────────────────────────────────────────────────
    #[error("Missing required field '{field}' on {entity}")]
    MissingField { entity: String, field: String },

    #[error("Invalid shape for '{field}' on {entity}: {message}")]
    InvalidShape {
        entity: String,
        field: String,
        message: String,
    },

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

/// Coarse classification of a [`CoreError`], used to pick a display state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The feed could not be reached or answered with a non-success status.
    Transport,
    /// The feed answered but the body is not valid JSON.
    Parse,
    /// A structurally required field is absent or has the wrong shape.
    Schema,
    /// Local configuration is invalid.
    Config,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::Parse => write!(f, "parse"),
            ErrorKind::Schema => write!(f, "schema"),
            ErrorKind::Config => write!(f, "config"),
        }
    }
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Network(_) | CoreError::HttpStatus { .. } | CoreError::FileIO(_) => {
                ErrorKind::Transport
            }
            CoreError::Parse { .. } => ErrorKind::Parse,
            CoreError::MissingField { .. } | CoreError::InvalidShape { .. } => ErrorKind::Schema,
            CoreError::InvalidSettings(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn missing(entity: &str, field: &str) -> Self {
        CoreError::MissingField {
            entity: entity.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn shape(entity: &str, field: &str, message: impl Into<String>) -> Self {
        CoreError::InvalidShape {
            entity: entity.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Every feed URL carries a cache-busting query; keep it out of messages.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
