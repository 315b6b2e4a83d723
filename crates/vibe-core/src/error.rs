//! Error types for Vibe Studio.

use thiserror::Error;

/// A precondition on a session transition that was not met.
///
/// Each variant names the input the caller has to fix before retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("A teaching persona must be selected")]
    MissingPersona,

    #[error("An activity template must be selected")]
    MissingTemplate,

    #[error("The applet description must not be empty")]
    EmptyContent,

    #[error("Unknown persona '{0}'")]
    UnknownPersona(String),

    #[error("Unknown activity template '{0}'")]
    UnknownTemplate(String),

    #[error("There is no applet to refine yet")]
    NoAppletToRefine,

    #[error("The change request must not be empty")]
    EmptyChangeRequest,

    #[error("The applet code must not be empty")]
    EmptyCode,

    #[error("The applet name must not be empty")]
    MissingAppName,

    #[error("A session name is required to save")]
    MissingSessionName,

    #[error("The session has no applet to save")]
    NothingToSave,

    #[error("This version of the applet has already been published")]
    AlreadyPublished,

    #[error("Another operation is still running for this session")]
    OperationInProgress,
}

impl ValidationError {
    /// The name of the input that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingPersona | Self::UnknownPersona(_) => "persona",
            Self::MissingTemplate | Self::UnknownTemplate(_) => "template",
            Self::EmptyContent => "content",
            Self::NoAppletToRefine => "current_applet",
            Self::EmptyChangeRequest => "change_request",
            Self::EmptyCode | Self::NothingToSave => "code",
            Self::MissingAppName => "metadata.name",
            Self::MissingSessionName => "name",
            Self::AlreadyPublished => "published_entry_id",
            Self::OperationInProgress => "session",
        }
    }
}

/// A shared error type for the entire Vibe workspace.
///
/// Every failure of the generation core maps onto one of these variants so
/// callers can tell them apart without inspecting messages.
#[derive(Error, Debug, Clone)]
pub enum VibeError {
    /// A transition precondition was violated
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The generative backend could not be reached or failed at transport level
    #[error("Generation backend unavailable: {message}")]
    BackendUnavailable {
        message: String,
        status_code: Option<u16>,
        retryable: bool,
    },

    /// The backend answered but broke the structured-output contract
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// The caller is not a verified teacher, or not the owner of a record
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Storage-layer failure
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VibeError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a BackendUnavailable error without an HTTP status
    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
            status_code: None,
            retryable: true,
        }
    }

    /// Creates a MalformedResponse error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Creates an Authorization error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Authorization(message.into())
    }

    /// Creates a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns the validation failure, if this is one.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_backend_unavailable(&self) -> bool {
        matches!(self, Self::BackendUnavailable { .. })
    }

    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Authorization(_))
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether repeating the same call unchanged may succeed.
    ///
    /// Malformed responses need a rephrased request and validation failures
    /// need fixed input, so neither counts as retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::BackendUnavailable { retryable, .. } => *retryable,
            Self::Persistence(_) => true,
            _ => false,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for VibeError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for VibeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for VibeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for VibeError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<minijinja::Error> for VibeError {
    fn from(err: minijinja::Error) -> Self {
        Self::Internal(format!("Prompt template error: {}", err))
    }
}

/// A type alias for `Result<T, VibeError>`.
pub type Result<T> = std::result::Result<T, VibeError>;
