use crate::model::{EntityId, EntityKind};
use thiserror::Error;

/// Result type alias using the canonical ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable by scripts, tests and the
/// JSON output of the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Command decoding
    MalformedCommand,
    InvalidNumeric,
    UnknownField,

    // Structural/Validation
    InvalidInput,
    NotFound,

    // Integration/IO
    Persistence,
    Io,
    Config,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MalformedCommand => "ERR_MALFORMED_COMMAND",
            ExErrorKind::InvalidNumeric => "ERR_INVALID_NUMERIC",
            ExErrorKind::UnknownField => "ERR_UNKNOWN_FIELD",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }

    /// Whether this kind marks a line the interpreter refuses to apply
    /// (malformed line) as opposed to a store-side failure.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ExErrorKind::MalformedCommand | ExErrorKind::InvalidNumeric | ExErrorKind::UnknownField
        )
    }
}

/// Canonical structured error type
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_kind: Option<EntityKind>,
    entity_id: Option<EntityId>,
    line_no: Option<usize>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_kind: None,
            entity_id: None,
            line_no: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity kind context
    pub fn with_entity_kind(mut self, kind: EntityKind) -> Self {
        self.entity_kind = Some(kind);
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: EntityId) -> Self {
        self.entity_id = Some(id);
        self
    }

    /// Add script line context (1-based)
    pub fn with_line_no(mut self, line_no: usize) -> Self {
        self.line_no = Some(line_no);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity kind context, if any
    pub fn entity_kind(&self) -> Option<EntityKind> {
        self.entity_kind
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<EntityId> {
        self.entity_id
    }

    /// Get the script line context, if any
    pub fn line_no(&self) -> Option<usize> {
        self.line_no
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// Shorthand for `kind().is_rejection()`
    pub fn is_rejection(&self) -> bool {
        self.kind.is_rejection()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(kind) = self.entity_kind {
            write!(f, " (entity: {})", kind)?;
        }
        if let Some(id) = self.entity_id {
            write!(f, " (id: {})", id)?;
        }
        if let Some(line_no) = self.line_no {
            write!(f, " (line: {})", line_no)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised while decoding and validating commands
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgencyError {
    /// Unknown command code, unknown sub-code or wrong field count
    #[error("Malformed command: {reason}")]
    MalformedCommand { reason: String },

    /// A field that must hold a non-negative integer does not
    #[error("Field {field} expects a non-negative integer, got '{value}'")]
    InvalidNumeric { field: String, value: String },

    /// The named column does not belong to the entity
    #[error("{entity} has no field named '{field}'")]
    UnknownField { entity: EntityKind, field: String },
}

impl AgencyError {
    /// Build a MalformedCommand error
    pub fn malformed(reason: impl Into<String>) -> Self {
        AgencyError::MalformedCommand {
            reason: reason.into(),
        }
    }
}

/// Conversion from AgencyError to ExError
impl From<AgencyError> for ExError {
    fn from(err: AgencyError) -> Self {
        match err {
            AgencyError::MalformedCommand { reason } => {
                ExError::new(ExErrorKind::MalformedCommand).with_message(reason)
            }
            AgencyError::InvalidNumeric { field, value } => {
                ExError::new(ExErrorKind::InvalidNumeric).with_message(format!(
                    "Field {} expects a non-negative integer, got '{}'",
                    field, value
                ))
            }
            AgencyError::UnknownField { entity, field } => {
                ExError::new(ExErrorKind::UnknownField)
                    .with_entity_kind(entity)
                    .with_message(format!("Unknown field '{}'", field))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::MalformedCommand, "ERR_MALFORMED_COMMAND"),
            (ExErrorKind::InvalidNumeric, "ERR_INVALID_NUMERIC"),
            (ExErrorKind::UnknownField, "ERR_UNKNOWN_FIELD"),
            (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_rejection_classes() {
        assert!(ExErrorKind::MalformedCommand.is_rejection());
        assert!(ExErrorKind::InvalidNumeric.is_rejection());
        assert!(ExErrorKind::UnknownField.is_rejection());
        assert!(!ExErrorKind::Persistence.is_rejection());
        assert!(!ExErrorKind::NotFound.is_rejection());
    }

    #[test]
    fn test_agency_error_maps_to_kind() {
        let err: ExError = AgencyError::InvalidNumeric {
            field: "Experience".to_string(),
            value: "ten".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::InvalidNumeric);
        assert!(err.message().contains("ten"));

        let err: ExError = AgencyError::UnknownField {
            entity: EntityKind::Agent,
            field: "Salary".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::UnknownField);
        assert_eq!(err.entity_kind(), Some(EntityKind::Agent));
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::Persistence)
            .with_op("update")
            .with_entity_kind(EntityKind::Book)
            .with_entity_id(EntityId::from_raw(4))
            .with_line_no(12)
            .with_message("disk I/O error");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_PERSISTENCE]"));
        assert!(text.contains("'update'"));
        assert!(text.contains("Book"));
        assert!(text.contains("(id: 4)"));
        assert!(text.contains("(line: 12)"));
    }

    #[test]
    fn test_source_chain() {
        let inner = ExError::new(ExErrorKind::Persistence).with_message("locked");
        let outer = ExError::new(ExErrorKind::Io).with_source(inner);
        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(ExErrorKind::Persistence)
        );
        assert!(std::error::Error::source(&outer).is_some());
    }
}
