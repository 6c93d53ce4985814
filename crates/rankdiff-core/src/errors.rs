use rankdiff_core_types::RunId;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure a capture or compare run can hit maps to exactly one kind.
/// Each kind has a stable code for programmatic handling and for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Missing or invalid input (empty query list, bad config value)
    Configuration,
    /// Ranking service answered with a non-success status, could not be
    /// reached, or returned an undecodable body
    Upstream,
    /// A referenced snapshot identifier does not exist
    NotFound,
    /// A snapshot file exists but cannot be parsed or breaks an invariant
    CorruptData,
    /// A snapshot could not be durably written (I/O failure or id collision)
    Persistence,
    /// Two snapshots were compared whose query sets differ
    QuerySetMismatch,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Configuration => "ERR_CONFIGURATION",
            ExErrorKind::Upstream => "ERR_UPSTREAM",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::CorruptData => "ERR_CORRUPT_DATA",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::QuerySetMismatch => "ERR_QUERY_SET_MISMATCH",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus whatever context the failing operation
/// knew about: the query being ranked, the snapshot being read, the ids that
/// were missing and the ids that were available instead.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    query: Option<String>,
    snapshot_id: Option<String>,
    run_id: Option<RunId>,
    message: String,
    source: Option<Box<ExError>>,
    missing: Option<Vec<String>>,
    candidates: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            query: None,
            snapshot_id: None,
            run_id: None,
            message: String::new(),
            source: None,
            missing: None,
            candidates: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the query that was being processed
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Add the snapshot identifier that was being processed
    pub fn with_snapshot_id(mut self, id: impl Into<String>) -> Self {
        self.snapshot_id = Some(id.into());
        self
    }

    /// Add run correlation
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
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

    /// Add the identifiers that were referenced but not found
    pub fn with_missing(mut self, ids: Vec<String>) -> Self {
        self.missing = Some(ids);
        self
    }

    /// Add candidate identifiers (the available snapshots on NotFound)
    pub fn with_candidates(mut self, ids: Vec<String>) -> Self {
        self.candidates = Some(ids);
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

    /// Get the query context, if any
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Get the snapshot identifier context, if any
    pub fn snapshot_id(&self) -> Option<&str> {
        self.snapshot_id.as_deref()
    }

    /// Get the run correlation, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// Get missing identifiers, if any (populated on NotFound)
    pub fn missing(&self) -> Option<&[String]> {
        self.missing.as_deref()
    }

    /// Get candidate identifiers, if any (populated on NotFound)
    pub fn candidates(&self) -> Option<&[String]> {
        self.candidates.as_deref()
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
        if let Some(query) = &self.query {
            write!(f, " (query: '{}')", query)?;
        }
        if let Some(snapshot_id) = &self.snapshot_id {
            write!(f, " (snapshot: {})", snapshot_id)?;
        }
        if let Some(missing) = &self.missing {
            write!(f, " (missing: {})", missing.join(", "))?;
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

/// Domain error taxonomy for capture and compare runs
///
/// Components build one of these when they know precisely what went wrong,
/// then convert into [`ExError`] at the crate boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RankDiffError {
    /// A required input is missing or invalid
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    /// The ranking service failed for a query
    #[error("Ranking service failed for query '{query}': {cause}")]
    UpstreamError { query: String, cause: String },

    /// One or more snapshot identifiers do not exist
    #[error("Snapshot(s) not found: {}", missing.join(", "))]
    NotFoundError {
        missing: Vec<String>,
        available: Vec<String>,
    },

    /// A snapshot's content cannot be used
    #[error("Snapshot {snapshot_id} is corrupt: {reason}")]
    CorruptDataError { snapshot_id: String, reason: String },

    /// A snapshot could not be written
    #[error("Unable to persist snapshot: {reason}")]
    PersistenceError { reason: String },

    /// Two snapshots do not cover the same queries
    #[error(
        "Query sets differ: only in previous {only_in_previous:?}, only in current {only_in_current:?}"
    )]
    QuerySetMismatchError {
        only_in_previous: Vec<String>,
        only_in_current: Vec<String>,
    },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from RankDiffError to ExError
impl From<RankDiffError> for ExError {
    fn from(err: RankDiffError) -> Self {
        let message = err.to_string();
        match err {
            RankDiffError::ConfigurationError { .. } => {
                ExError::new(ExErrorKind::Configuration).with_message(message)
            }

            RankDiffError::UpstreamError { query, cause } => ExError::new(ExErrorKind::Upstream)
                .with_query(query)
                .with_message(format!("ranking service request failed: {}", cause)),

            RankDiffError::NotFoundError { missing, available } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_message("referenced snapshot(s) do not exist")
                    .with_missing(missing)
                    .with_candidates(available)
            }

            RankDiffError::CorruptDataError {
                snapshot_id,
                reason,
            } => ExError::new(ExErrorKind::CorruptData)
                .with_snapshot_id(snapshot_id)
                .with_message(reason),

            RankDiffError::PersistenceError { reason } => {
                ExError::new(ExErrorKind::Persistence).with_message(reason)
            }

            RankDiffError::QuerySetMismatchError { .. } => {
                ExError::new(ExErrorKind::QuerySetMismatch).with_message(message)
            }

            RankDiffError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
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
            (ExErrorKind::Configuration, "ERR_CONFIGURATION"),
            (ExErrorKind::Upstream, "ERR_UPSTREAM"),
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::CorruptData, "ERR_CORRUPT_DATA"),
            (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
            (ExErrorKind::QuerySetMismatch, "ERR_QUERY_SET_MISMATCH"),
            (ExErrorKind::Internal, "ERR_INTERNAL"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_ex_error_candidates_none_by_default() {
        let err = ExError::new(ExErrorKind::NotFound);
        assert!(err.candidates().is_none());
        assert!(err.missing().is_none());
    }

    #[test]
    fn test_display_includes_code_op_and_query() {
        let err = ExError::new(ExErrorKind::Upstream)
            .with_op("build_snapshot")
            .with_query("how to reset vpn")
            .with_message("HTTP 500");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_UPSTREAM]"));
        assert!(text.contains("build_snapshot"));
        assert!(text.contains("how to reset vpn"));
        assert!(text.contains("HTTP 500"));
    }

    #[test]
    fn test_std_error_source_chain() {
        use std::error::Error as _;
        let inner = ExError::new(ExErrorKind::Persistence).with_message("disk full");
        let outer = ExError::new(ExErrorKind::Persistence)
            .with_op("capture")
            .with_source(inner);
        let source = outer.source().expect("source should be chained");
        assert!(source.to_string().contains("disk full"));
        assert!(!outer.to_string().contains("disk full"));
    }
}
