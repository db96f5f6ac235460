//! Planner error types
//!
//! Error codes:
//! - MUSICAT_QUERY_EMPTY (REJECT)
//! - MUSICAT_QUERY_INVALID_YEAR (REJECT)
//! - MUSICAT_QUERY_NO_PLAN (REJECT)

use std::fmt;

/// Severity levels for planner errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Search request rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Planner-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerErrorCode {
    /// No search attribute supplied; a full scan is never performed
    EmptyCriteria,
    /// Year supplied but not an integer
    InvalidYear,
    /// No rule in the table accepted the criteria
    NoPlan,
}

impl PlannerErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            PlannerErrorCode::EmptyCriteria => "MUSICAT_QUERY_EMPTY",
            PlannerErrorCode::InvalidYear => "MUSICAT_QUERY_INVALID_YEAR",
            PlannerErrorCode::NoPlan => "MUSICAT_QUERY_NO_PLAN",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for PlannerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Planner error type with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerError {
    code: PlannerErrorCode,
    message: String,
}

impl PlannerError {
    /// Create an empty criteria error
    pub fn empty_criteria() -> Self {
        Self {
            code: PlannerErrorCode::EmptyCriteria,
            message: "No search attributes provided".into(),
        }
    }

    /// Create an invalid year error
    pub fn invalid_year(raw: impl Into<String>) -> Self {
        Self {
            code: PlannerErrorCode::InvalidYear,
            message: format!("Invalid year value '{}'. Year must be a number.", raw.into()),
        }
    }

    /// Create a no plan error
    pub fn no_plan(reason: impl Into<String>) -> Self {
        Self {
            code: PlannerErrorCode::NoPlan,
            message: reason.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> PlannerErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for PlannerError {}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
