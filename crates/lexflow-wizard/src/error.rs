//! Error types for the wizard
//!
//! Field validation failures are not errors in this sense: they live in the
//! wizard's `FieldErrors` map and block navigation. The types here cover:
//! - Blocked navigation and submission misuse
//! - Invalid stage/task/dependency edits
//! - Creation service failures
//! - Configuration loading

use crate::step::{FieldErrors, Step};
use lexflow_template::{
    DocumentId, EmailTemplateId, ExpenseId, ModelError, StageId, TaskId,
};
use std::path::PathBuf;

/// Main wizard error type
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// The current step has field errors
    #[error("step {step} is incomplete: {} field error(s)", .errors.len())]
    Validation {
        /// Step that failed
        step: Step,
        /// Errors surfaced for that step
        errors: FieldErrors,
    },

    /// Submission attempted before the last step
    #[error("submission is only available on the final step (current: {step})")]
    NotOnFinalStep {
        /// Current step
        step: Step,
    },

    /// A hand-off is already pending
    #[error("a submission is already in progress")]
    SubmissionInProgress,

    /// `finish_submit` without a matching `begin_submit`
    #[error("no submission in progress")]
    NoSubmissionInProgress,

    /// Stage/task/dependency edit failed
    #[error("edit failed: {0}")]
    Shaping(#[from] ShapingError),

    /// The creation service failed
    #[error("submission failed: {0}")]
    Submit(#[from] SubmitError),
}

impl WizardError {
    /// Check if the error only reflects incomplete input
    #[inline]
    #[must_use]
    pub fn is_blocking_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Field errors carried by a validation failure
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

/// Errors from editing stages, tasks and other template items
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapingError {
    /// A name was empty after trimming
    #[error("{item} name must not be empty")]
    EmptyName {
        /// Kind of item
        item: &'static str,
    },

    /// Stage duration must be at least one day
    #[error("stage duration must be at least one day")]
    ZeroStageDays,

    /// Task effort must be positive
    #[error("task effort must be positive, got {hours}")]
    NonPositiveHours {
        /// Rejected value
        hours: f64,
    },

    /// Unknown stage
    #[error("stage not found: {0}")]
    StageNotFound(StageId),

    /// Unknown task
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Unknown expense
    #[error("expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    /// Unknown document
    #[error("document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// Unknown email template
    #[error("email template not found: {0}")]
    EmailTemplateNotFound(EmailTemplateId),

    /// A name or id did not resolve to any item
    #[error("no {item} matches '{key}'")]
    UnresolvedReference {
        /// Kind of item
        item: &'static str,
        /// Name or id that was looked up
        key: String,
    },

    /// A task cannot wait on itself
    #[error("task {0} cannot depend on itself")]
    SelfDependency(TaskId),

    /// The dependency would close a cycle
    #[error("cyclic dependency: {path:?}")]
    CyclicDependency {
        /// Tasks along the cycle, first and last equal
        path: Vec<TaskId>,
    },

    /// Invalid model value
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Errors reported by the template creation service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The service refused the template
    #[error("template rejected: {0}")]
    Rejected(String),

    /// The service could not be reached
    #[error("creation service unavailable: {0}")]
    Unavailable(String),
}

impl SubmitError {
    /// Check if submitting again may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for `WizardConfig`
    #[error("invalid wizard configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
