//! Core types for case templates
//!
//! Defines the aggregate the wizard builds:
//! - Top-level template fields (`TemplateDraft`)
//! - Nested configuration (`AdvancedTemplateData`)
//! - Stages, tasks, documents and email templates

use crate::billing::BillingConfig;
use crate::error::ModelError;
use crate::ids::{DocumentId, EmailTemplateId, StageId, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Implements the lowercase wire names shared by `Display`, `FromStr` and serde.
macro_rules! wire_names {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Every variant, in declaration order
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Wire name of the variant
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($ty::$variant),)+
                    _ => Err(ModelError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

/// Pricing strategy attached to a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingMethod {
    /// Billed per hour worked
    #[default]
    Hourly,
    /// Flat fee for the whole matter
    Fixed,
    /// Up-front retainer drawn down over time
    Retainer,
    /// Percentage of the outcome
    Contingency,
}

wire_names!(BillingMethod, "billing method", {
    Hourly => "hourly",
    Fixed => "fixed",
    Retainer => "retainer",
    Contingency => "contingency",
});

/// How demanding a case type is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    /// Routine matters
    Basic,
    /// Typical matters
    #[default]
    Intermediate,
    /// Matters requiring senior attention
    Advanced,
}

wire_names!(Complexity, "complexity", {
    Basic => "basic",
    Intermediate => "intermediate",
    Advanced => "advanced",
});

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can slip
    Low,
    /// Normal work
    #[default]
    Medium,
    /// Needs attention this week
    High,
    /// Blocks the matter
    Critical,
}

wire_names!(Priority, "priority", {
    Low => "low",
    Medium => "medium",
    High => "high",
    Critical => "critical",
});

/// Event that sends an automatic client email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailTrigger {
    /// Sent when a case is opened from the template
    CaseCreated,
    /// Sent when a stage is marked complete
    StageCompleted,
    /// Sent when a task passes its due day
    TaskOverdue,
    /// Only sent by hand
    #[default]
    Manual,
}

wire_names!(EmailTrigger, "email trigger", {
    CaseCreated => "case_created",
    StageCompleted => "stage_completed",
    TaskOverdue => "task_overdue",
    Manual => "manual",
});

/// A named phase of a case template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    /// Stage identifier
    pub id: StageId,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// 1-based position, assigned when the stage is appended
    pub order: u32,
    /// Expected duration in days (> 0)
    pub estimated_days: u32,
    /// Names of documents that must exist before the stage closes
    pub required_documents: BTreeSet<String>,
    /// Role assigned by default to work in this stage
    pub default_assignee_role: Option<String>,
    /// Whether the stage is on the critical path
    pub is_critical: bool,
}

/// A unit of work, optionally scoped to a stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task identifier
    pub id: TaskId,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Owning stage; `None` puts the task in the general bucket
    pub stage_id: Option<StageId>,
    /// Expected effort in hours (> 0)
    pub estimated_hours: f64,
    /// Priority
    pub priority: Priority,
    /// Role expected to do the work
    pub assignee_role: Option<String>,
    /// Due date as an offset from case start
    pub due_days_after_start: u32,
    /// Tasks that must finish before this one
    pub dependencies: Vec<TaskId>,
    /// Created automatically when the case opens
    pub is_automatic: bool,
}

impl Task {
    /// Check if this task waits on `other`
    #[inline]
    #[must_use]
    pub fn depends_on(&self, other: TaskId) -> bool {
        self.dependencies.contains(&other)
    }
}

/// A document the template expects to be produced or collected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequirement {
    /// Document identifier
    pub id: DocumentId,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Stage the document belongs to
    pub stage_id: Option<StageId>,
    /// Whether the case cannot close without it
    pub is_required: bool,
}

/// An automatic client communication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplate {
    /// Email template identifier
    pub id: EmailTemplateId,
    /// Display name
    pub name: String,
    /// Subject line
    pub subject: String,
    /// Body text
    pub body: String,
    /// When the email is sent
    pub trigger: EmailTrigger,
}

/// Nested configuration of a case template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedTemplateData {
    /// Icon name shown in template lists
    pub icon: String,
    /// Accent color (hex)
    pub color: String,
    /// Category; empty means unset
    pub category: String,
    /// Search tags
    pub tags: BTreeSet<String>,
    /// Complexity
    pub complexity: Complexity,
    /// Expected total duration in days (> 0)
    pub estimated_duration_days: u32,
    /// Ordered stages
    pub stages: Vec<Stage>,
    /// Tasks
    pub tasks: Vec<Task>,
    /// Billing configuration
    pub billing: BillingConfig,
    /// Expected documents
    pub documents: Vec<DocumentRequirement>,
    /// Client communications
    pub email_templates: Vec<EmailTemplate>,
    /// Whether email templates fire automatically
    pub auto_communications: bool,
    /// Whether clients see the case in the portal
    pub client_portal_access: bool,
}

impl AdvancedTemplateData {
    /// Look up a stage by id
    #[must_use]
    pub fn stage(&self, id: StageId) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == id)
    }

    /// Look up a task by id
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Sum of stage durations in days
    #[must_use]
    pub fn total_stage_days(&self) -> u32 {
        self.stages.iter().map(|s| s.estimated_days).sum()
    }

    /// Sum of task effort in hours
    #[must_use]
    pub fn total_task_hours(&self) -> f64 {
        self.tasks.iter().map(|t| t.estimated_hours).sum()
    }
}

impl Default for AdvancedTemplateData {
    fn default() -> Self {
        Self {
            icon: "scale".to_string(),
            color: "#3B82F6".to_string(),
            category: String::new(),
            tags: BTreeSet::new(),
            complexity: Complexity::default(),
            estimated_duration_days: 30,
            stages: Vec::new(),
            tasks: Vec::new(),
            billing: BillingConfig::default(),
            documents: Vec::new(),
            email_templates: Vec::new(),
            auto_communications: true,
            client_portal_access: false,
        }
    }
}
