//! Lexflow Template - case template data model
//!
//! The aggregate a case-template wizard builds:
//! - Top-level fields and the practice-area sentinel
//! - Ordered stages and stage-scoped tasks with dependencies
//! - Billing configuration and fee estimates
//! - Documents and client communications
//!
//! # Example
//!
//! ```rust
//! use lexflow_template::{BillingMethod, TemplateDraft};
//!
//! let mut draft = TemplateDraft::new();
//! draft.name = "Divorcio".to_string();
//! draft.default_billing_method = BillingMethod::Fixed;
//!
//! let payload = draft.to_create_data();
//! assert_eq!(payload.practice_area_id, None);
//! ```

#![warn(unreachable_pub)]

pub mod billing;
pub mod draft;
pub mod error;
pub mod ids;
pub mod types;

pub use billing::{BillingConfig, Expense};
pub use draft::{CreateAdvancedTemplateData, TemplateDraft, NO_PRACTICE_AREA};
pub use error::ModelError;
pub use ids::{DocumentId, EmailTemplateId, ExpenseId, StageId, TaskId};
pub use types::{
    AdvancedTemplateData, BillingMethod, Complexity, DocumentRequirement, EmailTemplate,
    EmailTrigger, Priority, Stage, Task,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
